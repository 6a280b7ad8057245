use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::{ConfigError, Settings};

/// Key-value persistence for [`Settings`], supplied by the host.
pub trait SettingsStore {
    /// Loads the stored settings; absent settings load as the defaults.
    fn load(&self) -> Result<Settings, ConfigError>;
    fn save(&self, settings: &Settings) -> Result<(), ConfigError>;
}

/// Settings kept in a TOML file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let path = Self::expand_path(path).unwrap_or_else(|| path.to_path_buf());
        Self { path }
    }

    /// A store at [`FileStore::default_path`].
    pub fn at_default_path() -> Self {
        Self {
            path: Self::default_path(),
        }
    }

    pub fn default_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-furigana");
        PathBuf::from(config_dir.as_ref()).join("settings.toml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

impl SettingsStore for FileStore {
    fn load(&self) -> Result<Settings, ConfigError> {
        if !self.path.exists() {
            log::debug!("no settings at {}, using defaults", self.path.display());
            return Ok(Settings::default());
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|source| ConfigError::ConfigReadError {
                config_path: self.path.clone(),
                source,
            })?;

        toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
            config_path: self.path.clone(),
            source,
        })
    }

    fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::ConfigWriteError {
            config_path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = toml::to_string_pretty(settings)?;
        std::fs::write(&self.path, content).map_err(write_err)?;
        log::debug!("saved settings to {}", self.path.display());
        Ok(())
    }
}

/// Settings held in memory, for hosts without persistence and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: RefCell<Option<Settings>>,
    saves: RefCell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(settings: Settings) -> Self {
        Self {
            saved: RefCell::new(Some(settings)),
            saves: RefCell::new(0),
        }
    }

    /// Number of times `save` has been called.
    pub fn saves(&self) -> usize {
        *self.saves.borrow()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Settings, ConfigError> {
        Ok(self.saved.borrow().clone().unwrap_or_default())
    }

    fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        *self.saved.borrow_mut() = Some(settings.clone());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}
