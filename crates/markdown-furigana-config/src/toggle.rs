use std::fmt;

use crate::{ConfigError, Settings, SettingsStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Ctrl,
    Alt,
    Shift,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Modifier::Ctrl => "Ctrl",
            Modifier::Alt => "Alt",
            Modifier::Shift => "Shift",
        };
        f.write_str(name)
    }
}

/// A key plus the modifiers held with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub modifiers: Vec<Modifier>,
    pub key: char,
}

impl KeyCombo {
    pub fn new(modifiers: &[Modifier], key: char) -> Self {
        Self {
            modifiers: modifiers.to_vec(),
            key: key.to_ascii_lowercase(),
        }
    }

    pub fn has(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// True when `key` pressed with exactly `held` matches this combination.
    pub fn matches(&self, held: &[Modifier], key: char) -> bool {
        self.key == key.to_ascii_lowercase()
            && held.len() == self.modifiers.len()
            && held.iter().all(|m| self.has(*m))
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{modifier}+")?;
        }
        write!(f, "{}", self.key.to_ascii_uppercase())
    }
}

/// The user-invocable command that flips reading visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleCommand {
    pub id: &'static str,
    pub name: &'static str,
    pub key: KeyCombo,
}

impl ToggleCommand {
    pub const ID: &'static str = "toggle-furigana";
    pub const NAME: &'static str = "Toggle furigana";
}

impl Default for ToggleCommand {
    fn default() -> Self {
        Self {
            id: Self::ID,
            name: Self::NAME,
            key: KeyCombo::new(&[Modifier::Ctrl, Modifier::Alt], 'f'),
        }
    }
}

/// Owner of the visibility flag.
///
/// Loaded once at startup and written back on every change. The key
/// binding and any clickable affordance both go through [`Visibility::toggle`].
#[derive(Debug)]
pub struct Visibility<S: SettingsStore> {
    settings: Settings,
    store: S,
}

impl<S: SettingsStore> Visibility<S> {
    pub fn load(store: S) -> Result<Self, ConfigError> {
        let settings = store.load()?;
        log::debug!("furigana visible at startup: {}", settings.furigana_visible);
        Ok(Self { settings, store })
    }

    /// Like [`Visibility::load`], but unreadable settings start from the
    /// defaults instead of failing.
    pub fn load_or_default(store: S) -> Self {
        let settings = store.load().unwrap_or_else(|e| {
            log::warn!("{e}; using default settings");
            Settings::default()
        });
        Self { settings, store }
    }

    pub fn is_visible(&self) -> bool {
        self.settings.furigana_visible
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Flips visibility, persists it and returns the new state.
    ///
    /// The in-memory flag flips even when saving fails, so the view still
    /// reacts; the error is returned for the host to report.
    pub fn toggle(&mut self) -> Result<bool, ConfigError> {
        self.settings.furigana_visible = !self.settings.furigana_visible;
        log::info!("furigana visible: {}", self.settings.furigana_visible);
        self.store.save(&self.settings)?;
        Ok(self.settings.furigana_visible)
    }
}
