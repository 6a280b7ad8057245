//! Settings for markdown-furigana.
//!
//! The only persisted state is whether readings are shown. Hosts keep it
//! behind a [`SettingsStore`], and the [`Visibility`] controller is the one
//! place it changes: the toggle command and the toolbar button both call
//! [`Visibility::toggle`].

pub mod store;
pub mod toggle;

pub use store::{FileStore, MemoryStore, SettingsStore};
pub use toggle::{KeyCombo, Modifier, ToggleCommand, Visibility};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse settings file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to write settings file at {config_path}: {source}")]
    ConfigWriteError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    ConfigSerializeError(#[from] toml::ser::Error),
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Whether reading labels are shown.
    #[serde(rename = "furiganaVisible", default = "default_visible")]
    pub furigana_visible: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            furigana_visible: default_visible(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_visible() {
        assert!(Settings::default().furigana_visible);
    }

    #[test]
    fn test_missing_key_defaults_to_visible() {
        let settings: Settings = toml::from_str("").unwrap();
        assert!(settings.furigana_visible);
    }

    #[test]
    fn test_settings_serialization_roundtrip() {
        let original = Settings {
            furigana_visible: false,
        };

        let toml_str = toml::to_string(&original).unwrap();
        assert_eq!(toml_str.trim(), "furiganaVisible = false");
        let deserialized: Settings = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }
}
