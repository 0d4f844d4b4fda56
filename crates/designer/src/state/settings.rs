//! Designer settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::GarmentType;
use thiserror::Error;

use crate::tuning::{TuningError, TuningTable};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning table: {0}")]
    Tuning(#[from] TuningError),
}

/// All designer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignerSettings {
    /// Garment shown on start
    #[serde(default)]
    pub default_garment: GarmentType,
    /// Garment colour on start (hex)
    #[serde(default = "default_color")]
    pub default_color: String,
    /// Per-archetype zone placement constants
    #[serde(default)]
    pub tuning: TuningTable,
}

fn default_color() -> String {
    shared::PALETTE[0].hex.to_string()
}

impl Default for DesignerSettings {
    fn default() -> Self {
        Self {
            default_garment: GarmentType::default(),
            default_color: default_color(),
            tuning: TuningTable::default(),
        }
    }
}

impl DesignerSettings {
    /// Platform config location of `settings.json`
    #[cfg(feature = "settings-file")]
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "garment", "designer")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    #[cfg(not(feature = "settings-file"))]
    pub fn config_path() -> Option<PathBuf> {
        None
    }

    /// Load settings from the config dir, or return defaults if missing or
    /// broken
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("ignoring settings at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Load and validate settings from a specific file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.tuning.validate()?;
        Ok(settings)
    }

    /// Save settings to the config dir
    pub fn save(&self) -> Result<(), SettingsError> {
        match Self::config_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(io_err)
    }
}
