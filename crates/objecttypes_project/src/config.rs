//! Where the backing file lives
//!
//! Stored as TOML in the platform config directory:
//! - Windows: %APPDATA%/objecttypes/config/
//! - Linux: ~/.config/objecttypes/
//! - macOS: ~/Library/Application Support/objecttypes/

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory used when nothing else is configured
pub const DEFAULT_DIRECTORY: &str = "res/";
/// File name used when nothing else is configured
pub const DEFAULT_FILE_NAME: &str = "objecttypes.xml";

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Location of the objecttypes file and its sibling images
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Directory holding the XML file and `<name>.png` images
    pub directory: PathBuf,
    /// Name of the XML file inside `directory`
    pub file_name: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl ProjectConfig {
    pub fn new(directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
        }
    }

    /// Full path of the backing XML file
    pub fn file_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    /// Default location of the config file, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "objecttypes").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load from a TOML file. Missing keys fall back to the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load from the default location, or return defaults if there is none
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save as TOML, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
