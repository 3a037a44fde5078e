//! JSON settings file in the user config directory

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::error::{Result, WidgetError};
use crate::core::settings::SettingsStore;

const APP_DIR: &str = "howlong-today";
const FILE_NAME: &str = "settings.json";

/// Flat string map persisted as a JSON object, rewritten on every change
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// `<config dir>/howlong-today/settings.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
    }

    /// Load the file at `path`. A missing or corrupt file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let json = std::fs::read_to_string(&path)?;
            match serde_json::from_str(&json) {
                Ok(values) => {
                    info!(path = %path.display(), "Settings loaded");
                    values
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse settings, using defaults");
                    BTreeMap::new()
                }
            }
        } else {
            info!(path = %path.display(), "Settings file not found, using defaults");
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write via a temp file and rename so a crash never leaves half a file
    fn save(&self) -> Result<()> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| WidgetError::Storage("invalid settings path".to_string()))?;
        std::fs::create_dir_all(dir)?;

        let temp_path = dir.join(format!("{FILE_NAME}.tmp"));
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&temp_path, json)?;
        std::fs::rename(temp_path, &self.path)?;
        debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}
