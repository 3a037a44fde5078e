//! `localStorage`-backed settings store

use tracing::warn;
use web_sys::{Storage, Window};

use crate::core::error::{Result, WidgetError};
use crate::core::settings::SettingsStore;

/// Settings persisted in the page's `localStorage`. Private browsing modes
/// may deny access; reads then see nothing and writes fail softly.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn open(window: &Window) -> Self {
        let storage = window.local_storage().ok().flatten();
        if storage.is_none() {
            warn!("localStorage unavailable, settings will not persist");
        }
        Self { storage }
    }
}

impl SettingsStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| WidgetError::Storage("localStorage unavailable".into()))?;
        storage
            .set_item(key, value)
            .map_err(|e| WidgetError::Storage(format!("{e:?}")))
    }
}
