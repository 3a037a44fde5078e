//! Persisted user settings
//!
//! A flat string key/value store, read once at startup and written back
//! immediately on every change. A missing key is never an error: it means
//! "use the computed default".

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, warn};

use super::config::WidgetConfig;
use super::error::Result;
use super::host::Host;
use super::i18n::resolve_initial_language;
use super::refresh::clamp_refresh_ms;
use super::theme::Theme;
use super::timezone::{detect_host_timezone, LOCAL_TIMEZONE};

pub const LANGUAGE_KEY: &str = "language";
pub const TIMEZONE_KEY: &str = "timezone";
pub const THEME_KEY: &str = "theme";
pub const REFRESH_RATE_KEY: &str = "refreshRate";

/// Flat key/value settings backend (localStorage, JSON file, memory)
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, used when no durable backend is available and in tests
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store handle shared by every controller
pub type SharedStore = Rc<RefCell<dyn SettingsStore>>;

/// Typed view over the shared settings store
#[derive(Clone)]
pub struct Preferences {
    store: SharedStore,
}

impl Preferences {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Convenience constructor around a concrete store
    pub fn from_store(store: impl SettingsStore + 'static) -> Self {
        Self::new(Rc::new(RefCell::new(store)))
    }

    pub fn language(&self) -> Option<String> {
        self.get(LANGUAGE_KEY)
    }

    pub fn set_language(&self, tag: &str) {
        self.set(LANGUAGE_KEY, tag);
    }

    pub fn timezone(&self) -> Option<String> {
        self.get(TIMEZONE_KEY)
    }

    pub fn set_timezone(&self, id: &str) {
        self.set(TIMEZONE_KEY, id);
    }

    /// Raw stored theme value (`light`, `dark`, `auto`, or anything else)
    pub fn theme(&self) -> Option<String> {
        self.get(THEME_KEY)
    }

    pub fn set_theme(&self, theme: Theme) {
        self.set(THEME_KEY, theme.as_str());
    }

    /// Stored refresh rate; unparsable values count as absent
    pub fn refresh_rate_ms(&self) -> Option<u32> {
        let raw = self.get(REFRESH_RATE_KEY)?;
        match raw.trim().parse::<u32>() {
            Ok(ms) => Some(ms),
            Err(e) => {
                warn!(value = %raw, error = %e, "Ignoring unparsable stored refresh rate");
                None
            }
        }
    }

    pub fn set_refresh_rate_ms(&self, ms: u32) {
        self.set(REFRESH_RATE_KEY, &ms.to_string());
    }

    fn get(&self, key: &str) -> Option<String> {
        self.store.borrow().get(key).filter(|v| !v.is_empty())
    }

    fn set(&self, key: &str, value: &str) {
        match self.store.borrow_mut().set(key, value) {
            Ok(()) => debug!(key, value, "Setting persisted"),
            Err(e) => warn!(key, value, error = %e, "Failed to persist setting"),
        }
    }
}

/// Effective settings after falling back to host and configured defaults
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub language: String,
    pub timezone: String,
    /// Explicit theme override; `None` follows the host preference
    pub theme: Option<Theme>,
    pub refresh_rate_ms: u32,
}

impl Settings {
    /// Resolve startup settings: persisted value, then host, then default.
    pub fn load(prefs: &Preferences, host: &dyn Host, config: &WidgetConfig) -> Self {
        let language = resolve_initial_language(
            prefs.language().as_deref(),
            host.preferred_language().as_deref(),
        );

        let timezone = prefs.timezone().unwrap_or_else(|| {
            host.timezone_id()
                .map(|id| detect_host_timezone(&id).to_string())
                .unwrap_or_else(|| LOCAL_TIMEZONE.to_string())
        });

        let theme = prefs.theme().as_deref().and_then(Theme::parse);

        let refresh_rate_ms = clamp_refresh_ms(
            prefs.refresh_rate_ms().unwrap_or(config.refresh_rate_ms),
        );

        let settings = Self {
            language,
            timezone,
            theme,
            refresh_rate_ms,
        };
        debug!(?settings, "Settings loaded");
        settings
    }
}
