//! Widget configuration
//!
//! Deployment-time knobs, as opposed to the user preferences persisted in
//! [`crate::core::settings`]. Each host supplies a key lookup: the web build
//! reads `window.__howlong_<key>` globals, the desktop build reads
//! `HOWLONG_<KEY>` environment variables.

use tracing::{debug, warn};

use super::refresh::{clamp_refresh_ms, DEFAULT_REFRESH_MS};
use super::theme::NightWindow;

/// Lookup key: default refresh rate in milliseconds
pub const KEY_REFRESH_MS: &str = "refresh_ms";
/// Lookup key: decimal digits of the seconds counter
pub const KEY_DECIMALS: &str = "decimals";
/// Lookup key: thousands grouping of the seconds counter (`true`/`false`)
pub const KEY_GROUP_THOUSANDS: &str = "group_thousands";
/// Lookup key: night-theme window as `START-END` hours, or `off`
pub const KEY_NIGHT_THEME: &str = "night_theme";

/// Display and behaviour options fixed at startup
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetConfig {
    /// Refresh cadence used when no rate has been persisted
    pub refresh_rate_ms: u32,
    /// Decimal digits of the seconds counter (2..=3)
    pub seconds_decimals: usize,
    /// Group the integer part of the seconds counter with commas
    pub group_thousands: bool,
    /// Time-of-day auto-theme window; `None` disables the polling check
    pub night_window: Option<NightWindow>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: DEFAULT_REFRESH_MS,
            seconds_decimals: 2,
            group_thousands: true,
            night_window: None,
        }
    }
}

impl WidgetConfig {
    /// Build a config from a host key lookup, keeping defaults for absent or
    /// malformed values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(KEY_REFRESH_MS) {
            match raw.trim().parse::<u32>() {
                Ok(ms) => config.refresh_rate_ms = clamp_refresh_ms(ms),
                Err(e) => warn!(value = %raw, error = %e, "Ignoring invalid refresh rate"),
            }
        }

        if let Some(raw) = lookup(KEY_DECIMALS) {
            match raw.trim().parse::<usize>() {
                Ok(d) => config.seconds_decimals = d.clamp(2, 3),
                Err(e) => warn!(value = %raw, error = %e, "Ignoring invalid decimals"),
            }
        }

        if let Some(raw) = lookup(KEY_GROUP_THOUSANDS) {
            match raw.trim() {
                "1" | "true" | "yes" => config.group_thousands = true,
                "0" | "false" | "no" => config.group_thousands = false,
                other => warn!(value = other, "Ignoring invalid thousands grouping flag"),
            }
        }

        if let Some(raw) = lookup(KEY_NIGHT_THEME) {
            config.night_window = match raw.trim() {
                "" | "off" | "0" | "false" => None,
                "on" | "1" | "true" => Some(NightWindow::default()),
                window => {
                    let parsed = NightWindow::parse(window);
                    if parsed.is_none() {
                        warn!(value = window, "Ignoring invalid night theme window");
                    }
                    parsed
                }
            };
        }

        debug!(?config, "Widget configuration resolved");
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_lookup_keeps_defaults() {
        let config = WidgetConfig::from_lookup(|_| None);
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(config.refresh_rate_ms, DEFAULT_REFRESH_MS);
        assert!(config.night_window.is_none());
    }

    #[test]
    fn test_values_are_parsed_and_clamped() {
        let config = WidgetConfig::from_lookup(lookup_from(&[
            (KEY_REFRESH_MS, "1"),
            (KEY_DECIMALS, "7"),
            (KEY_GROUP_THOUSANDS, "false"),
            (KEY_NIGHT_THEME, "21-7"),
        ]));
        assert_eq!(config.refresh_rate_ms, clamp_refresh_ms(1));
        assert_eq!(config.seconds_decimals, 3);
        assert!(!config.group_thousands);
        assert_eq!(config.night_window, Some(NightWindow { start_hour: 21, end_hour: 7 }));
    }

    #[test]
    fn test_malformed_values_are_ignored() {
        let config = WidgetConfig::from_lookup(lookup_from(&[
            (KEY_REFRESH_MS, "fast"),
            (KEY_GROUP_THOUSANDS, "maybe"),
            (KEY_NIGHT_THEME, "dusk-dawn"),
        ]));
        assert_eq!(config, WidgetConfig::default());
    }

    #[test]
    fn test_night_theme_on_uses_default_window() {
        let config = WidgetConfig::from_lookup(lookup_from(&[(KEY_NIGHT_THEME, "on")]));
        assert_eq!(config.night_window, Some(NightWindow::default()));
    }
}
