//! Light/dark theme controller
//!
//! Only explicit user actions are persisted. Ambient inputs (the host color
//! scheme, the optional night window) are adopted while no explicit choice
//! is stored, and never written back, so they cannot turn into overrides.

use std::fmt;

use tracing::{debug, info};

use super::settings::Preferences;

/// Binary visual theme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a stored value. `auto` and anything unknown mean "no choice".
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Glyph of the toggle button: what clicking it switches to
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }

    /// Logo asset with enough contrast against this theme
    pub fn logo(self) -> &'static str {
        match self {
            Theme::Light => "hlt_brand_kit/hlt_icon_dark_64.png",
            Theme::Dark => "hlt_brand_kit/hlt_icon_light_64.png",
        }
    }

    fn from_dark(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hours during which the time-of-day check picks the dark theme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NightWindow {
    /// First dark hour, inclusive
    pub start_hour: u32,
    /// First light hour, exclusive end of the window
    pub end_hour: u32,
}

impl Default for NightWindow {
    fn default() -> Self {
        Self {
            start_hour: 20,
            end_hour: 6,
        }
    }
}

impl NightWindow {
    /// Parse `START-END`, e.g. `20-6`
    pub fn parse(value: &str) -> Option<Self> {
        let (start, end) = value.split_once('-')?;
        let start_hour: u32 = start.trim().parse().ok()?;
        let end_hour: u32 = end.trim().parse().ok()?;
        (start_hour < 24 && end_hour < 24).then_some(Self { start_hour, end_hour })
    }

    /// Whether `hour` (0..24) falls inside the window, which may wrap midnight
    pub fn contains(&self, hour: u32) -> bool {
        if self.start_hour <= self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

/// Owns the current theme and decides when ambient signals may change it
pub struct ThemeController {
    current: Theme,
    prefs: Preferences,
    night_window: Option<NightWindow>,
}

impl ThemeController {
    /// Stored explicit choice, else the host color scheme
    pub fn new(prefs: Preferences, host_prefers_dark: bool, night_window: Option<NightWindow>) -> Self {
        let current = prefs
            .theme()
            .as_deref()
            .and_then(Theme::parse)
            .unwrap_or(Theme::from_dark(host_prefers_dark));
        info!(theme = %current, "Theme initialized");
        Self {
            current,
            prefs,
            night_window,
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Whether the time-of-day check is configured
    pub fn night_window(&self) -> Option<NightWindow> {
        self.night_window
    }

    /// Apply and persist an explicit choice
    pub fn apply_theme(&mut self, theme: Theme) -> Theme {
        debug!(from = %self.current, to = %theme, "Theme applied");
        self.current = theme;
        self.prefs.set_theme(theme);
        theme
    }

    /// Flip between light and dark
    pub fn toggle_theme(&mut self) -> Theme {
        self.apply_theme(self.current.toggled())
    }

    /// Host color scheme changed; adopt it unless the user chose explicitly
    pub fn on_system_preference_change(&mut self, prefers_dark: bool) -> Option<Theme> {
        if self.has_override() {
            debug!(prefers_dark, "Ignoring system theme change, user override stored");
            return None;
        }
        self.adopt(Theme::from_dark(prefers_dark))
    }

    /// Periodic check against the night window, given the current local hour
    pub fn time_of_day_check(&mut self, hour: u32) -> Option<Theme> {
        let window = self.night_window?;
        if self.has_override() {
            return None;
        }
        self.adopt(Theme::from_dark(window.contains(hour)))
    }

    fn has_override(&self) -> bool {
        self.prefs.theme().as_deref().and_then(Theme::parse).is_some()
    }

    /// Switch without persisting; `Some` only if the theme actually changed
    fn adopt(&mut self, theme: Theme) -> Option<Theme> {
        if theme == self.current {
            return None;
        }
        debug!(from = %self.current, to = %theme, "Theme adopted from host");
        self.current = theme;
        Some(theme)
    }
}
