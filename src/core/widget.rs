//! Composition root
//!
//! [`Widget`] wires preferences, localization, theme and time controllers
//! together over injected host services. Adapters own one and forward UI
//! events to it.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Timelike;
use tracing::info;

use super::clock::{DisplayFrame, DisplayOptions, TimeController};
use super::config::WidgetConfig;
use super::host::Host;
use super::i18n::{LanguageChange, Localizer};
use super::refresh::Scheduler;
use super::settings::{Preferences, Settings, SharedStore};
use super::theme::{Theme, ThemeController};
use super::timezone::{TimezoneResolver, Zone, CATALOG};
use crate::time::Clock;

pub struct Widget<S: Scheduler> {
    pub prefs: Preferences,
    pub localizer: Rc<RefCell<Localizer>>,
    pub timezones: Rc<TimezoneResolver>,
    pub theme: ThemeController,
    pub time: TimeController<S>,
    clock: Rc<dyn Clock>,
}

impl<S: Scheduler> Widget<S> {
    pub fn new(
        store: SharedStore,
        host: &dyn Host,
        clock: Rc<dyn Clock>,
        timezones: TimezoneResolver,
        scheduler: S,
        config: &WidgetConfig,
    ) -> Self {
        let prefs = Preferences::new(store);
        let settings = Settings::load(&prefs, host, config);
        info!(?settings, "Widget starting");

        let localizer = Rc::new(RefCell::new(Localizer::new(
            prefs.clone(),
            &settings.language,
        )));
        let timezones = Rc::new(timezones);
        let theme = ThemeController::new(prefs.clone(), host.prefers_dark(), config.night_window);
        let time = TimeController::new(
            timezones.clone(),
            clock.clone(),
            localizer.clone(),
            prefs.clone(),
            scheduler,
            &settings.timezone,
            settings.refresh_rate_ms,
            DisplayOptions::from(config),
        );

        Self {
            prefs,
            localizer,
            timezones,
            theme,
            time,
            clock,
        }
    }

    /// Settings currently in effect
    pub fn settings(&self) -> Settings {
        Settings {
            language: self.localizer.borrow().language().to_string(),
            timezone: self.time.timezone().to_string(),
            theme: self.prefs.theme().as_deref().and_then(Theme::parse),
            refresh_rate_ms: self.time.refresh_rate_ms(),
        }
    }

    pub fn set_language(&mut self, tag: &str) -> LanguageChange {
        self.localizer.borrow_mut().set_language(tag)
    }

    pub fn set_timezone(&mut self, id: &str) {
        self.time.set_timezone(id);
    }

    pub fn set_refresh_rate(&mut self, rate_ms: u32) {
        self.time.restart_loop(rate_ms);
    }

    /// Apply a rate while its control is still moving; persisted by
    /// [`Self::set_refresh_rate`] once the user lets go
    pub fn preview_refresh_rate(&mut self, rate_ms: u32) {
        self.time.preview_rate(rate_ms);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle_theme()
    }

    pub fn translate(&self, key: &str) -> String {
        self.localizer.borrow().translate(key).to_string()
    }

    /// `(id, localized label)` per selector option, in catalog order
    pub fn timezone_options(&self) -> Vec<(&'static str, String)> {
        let localizer = self.localizer.borrow();
        CATALOG
            .iter()
            .map(|entry| (entry.id, localizer.translate(entry.display_key).to_string()))
            .collect()
    }

    /// Time-of-day theme check against the host clock's hour
    pub fn night_check(&mut self) -> Option<Theme> {
        let hour = self
            .timezones
            .wall_clock(&Zone::Local, self.clock.now())
            .time
            .hour();
        self.theme.time_of_day_check(hour)
    }

    pub fn frame(&self) -> DisplayFrame {
        self.time.frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::MemoryStore;
    use crate::core::theme::NightWindow;
    use crate::test_utils::{utc, FixedClock, ManualScheduler, StaticHost};

    fn build(store: SharedStore, host: &StaticHost, config: &WidgetConfig) -> Widget<ManualScheduler> {
        let clock = FixedClock::at(utc(2024, 5, 20, 6, 30, 0));
        Widget::new(
            store,
            host,
            clock,
            TimezoneResolver::with_host_zone(chrono_tz::Asia::Shanghai),
            ManualScheduler::default(),
            config,
        )
    }

    fn store() -> SharedStore {
        Rc::new(RefCell::new(MemoryStore::new()))
    }

    #[test]
    fn test_settings_survive_a_restart() {
        let store = store();
        let host = StaticHost::default();
        let config = WidgetConfig::default();

        let mut widget = build(store.clone(), &host, &config);
        widget.set_language("zh-CN");
        widget.set_timezone("Europe/Paris");
        widget.set_refresh_rate(250);
        widget.toggle_theme();
        let before = widget.settings();
        assert_eq!(before.theme, Some(Theme::Dark));

        let rebuilt = build(store, &host, &config);
        assert_eq!(rebuilt.settings(), before);
        assert_eq!(rebuilt.theme.current(), Theme::Dark);
        assert_eq!(rebuilt.frame().timezone_text, "巴黎时间 (CEST)");
    }

    #[test]
    fn test_refresh_rate_persists_only_when_committed() {
        let store = store();
        let host = StaticHost::default();
        let config = WidgetConfig::default();

        let mut widget = build(store.clone(), &host, &config);
        widget.preview_refresh_rate(500);
        assert_eq!(widget.settings().refresh_rate_ms, 500);
        assert_eq!(build(store.clone(), &host, &config).settings().refresh_rate_ms, config.refresh_rate_ms);

        widget.set_refresh_rate(500);
        assert_eq!(build(store, &host, &config).settings().refresh_rate_ms, 500);
    }

    #[test]
    fn test_first_run_follows_host() {
        let host = StaticHost {
            timezone: Some("Asia/Tokyo".into()),
            language: Some("zh-HK".into()),
            prefers_dark: true,
        };
        let widget = build(store(), &host, &WidgetConfig::default());
        let settings = widget.settings();
        assert_eq!(settings.language, "zh-CN");
        assert_eq!(settings.timezone, "Asia/Tokyo");
        assert_eq!(settings.theme, None);
        assert_eq!(widget.theme.current(), Theme::Dark);
        // Host detection is not a user choice
        assert_eq!(widget.prefs.timezone(), None);
    }

    #[test]
    fn test_timezone_options_are_localized() {
        let mut widget = build(store(), &StaticHost::default(), &WidgetConfig::default());
        let options = widget.timezone_options();
        assert_eq!(options.len(), CATALOG.len());
        assert_eq!(options[0], ("local", "Local Timezone".to_string()));

        widget.set_language("zh-CN");
        assert_eq!(widget.timezone_options()[2], ("Asia/Shanghai", "北京时间".to_string()));
    }

    #[test]
    fn test_night_check_uses_host_hour() {
        let config = WidgetConfig {
            night_window: Some(NightWindow::default()),
            ..WidgetConfig::default()
        };
        // 14:30 in the host zone
        let mut widget = build(store(), &StaticHost::default(), &config);
        assert_eq!(widget.night_check(), None);
        assert_eq!(widget.theme.current(), Theme::Light);
    }
}
