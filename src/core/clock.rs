//! Time controller: elapsed-time computation bound to a refresh loop
//!
//! Produces a [`DisplayFrame`] per tick. Adapters only copy frame fields
//! into their display elements.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use super::config::WidgetConfig;
use super::elapsed::{equivalents, ElapsedTimeSnapshot};
use super::format::{
    format_date, format_duration, format_percentage, format_seconds, format_time,
    format_utc_offset,
};
use super::i18n::Localizer;
use super::refresh::{RefreshLoop, Scheduler};
use super::settings::Preferences;
use super::timezone::{catalog_entry, TimezoneResolver, Zone};
use crate::time::Clock;

/// Formatting knobs of the seconds counter and percentage
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayOptions {
    pub seconds_decimals: usize,
    pub group_thousands: bool,
    pub percentage_decimals: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            seconds_decimals: 2,
            group_thousands: true,
            percentage_decimals: 1,
        }
    }
}

impl From<&WidgetConfig> for DisplayOptions {
    fn from(config: &WidgetConfig) -> Self {
        Self {
            seconds_decimals: config.seconds_decimals,
            group_thousands: config.group_thousands,
            ..Self::default()
        }
    }
}

/// Everything a display needs for one tick
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayFrame {
    pub snapshot: ElapsedTimeSnapshot,
    pub seconds_text: String,
    /// Clamped to `[0, 100]`
    pub percentage: f64,
    pub percentage_text: String,
    /// Clamped to `[0, 1]`
    pub progress_fraction: f64,
    pub date_text: String,
    pub time_text: String,
    pub timezone_text: String,
    pub remaining_text: String,
    /// (localization key, count) per reference duration
    pub equivalents: Vec<(&'static str, u64)>,
}

/// Computes and paces the elapsed-time display
pub struct TimeController<S: Scheduler> {
    resolver: Rc<TimezoneResolver>,
    clock: Rc<dyn Clock>,
    localizer: Rc<RefCell<Localizer>>,
    prefs: Preferences,
    refresh: RefreshLoop<S>,
    /// Selection id as chosen (may be unresolvable)
    selection: String,
    /// Cached resolution of `selection`, `Local` on failure
    zone: Zone,
    options: DisplayOptions,
}

impl<S: Scheduler> TimeController<S> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        resolver: Rc<TimezoneResolver>,
        clock: Rc<dyn Clock>,
        localizer: Rc<RefCell<Localizer>>,
        prefs: Preferences,
        scheduler: S,
        timezone: &str,
        refresh_rate_ms: u32,
        options: DisplayOptions,
    ) -> Self {
        let zone = resolver.resolve_or_local(timezone);
        Self {
            resolver,
            clock,
            localizer,
            prefs,
            refresh: RefreshLoop::new(scheduler, refresh_rate_ms),
            selection: timezone.to_string(),
            zone,
            options,
        }
    }

    /// Current timezone selection id
    pub fn timezone(&self) -> &str {
        &self.selection
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn refresh_rate_ms(&self) -> u32 {
        self.refresh.rate_ms()
    }

    pub fn is_running(&self) -> bool {
        self.refresh.is_running()
    }

    pub fn scheduler(&self) -> &S {
        self.refresh.scheduler()
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.refresh.scheduler_mut()
    }

    /// Elapsed time of day now, in the selected zone
    pub fn compute_elapsed(&self) -> ElapsedTimeSnapshot {
        self.resolver.elapsed_in_zone(&self.zone, self.clock.now())
    }

    /// Select a timezone; takes effect on the next tick, the loop keeps running
    pub fn set_timezone(&mut self, id: &str) {
        self.zone = self.resolver.resolve_or_local(id);
        self.selection = id.to_string();
        self.prefs.set_timezone(id);
        debug!(timezone = id, zone = ?self.zone, "Timezone selected");
    }

    pub fn start_loop(&mut self) {
        self.refresh.start();
    }

    pub fn stop_loop(&mut self) {
        self.refresh.stop();
    }

    /// Change cadence (persisted) and restart at the new rate
    pub fn restart_loop(&mut self, rate_ms: u32) {
        self.preview_rate(rate_ms);
        self.prefs.set_refresh_rate_ms(self.refresh.rate_ms());
    }

    /// Restart at a new rate without persisting it, for controls still
    /// being adjusted
    pub fn preview_rate(&mut self, rate_ms: u32) {
        self.refresh.restart(rate_ms);
    }

    /// The pending tick elapsed: `Some(frame)` to render, `None` if stopped
    pub fn on_timer(&mut self) -> Option<DisplayFrame> {
        if !self.refresh.fire() {
            return None;
        }
        let frame = self.frame();
        trace!(seconds = %frame.seconds_text, "Tick");
        Some(frame)
    }

    /// Display values for the current instant
    pub fn frame(&self) -> DisplayFrame {
        self.frame_at(self.clock.now())
    }

    fn frame_at(&self, now: DateTime<Utc>) -> DisplayFrame {
        let snapshot = self.resolver.elapsed_in_zone(&self.zone, now);
        let wall = self.resolver.wall_clock(&self.zone, now);
        let percentage = snapshot.display_percentage();

        let localizer = self.localizer.borrow();
        let timezone_text = match self.zone {
            Zone::Local => format!(
                "{} ({})",
                localizer.translate("timezone.local"),
                format_utc_offset(wall.offset_minutes)
            ),
            Zone::Named(_) => {
                let name = catalog_entry(&self.selection)
                    .map(|entry| localizer.translate(entry.display_key))
                    .unwrap_or(self.selection.as_str());
                format!("{} ({})", name, wall.abbreviation)
            }
        };

        DisplayFrame {
            seconds_text: format_seconds(
                snapshot.elapsed_seconds,
                self.options.seconds_decimals,
                self.options.group_thousands,
            ),
            percentage,
            percentage_text: format_percentage(percentage, self.options.percentage_decimals),
            progress_fraction: snapshot.progress_fraction(),
            date_text: format_date(wall.date),
            time_text: format_time(wall.time),
            timezone_text,
            remaining_text: format_duration(snapshot.remaining_ms),
            equivalents: equivalents(snapshot.elapsed_seconds)
                .into_iter()
                .map(|(r, n)| (r.key, n))
                .collect(),
            snapshot,
        }
    }
}
