//! Desktop widget
//!
//! The same [`Widget`] as the web build, rendered in an egui window. Ticks
//! come from a [`FrameScheduler`] polled once per frame; egui is asked to
//! repaint exactly when the next tick is due.

mod dial;
mod header;
pub mod host;
mod settings;
pub mod storage;

use std::rc::Rc;

use eframe::egui;
use tracing::{debug, info};

use crate::core::clock::DisplayFrame;
use crate::core::config::WidgetConfig;
use crate::core::refresh::FrameScheduler;
use crate::core::settings::SharedStore;
use crate::core::theme::Theme;
use crate::core::timezone::TimezoneResolver;
use crate::core::widget::Widget;
use crate::theme::{minimal_visuals, Palette};
use crate::time::{now_seconds, SystemClock};

use host::DesktopHost;

/// Seconds between time-of-day theme checks
const NIGHT_CHECK_INTERVAL: f64 = 60.0;

pub struct ClockApp {
    pub(crate) widget: Widget<FrameScheduler>,
    /// Last rendered tick
    pub(crate) frame: DisplayFrame,
    pub(crate) palette: Palette,
    /// Theme currently pushed into egui
    applied_theme: Option<Theme>,
    /// Last color scheme reported by the window system
    system_dark: Option<bool>,
    last_night_check: f64,
    pub(crate) show_settings: bool,
}

fn system_prefers_dark(ctx: &egui::Context) -> Option<bool> {
    ctx.input(|i| i.raw.system_theme)
        .map(|theme| theme == egui::Theme::Dark)
}

impl ClockApp {
    pub fn new(cc: &eframe::CreationContext<'_>, store: SharedStore, config: &WidgetConfig) -> Self {
        let ctx = &cc.egui_ctx;
        ctx.set_visuals_of(egui::Theme::Dark, minimal_visuals(Theme::Dark));
        ctx.set_visuals_of(egui::Theme::Light, minimal_visuals(Theme::Light));

        let system_dark = system_prefers_dark(ctx);
        let host = DesktopHost::new(system_dark.unwrap_or(false));

        let mut scheduler = FrameScheduler::new();
        scheduler.set_now(now_seconds());

        let mut widget = Widget::new(
            store,
            &host,
            Rc::new(SystemClock),
            TimezoneResolver::new(),
            scheduler,
            config,
        );
        widget.time.start_loop();

        let title = widget.localizer.borrow().document_state().title;
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));

        let frame = widget.frame();
        let theme = widget.theme.current();
        info!(settings = ?widget.settings(), "Desktop widget running");

        Self {
            widget,
            frame,
            palette: Palette::of(theme),
            applied_theme: None,
            system_dark,
            last_night_check: f64::NEG_INFINITY,
            show_settings: false,
        }
    }

    /// Re-render immediately after a settings change
    pub(crate) fn refresh_frame(&mut self) {
        self.frame = self.widget.frame();
    }

    fn poll_tick(&mut self, now: f64) {
        let scheduler = self.widget.time.scheduler_mut();
        scheduler.set_now(now);
        if scheduler.is_due() {
            if let Some(frame) = self.widget.time.on_timer() {
                self.frame = frame;
            }
        }
    }

    fn poll_theme(&mut self, ctx: &egui::Context, now: f64) {
        let system_dark = system_prefers_dark(ctx);
        if system_dark != self.system_dark {
            if let Some(dark) = system_dark {
                debug!(dark, "System color scheme changed");
                self.widget.theme.on_system_preference_change(dark);
            }
            self.system_dark = system_dark;
        }

        if now - self.last_night_check >= NIGHT_CHECK_INTERVAL {
            self.last_night_check = now;
            self.widget.night_check();
        }

        let current = self.widget.theme.current();
        if self.applied_theme != Some(current) {
            ctx.set_theme(match current {
                Theme::Dark => egui::Theme::Dark,
                Theme::Light => egui::Theme::Light,
            });
            self.palette = Palette::of(current);
            self.applied_theme = Some(current);
        }
    }
}

impl eframe::App for ClockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = now_seconds();
        self.poll_tick(now);
        self.poll_theme(ctx, now);

        self.render_header(ctx);
        if self.show_settings {
            self.render_settings(ctx);
        }
        self.render_dial(ctx);

        if let Some(wait) = self.widget.time.scheduler().time_until_due() {
            ctx.request_repaint_after(wait);
        }
    }
}
