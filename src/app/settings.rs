//! Settings sidebar: refresh rate

use eframe::egui;

use crate::core::i18n::Control;
use crate::core::refresh::{DEFAULT_REFRESH_MS, MAX_REFRESH_MS, MIN_REFRESH_MS};
use super::ClockApp;

impl ClockApp {
    pub(crate) fn render_settings(&mut self, ctx: &egui::Context) {
        let palette = self.palette;
        let title = self.widget.translate("refresh.rate");
        let aria = self.widget.translate(Control::RefreshRate.aria_key());
        let footer = self.widget.translate("footer.text");
        let mut rate = self.widget.time.refresh_rate_ms();
        let mut commit = false;

        egui::SidePanel::right("settings")
            .default_width(ctx.screen_rect().width() * 0.25)
            .min_width(200.0)
            .resizable(true)
            .frame(egui::Frame::new().fill(palette.bg_primary).inner_margin(8.0))
            .show(ctx, |ui| {
                let group_frame = egui::Frame::new()
                    .stroke(egui::Stroke::new(1.0, palette.text_muted.gamma_multiply(0.6)))
                    .corner_radius(4.0)
                    .inner_margin(6.0);

                group_frame.show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(egui::RichText::new(format!("{title}: {rate} ms")).color(palette.text_muted));
                    ui.spacing_mut().slider_width = ui.available_width();
                    let response = ui
                        .add(
                            egui::Slider::new(&mut rate, MIN_REFRESH_MS..=MAX_REFRESH_MS)
                                .logarithmic(true)
                                .clamping(egui::SliderClamping::Always)
                                .show_value(false),
                        )
                        .on_hover_text(aria);
                    // Double-click restores the default cadence
                    if response.double_clicked() {
                        rate = DEFAULT_REFRESH_MS;
                        commit = true;
                    } else if response.drag_stopped() || (response.changed() && !response.dragged()) {
                        commit = true;
                    }
                });

                ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                    ui.label(egui::RichText::new(footer).color(palette.text_muted).small());
                });
            });

        // Restart live while dragging, write settings once on release
        if commit {
            self.widget.set_refresh_rate(rate);
        } else if rate != self.widget.time.refresh_rate_ms() {
            self.widget.preview_refresh_rate(rate);
        }
    }
}
