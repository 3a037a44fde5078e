//! Central panel: progress ring, counters and elapsed equivalents

use std::f32::consts::{PI, TAU};

use eframe::egui;

use super::ClockApp;

/// Segments of a full progress arc
const ARC_SEGMENTS: usize = 180;

impl ClockApp {
    pub(crate) fn render_dial(&self, ctx: &egui::Context) {
        let palette = self.palette;
        let frame = &self.frame;
        let t = |key: &str| self.widget.translate(key);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(palette.bg_primary).inner_margin(16.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    let size = ui.available_width().min(ui.available_height() * 0.55).max(120.0);
                    let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
                    let painter = ui.painter_at(rect);
                    let center = rect.center();
                    let radius = size * 0.45;
                    let stroke_width = (size * 0.035).max(2.0);

                    painter.circle_stroke(center, radius, egui::Stroke::new(stroke_width, palette.border));

                    // Clockwise from twelve o'clock
                    let fraction = frame.progress_fraction as f32;
                    let segments = ((ARC_SEGMENTS as f32 * fraction).ceil() as usize).max(1);
                    if fraction > 0.0 {
                        let points: Vec<egui::Pos2> = (0..=segments)
                            .map(|i| {
                                let angle = -PI / 2.0 + TAU * fraction * i as f32 / segments as f32;
                                center + radius * egui::vec2(angle.cos(), angle.sin())
                            })
                            .collect();
                        painter.add(egui::Shape::line(
                            points,
                            egui::Stroke::new(stroke_width, palette.text_primary),
                        ));
                    }

                    painter.text(
                        center - egui::vec2(0.0, size * 0.06),
                        egui::Align2::CENTER_CENTER,
                        &frame.seconds_text,
                        egui::FontId::monospace(size * 0.09),
                        palette.text_primary,
                    );
                    painter.text(
                        center + egui::vec2(0.0, size * 0.06),
                        egui::Align2::CENTER_CENTER,
                        &frame.percentage_text,
                        egui::FontId::proportional(size * 0.06),
                        palette.text_secondary,
                    );

                    ui.add_space(8.0);
                    ui.label(egui::RichText::new(t("seconds.passed")).color(palette.text_secondary));
                    ui.add(
                        egui::ProgressBar::new(fraction)
                            .desired_width(size)
                            .fill(palette.text_primary),
                    );
                    ui.add_space(8.0);

                    egui::Grid::new("readout")
                        .num_columns(2)
                        .spacing([16.0, 4.0])
                        .show(ui, |ui| {
                            let rows = [
                                (t("current.date"), &frame.date_text),
                                (t("current.time"), &frame.time_text),
                                (t("timezone.display"), &frame.timezone_text),
                                (t("remaining.time"), &frame.remaining_text),
                            ];
                            for (label, value) in rows {
                                ui.label(egui::RichText::new(label).color(palette.text_muted));
                                ui.label(egui::RichText::new(value).monospace().color(palette.text_primary));
                                ui.end_row();
                            }
                        });

                    ui.add_space(12.0);
                    ui.label(egui::RichText::new(t("feels.title")).color(palette.text_secondary));
                    egui::Grid::new("equivalents")
                        .num_columns(2)
                        .spacing([16.0, 2.0])
                        .show(ui, |ui| {
                            for (key, count) in &frame.equivalents {
                                ui.label(egui::RichText::new(count.to_string()).monospace().color(palette.text_primary));
                                ui.label(egui::RichText::new(t(*key)).color(palette.text_muted));
                                ui.end_row();
                            }
                        });
                });
            });
    }
}
