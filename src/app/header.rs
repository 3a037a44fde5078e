//! Header bar: title, language and timezone selectors, theme toggle

use eframe::egui;

use crate::core::i18n::{Control, SUPPORTED_LANGUAGES};
use crate::core::timezone::catalog_entry;
use super::ClockApp;

impl ClockApp {
    pub(crate) fn render_header(&mut self, ctx: &egui::Context) {
        let palette = self.palette;
        let t = |key: &str| self.widget.translate(key);
        let logo = t("logo");
        let settings_title = t("settings.title");
        let aria = |c: Control| self.widget.translate(c.aria_key());
        let (aria_language, aria_timezone, aria_theme) = (
            aria(Control::LanguageSelector),
            aria(Control::TimezoneSelector),
            aria(Control::ThemeToggle),
        );

        let mut language = self.widget.settings().language;
        let mut timezone = self.widget.time.timezone().to_string();
        let timezone_options = self.widget.timezone_options();
        let timezone_label = catalog_entry(&timezone)
            .map(|entry| self.widget.translate(entry.display_key))
            .unwrap_or_else(|| timezone.clone());
        let language_label = SUPPORTED_LANGUAGES
            .iter()
            .find(|l| l.tag == language)
            .map_or(language.clone(), |l| l.name.to_string());

        let mut toggle_theme = false;

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::new().fill(palette.bg_primary).inner_margin(8.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(logo)
                            .strong()
                            .color(palette.text_primary),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let icon = self.widget.theme.current().icon();
                        if ui.button(icon).on_hover_text(aria_theme).clicked() {
                            toggle_theme = true;
                        }

                        let settings_text = if self.show_settings {
                            format!("{settings_title} >>>")
                        } else {
                            format!("{settings_title} <<<")
                        };
                        if ui
                            .button(egui::RichText::new(settings_text).color(palette.text_secondary))
                            .clicked()
                        {
                            self.show_settings = !self.show_settings;
                        }

                        egui::ComboBox::from_id_salt("timezone-selector")
                            .selected_text(timezone_label)
                            .show_ui(ui, |ui| {
                                for (id, label) in &timezone_options {
                                    ui.selectable_value(&mut timezone, id.to_string(), label.as_str());
                                }
                            })
                            .response
                            .on_hover_text(aria_timezone);

                        egui::ComboBox::from_id_salt("language-selector")
                            .selected_text(language_label)
                            .show_ui(ui, |ui| {
                                for locale in SUPPORTED_LANGUAGES {
                                    ui.selectable_value(&mut language, locale.tag.to_string(), locale.name);
                                }
                            })
                            .response
                            .on_hover_text(aria_language);
                    });
                });
            });

        if toggle_theme {
            self.widget.toggle_theme();
        }
        if language != self.widget.settings().language {
            let change = self.widget.set_language(&language);
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(change.title));
            self.refresh_frame();
        }
        if timezone != self.widget.time.timezone() {
            self.widget.set_timezone(&timezone);
            self.refresh_frame();
        }
    }
}
