//! Black & white egui visuals for the desktop widget, one per theme

use egui::{Color32, Stroke};

use crate::core::theme::Theme;

/// Greyscale palette; `dark` on black, `light` on white
pub mod colors {
    use super::Color32;

    pub mod dark {
        use super::Color32;

        pub const BG_PRIMARY: Color32 = Color32::from_rgb(0, 0, 0);           // #000000
        pub const BG_ELEVATED: Color32 = Color32::from_rgb(12, 12, 12);       // #0C0C0C
        pub const BG_HOVER: Color32 = Color32::from_rgb(24, 24, 24);          // #181818
        pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(255, 255, 255);   // #FFFFFF
        pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 160, 160); // #A0A0A0
        pub const TEXT_MUTED: Color32 = Color32::from_rgb(80, 80, 80);        // #505050
        pub const BORDER: Color32 = Color32::from_rgb(40, 40, 40);            // #282828
    }

    pub mod light {
        use super::Color32;

        pub const BG_PRIMARY: Color32 = Color32::from_rgb(255, 255, 255);     // #FFFFFF
        pub const BG_ELEVATED: Color32 = Color32::from_rgb(244, 244, 244);    // #F4F4F4
        pub const BG_HOVER: Color32 = Color32::from_rgb(230, 230, 230);       // #E6E6E6
        pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0, 0, 0);         // #000000
        pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(90, 90, 90);    // #5A5A5A
        pub const TEXT_MUTED: Color32 = Color32::from_rgb(170, 170, 170);     // #AAAAAA
        pub const BORDER: Color32 = Color32::from_rgb(215, 215, 215);         // #D7D7D7
    }
}

/// Colors the widget paints with directly
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_elevated: Color32,
    pub bg_hover: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
    pub border: Color32,
}

impl Palette {
    pub fn of(theme: Theme) -> Self {
        match theme {
            Theme::Dark => {
                use colors::dark::*;
                Self {
                    bg_primary: BG_PRIMARY,
                    bg_elevated: BG_ELEVATED,
                    bg_hover: BG_HOVER,
                    text_primary: TEXT_PRIMARY,
                    text_secondary: TEXT_SECONDARY,
                    text_muted: TEXT_MUTED,
                    border: BORDER,
                }
            }
            Theme::Light => {
                use colors::light::*;
                Self {
                    bg_primary: BG_PRIMARY,
                    bg_elevated: BG_ELEVATED,
                    bg_hover: BG_HOVER,
                    text_primary: TEXT_PRIMARY,
                    text_secondary: TEXT_SECONDARY,
                    text_muted: TEXT_MUTED,
                    border: BORDER,
                }
            }
        }
    }
}

/// Minimal flat egui Visuals for `theme`
pub fn minimal_visuals(theme: Theme) -> egui::Visuals {
    let p = Palette::of(theme);

    let mut visuals = match theme {
        Theme::Dark => egui::Visuals::dark(),
        Theme::Light => egui::Visuals::light(),
    };

    visuals.panel_fill = p.bg_primary;
    visuals.window_fill = p.bg_primary;
    visuals.extreme_bg_color = p.bg_primary;
    visuals.faint_bg_color = p.bg_elevated;
    visuals.override_text_color = Some(p.text_primary);

    visuals.widgets.noninteractive.bg_fill = p.bg_primary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, p.text_muted);
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, p.border);

    visuals.widgets.inactive.bg_fill = p.bg_primary;
    visuals.widgets.inactive.weak_bg_fill = p.bg_primary;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, p.text_secondary);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, p.border);

    visuals.widgets.hovered.bg_fill = p.bg_elevated;
    visuals.widgets.hovered.weak_bg_fill = p.bg_elevated;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, p.text_primary);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, p.text_muted);

    visuals.widgets.active.bg_fill = p.bg_hover;
    visuals.widgets.active.weak_bg_fill = p.bg_hover;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, p.text_primary);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, p.text_secondary);

    visuals.selection.bg_fill = p.bg_hover;
    visuals.selection.stroke = Stroke::new(1.0, p.text_primary);
    visuals.hyperlink_color = p.text_primary;

    // Flat design
    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}
