//! DOM contract: element ids and attributes the widget reads and writes

use std::f64::consts::PI;

use tracing::trace;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

use crate::core::clock::DisplayFrame;
use crate::core::error::log_soft_failure;
use crate::core::elapsed::stroke_dash_offset;
use crate::core::i18n::{Control, LanguageChange, Localizer};
use crate::core::theme::Theme;

pub const LANGUAGE_SELECTOR: &str = "language-selector";
pub const TIMEZONE_SELECTOR: &str = "timezone-selector";
pub const REFRESH_RATE: &str = "refresh-rate";
pub const REFRESH_RATE_VALUE: &str = "refresh-rate-value";
pub const THEME_TOGGLE: &str = "theme-toggle";
pub const SECONDS_DISPLAY: &str = "seconds-display";
pub const PROGRESS_BAR: &str = "progress-bar";
pub const PROGRESS_RING: &str = "progress-ring-circle";
pub const PROGRESS_PERCENTAGE: &str = "progress-percentage";
pub const CURRENT_DATE: &str = "current-date";
pub const CURRENT_TIME: &str = "current-time";
pub const REMAINING_TIME: &str = "remaining-time";
pub const TIMEZONE_DISPLAY: &str = "timezone-display";

/// Text replaced on language change
pub const I18N_ATTR: &str = "data-i18n";
/// `aria-label` replaced on language change
pub const I18N_ARIA_ATTR: &str = "data-i18n-aria";
/// Elapsed-equivalent slot, value is the reference duration key
pub const FEELS_ATTR: &str = "data-feels";

pub fn by_id<T: JsCast>(doc: &Document, id: &str) -> Option<T> {
    doc.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub fn set_text(doc: &Document, id: &str, text: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// All elements matching `selector`; missing or malformed selectors yield none
pub fn select_all(doc: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = doc.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn control_id(control: Control) -> &'static str {
    match control {
        Control::LanguageSelector => LANGUAGE_SELECTOR,
        Control::TimezoneSelector => TIMEZONE_SELECTOR,
        Control::ThemeToggle => THEME_TOGGLE,
        Control::RefreshRate => REFRESH_RATE,
    }
}

/// Write one tick. Elements absent from the page are skipped.
pub fn render_frame(doc: &Document, frame: &DisplayFrame) {
    set_text(doc, SECONDS_DISPLAY, &frame.seconds_text);
    set_text(doc, PROGRESS_PERCENTAGE, &frame.percentage_text);
    set_text(doc, CURRENT_DATE, &frame.date_text);
    set_text(doc, CURRENT_TIME, &frame.time_text);
    set_text(doc, REMAINING_TIME, &frame.remaining_text);
    set_text(doc, TIMEZONE_DISPLAY, &frame.timezone_text);

    if let Some(bar) = by_id::<HtmlElement>(doc, PROGRESS_BAR) {
        log_soft_failure(
            bar.style()
                .set_property("width", &format!("{:.3}%", frame.percentage)),
            "progress bar width",
        );
    }

    if let Some(circle) = doc.get_element_by_id(PROGRESS_RING) {
        let radius = circle
            .get_attribute("r")
            .and_then(|r| r.parse::<f64>().ok())
            .unwrap_or(0.0);
        let circumference = 2.0 * PI * radius;
        let offset = stroke_dash_offset(circumference, frame.progress_fraction);
        log_soft_failure(
            circle.set_attribute("stroke-dasharray", &format!("{circumference:.3}")),
            "progress ring dasharray",
        );
        log_soft_failure(
            circle.set_attribute("stroke-dashoffset", &format!("{offset:.3}")),
            "progress ring dashoffset",
        );
    }
}

/// Fill the `[data-feels]` slots with how many of each duration fit so far
pub fn render_equivalents(doc: &Document, frame: &DisplayFrame, localizer: &Localizer) {
    for el in select_all(doc, &format!("[{FEELS_ATTR}]")) {
        let Some(key) = el.get_attribute(FEELS_ATTR) else {
            continue;
        };
        if let Some((key, count)) = frame.equivalents.iter().find(|(k, _)| *k == key) {
            el.set_text_content(Some(&format!("{} {}", count, localizer.translate(key))));
        }
    }
}

/// Relabel every tagged element and the document metadata
pub fn apply_language(doc: &Document, localizer: &Localizer, change: &LanguageChange) {
    if let Some(root) = doc.document_element() {
        log_soft_failure(root.set_attribute("lang", &change.tag), "document lang");
    }
    doc.set_title(&change.title);

    let tagged = select_all(doc, &format!("[{I18N_ATTR}]"));
    trace!(count = tagged.len(), "Relabeling localized elements");
    for el in tagged {
        if let Some(key) = el.get_attribute(I18N_ATTR) {
            el.set_text_content(Some(localizer.translate(&key)));
        }
    }
    for el in select_all(doc, &format!("[{I18N_ARIA_ATTR}]")) {
        if let Some(key) = el.get_attribute(I18N_ARIA_ATTR) {
            log_soft_failure(
                el.set_attribute("aria-label", localizer.translate(&key)),
                "tagged aria-label",
            );
        }
    }
    for (control, label) in &change.aria_labels {
        if let Some(el) = doc.get_element_by_id(control_id(*control)) {
            log_soft_failure(el.set_attribute("aria-label", label), "control aria-label");
        }
    }
}

/// Document theme marker, toggle glyph and logo asset
pub fn apply_theme(doc: &Document, theme: Theme) {
    if let Some(root) = doc.document_element() {
        log_soft_failure(root.set_attribute("data-theme", theme.as_str()), "document theme");
    }
    for icon in select_all(doc, ".theme-icon") {
        icon.set_text_content(Some(theme.icon()));
    }
    for logo in select_all(doc, ".logo-icon") {
        if let Ok(img) = logo.dyn_into::<HtmlImageElement>() {
            img.set_src(theme.logo());
        }
    }
}
