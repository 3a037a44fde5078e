//! Browser adapter
//!
//! Binds a [`Widget`] to the page's DOM contract. All state lives in one
//! `Rc<RefCell<WebApp>>`; event listeners hold strong clones and are leaked
//! for the lifetime of the page, the tick callback holds a weak one.

mod dom;
mod host;
mod storage;
mod timer;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlInputElement, HtmlOptionElement, HtmlSelectElement, MediaQueryListEvent, Window};

use crate::core::config::WidgetConfig;
use crate::core::i18n::SUPPORTED_LANGUAGES;
use crate::core::settings::SharedStore;
use crate::core::timezone::{TimezoneResolver, CATALOG};
use crate::core::widget::Widget;
use crate::time::SystemClock;

use host::BrowserHost;
use storage::LocalStorage;
use timer::TimeoutScheduler;

/// Interval of the time-of-day theme check
const NIGHT_CHECK_MS: i32 = 60_000;

struct WebApp {
    widget: Widget<TimeoutScheduler>,
    document: Document,
    /// Last rendered equivalents, to skip redundant DOM writes
    last_equivalents: Vec<(&'static str, u64)>,
}

impl WebApp {
    fn on_timer(&mut self) {
        let Some(frame) = self.widget.time.on_timer() else {
            return;
        };
        dom::render_frame(&self.document, &frame);
        if frame.equivalents != self.last_equivalents {
            dom::render_equivalents(&self.document, &frame, &self.widget.localizer.borrow());
            self.last_equivalents = frame.equivalents;
        }
    }

    fn set_language(&mut self, tag: &str) {
        let change = self.widget.set_language(tag);
        dom::apply_language(&self.document, &self.widget.localizer.borrow(), &change);
        // Equivalent labels and the timezone indicator are localized too
        self.last_equivalents.clear();
        self.render_now();
    }

    fn set_timezone(&mut self, id: &str) {
        self.widget.set_timezone(id);
        self.render_now();
    }

    fn set_refresh_rate(&mut self, rate_ms: u32) {
        self.widget.set_refresh_rate(rate_ms);
        self.render_refresh_rate();
    }

    fn render_now(&mut self) {
        let frame = self.widget.frame();
        dom::render_frame(&self.document, &frame);
        dom::render_equivalents(&self.document, &frame, &self.widget.localizer.borrow());
        self.last_equivalents = frame.equivalents;
    }

    fn render_refresh_rate(&self) {
        let rate = self.widget.time.refresh_rate_ms();
        if let Some(input) = dom::by_id::<HtmlInputElement>(&self.document, dom::REFRESH_RATE) {
            input.set_value(&rate.to_string());
        }
        dom::set_text(&self.document, dom::REFRESH_RATE_VALUE, &format!("{rate} ms"));
    }

    /// Populate selectors and bring the document in line with the settings
    fn init_document(&mut self) -> Result<(), JsValue> {
        let doc = &self.document;
        let settings = self.widget.settings();

        if let Some(select) = dom::by_id::<HtmlSelectElement>(doc, dom::LANGUAGE_SELECTOR) {
            if select.length() == 0 {
                for locale in SUPPORTED_LANGUAGES {
                    let option = HtmlOptionElement::new_with_text_and_value(locale.name, locale.tag)?;
                    select.append_child(&option)?;
                }
            }
            select.set_value(&settings.language);
        }

        if let Some(select) = dom::by_id::<HtmlSelectElement>(doc, dom::TIMEZONE_SELECTOR) {
            select.set_inner_html("");
            let localizer = self.widget.localizer.borrow();
            for entry in CATALOG.iter() {
                let option = HtmlOptionElement::new_with_text_and_value(
                    localizer.translate(entry.display_key),
                    entry.id,
                )?;
                option.set_attribute(dom::I18N_ATTR, entry.display_key)?;
                select.append_child(&option)?;
            }
            select.set_value(&settings.timezone);
        }

        let change = self.widget.localizer.borrow().document_state();
        dom::apply_language(doc, &self.widget.localizer.borrow(), &change);
        dom::apply_theme(doc, self.widget.theme.current());
        self.render_refresh_rate();
        self.render_now();
        Ok(())
    }
}

/// Value of `window.__howlong_<key>`, stringified
fn read_global(key: &str) -> Option<String> {
    let value = js_sys::eval(&format!("window.__howlong_{key}")).ok()?;
    if let Some(s) = value.as_string() {
        Some(s)
    } else if let Some(n) = value.as_f64() {
        Some(n.to_string())
    } else {
        value.as_bool().map(|b| b.to_string())
    }
}

/// Attach `handler` to `event` on the element with `id`, if present
fn listen(
    doc: &Document,
    id: &str,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let Some(el) = doc.get_element_by_id(id) else {
        debug!(id, "Control not on page, not binding");
        return Ok(());
    };
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn target_value(event: &Event) -> Option<String> {
    let target = event.target()?;
    if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
        return Some(select.value());
    }
    target.dyn_ref::<HtmlInputElement>().map(|input| input.value())
}

fn bind_controls(app: &Rc<RefCell<WebApp>>, window: &Window, host: &BrowserHost) -> Result<(), JsValue> {
    let doc = app.borrow().document.clone();

    let a = app.clone();
    listen(&doc, dom::LANGUAGE_SELECTOR, "change", move |e| {
        if let Some(tag) = target_value(&e) {
            a.borrow_mut().set_language(&tag);
        }
    })?;

    let a = app.clone();
    listen(&doc, dom::TIMEZONE_SELECTOR, "change", move |e| {
        if let Some(id) = target_value(&e) {
            a.borrow_mut().set_timezone(&id);
        }
    })?;

    let a = app.clone();
    listen(&doc, dom::REFRESH_RATE, "input", move |e| {
        if let Some(rate) = target_value(&e).and_then(|v| v.parse::<u32>().ok()) {
            a.borrow_mut().set_refresh_rate(rate);
        }
    })?;

    let a = app.clone();
    listen(&doc, dom::THEME_TOGGLE, "click", move |_| {
        let mut app = a.borrow_mut();
        let theme = app.widget.toggle_theme();
        dom::apply_theme(&app.document, theme);
    })?;

    if let Some(query) = host.dark_scheme_query() {
        let a = app.clone();
        let on_change = Closure::wrap(Box::new(move |e: MediaQueryListEvent| {
            let mut app = a.borrow_mut();
            if let Some(theme) = app.widget.theme.on_system_preference_change(e.matches()) {
                dom::apply_theme(&app.document, theme);
            }
        }) as Box<dyn FnMut(MediaQueryListEvent)>);
        query.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
        on_change.forget();
    }

    if app.borrow().widget.theme.night_window().is_some() {
        let a = app.clone();
        let check = Closure::wrap(Box::new(move || {
            let mut app = a.borrow_mut();
            if let Some(theme) = app.widget.night_check() {
                dom::apply_theme(&app.document, theme);
            }
        }) as Box<dyn FnMut()>);
        window.set_interval_with_callback_and_timeout_and_arguments_0(
            check.as_ref().unchecked_ref(),
            NIGHT_CHECK_MS,
        )?;
        check.forget();

        let mut app = app.borrow_mut();
        if let Some(theme) = app.widget.night_check() {
            dom::apply_theme(&app.document, theme);
        }
    }

    Ok(())
}

/// Wire the widget to the current page and start the refresh loop
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().expect("no window");
    let document = window.document().expect("no document");

    let config = WidgetConfig::from_lookup(read_global);
    let host = BrowserHost::new(window.clone());
    let store: SharedStore = Rc::new(RefCell::new(LocalStorage::open(&window)));
    let widget = Widget::new(
        store,
        &host,
        Rc::new(SystemClock),
        TimezoneResolver::new(),
        TimeoutScheduler::new(window.clone()),
        &config,
    );

    let app = Rc::new(RefCell::new(WebApp {
        widget,
        document,
        last_equivalents: Vec::new(),
    }));

    let weak = Rc::downgrade(&app);
    let on_tick = Closure::wrap(Box::new(move || {
        if let Some(app) = weak.upgrade() {
            app.borrow_mut().on_timer();
        }
    }) as Box<dyn FnMut()>);
    app.borrow_mut()
        .widget
        .time
        .scheduler_mut()
        .set_callback(on_tick);

    app.borrow_mut().init_document()?;
    bind_controls(&app, &window, &host)?;
    app.borrow_mut().widget.time.start_loop();

    info!(settings = ?app.borrow().widget.settings(), "Widget running");
    Ok(())
}
