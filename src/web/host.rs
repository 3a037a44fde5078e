//! Browser host services

use wasm_bindgen::JsValue;
use web_sys::{MediaQueryList, Window};

use crate::core::host::Host;

/// Media query tracking the OS color scheme
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

pub struct BrowserHost {
    window: Window,
}

impl BrowserHost {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    pub fn dark_scheme_query(&self) -> Option<MediaQueryList> {
        self.window.match_media(DARK_SCHEME_QUERY).ok().flatten()
    }
}

impl Host for BrowserHost {
    /// `Intl.DateTimeFormat().resolvedOptions().timeZone`
    fn timezone_id(&self) -> Option<String> {
        let format = js_sys::Intl::DateTimeFormat::new(&js_sys::Array::new(), &js_sys::Object::new());
        let options = format.resolved_options();
        js_sys::Reflect::get(&options, &JsValue::from_str("timeZone"))
            .ok()
            .and_then(|v| v.as_string())
    }

    fn preferred_language(&self) -> Option<String> {
        self.window.navigator().language()
    }

    fn prefers_dark(&self) -> bool {
        self.dark_scheme_query().is_some_and(|q| q.matches())
    }
}
