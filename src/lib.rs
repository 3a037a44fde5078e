//! How Long Today? - seconds elapsed in the current day
//!
//! A small widget showing how much of today has passed, locally or in a
//! selected timezone, as a live counter and progress indicators:
//! - `core`: pure time math, localization, theme and settings
//! - `web`: DOM adapter for the browser build (`--features web`, wasm32)
//! - `app`: native egui window (`--features desktop`)

pub mod core;
pub mod time;

#[cfg(feature = "desktop")]
pub mod app;
#[cfg(feature = "desktop")]
pub mod theme;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod web;

#[cfg(test)]
mod test_utils;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
use wasm_bindgen::prelude::*;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();

    web::start()
}
