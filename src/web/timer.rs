//! `setTimeout`-driven scheduler

use std::time::Duration;

use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::core::refresh::Scheduler;

/// Schedules a single stored callback through `window.setTimeout`.
///
/// The callback is installed after construction because it usually needs a
/// handle to the widget that owns this scheduler.
pub struct TimeoutScheduler {
    window: Window,
    callback: Option<Closure<dyn FnMut()>>,
}

impl TimeoutScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: None,
        }
    }

    pub fn set_callback(&mut self, callback: Closure<dyn FnMut()>) {
        self.callback = Some(callback);
    }
}

impl Scheduler for TimeoutScheduler {
    type Handle = i32;

    fn schedule(&mut self, delay: Duration) -> Option<i32> {
        let Some(callback) = self.callback.as_ref() else {
            warn!("Tick scheduled before a callback was installed");
            return None;
        };
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay.as_millis().min(i32::MAX as u128) as i32,
            )
            .map_err(|e| warn!(?e, "setTimeout failed"))
            .ok()
    }

    fn cancel(&mut self, handle: i32) {
        self.window.clear_timeout_with_handle(handle);
    }
}
