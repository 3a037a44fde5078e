//! Platform-agnostic time utilities
//!
//! Wall-clock time comes from a [`Clock`] so that the elapsed-time core can
//! be driven by a fixed instant under test. Monotonic time for the desktop
//! frame scheduler comes from [`now_seconds`]; the browser build schedules
//! with `setTimeout` and needs none.

use chrono::{DateTime, Utc};

/// Source of the current wall-clock instant
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Host wall clock (`Date.now()` on the web via chrono's wasmbind support)
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Monotonic seconds since app start
#[cfg(not(target_arch = "wasm32"))]
pub fn now_seconds() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64()
}
