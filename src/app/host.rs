//! Desktop host services

use tracing::debug;

use crate::core::host::Host;

/// OS timezone and locale; the color scheme comes from the window system
#[derive(Debug, Default)]
pub struct DesktopHost {
    prefers_dark: bool,
}

impl DesktopHost {
    pub fn new(prefers_dark: bool) -> Self {
        Self { prefers_dark }
    }
}

impl Host for DesktopHost {
    fn timezone_id(&self) -> Option<String> {
        iana_time_zone::get_timezone()
            .map_err(|e| debug!(error = %e, "Host timezone unavailable"))
            .ok()
    }

    fn preferred_language(&self) -> Option<String> {
        sys_locale::get_locale()
    }

    fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }
}
