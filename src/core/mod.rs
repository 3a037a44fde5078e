//! Platform-agnostic core: time math, localization, theme and settings
//!
//! Nothing here touches the DOM or a window; host services come in through
//! [`host::Host`], [`settings::SettingsStore`], [`refresh::Scheduler`] and
//! [`crate::time::Clock`].

pub mod clock;
pub mod config;
pub mod elapsed;
pub mod error;
pub mod format;
pub mod host;
pub mod i18n;
pub mod refresh;
pub mod settings;
pub mod theme;
pub mod timezone;
pub mod widget;

pub use clock::{DisplayFrame, DisplayOptions, TimeController};
pub use config::WidgetConfig;
pub use elapsed::ElapsedTimeSnapshot;
pub use error::{Result, WidgetError};
pub use host::Host;
pub use i18n::{Control, LanguageChange, Localizer, SUPPORTED_LANGUAGES};
pub use refresh::{FrameScheduler, RefreshLoop, Scheduler};
pub use settings::{MemoryStore, Preferences, Settings, SettingsStore, SharedStore};
pub use theme::{NightWindow, Theme, ThemeController};
pub use timezone::{TimezoneResolver, Zone, CATALOG, LOCAL_TIMEZONE};
pub use widget::Widget;
