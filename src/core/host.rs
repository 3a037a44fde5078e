//! Read-only host environment services

/// What the widget asks of the environment it runs in. Values are trusted
/// as reported; absence just means "no hint".
pub trait Host {
    /// IANA id of the host timezone, if the host reports one
    fn timezone_id(&self) -> Option<String>;
    /// Preferred UI language tag, e.g. `en-US` or `zh-CN`
    fn preferred_language(&self) -> Option<String>;
    /// Whether the host color scheme is dark
    fn prefers_dark(&self) -> bool;
}
