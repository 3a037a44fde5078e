//! Localization tables and the active-language controller
//!
//! Lookups never fail: a key missing from the active table (or an active
//! tag with no table at all) renders as the raw key.

use tracing::{debug, trace};

use super::settings::Preferences;

/// Language used when nothing better is known
pub const DEFAULT_LANGUAGE: &str = "en";
/// Language picked for hosts reporting any `zh*` tag
pub const CHINESE_LANGUAGE: &str = "zh-CN";

/// Page title key
pub const TITLE_KEY: &str = "page.title";

/// A supported locale and its string table
pub struct Locale {
    pub tag: &'static str,
    /// Native name, for language selectors
    pub name: &'static str,
    strings: &'static [(&'static str, &'static str)],
}

impl Locale {
    fn lookup(&self, key: &str) -> Option<&'static str> {
        self.strings.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

pub const SUPPORTED_LANGUAGES: &[Locale] = &[
    Locale { tag: "en", name: "English", strings: EN },
    Locale { tag: "zh-CN", name: "简体中文", strings: ZH_CN },
];

const EN: &[(&str, &str)] = &[
    ("logo", "How Long Today?"),
    ("page.title", "How Long Today? - How many seconds have passed today?"),
    ("seconds.passed", "seconds have passed today"),
    ("current.date", "Date:"),
    ("current.time", "Current Time:"),
    ("remaining.time", "Left Today:"),
    ("timezone.display", "Timezone:"),
    ("refresh.rate", "Refresh Rate:"),
    ("settings.title", "Settings"),
    ("footer.text", "Feel the passage of time | HowLongToday"),
    ("timezone.local", "Local Timezone"),
    ("timezone.utc", "UTC"),
    ("timezone.beijing", "Beijing Time"),
    ("timezone.tokyo", "Tokyo Time"),
    ("timezone.newyork", "New York Time"),
    ("timezone.london", "London Time"),
    ("timezone.paris", "Paris Time"),
    ("timezone.sydney", "Sydney Time"),
    ("timezone.moscow", "Moscow Time"),
    ("timezone.dubai", "Dubai Time"),
    ("timezone.losangeles", "Los Angeles Time"),
    ("aria.language", "Select Language"),
    ("aria.timezone", "Select Timezone"),
    ("aria.theme", "Toggle Theme"),
    ("aria.refresh", "Refresh Rate"),
    ("feels.title", "So far today, that is"),
    ("feels.heartbeat", "heartbeats"),
    ("feels.minute", "minutes"),
    ("feels.song", "pop songs"),
    ("feels.pomodoro", "pomodoros"),
    ("feels.match", "football matches"),
    ("feels.movie", "long movies"),
    ("feels.sleep", "nights of sleep"),
    ("feels.day", "whole days"),
];

const ZH_CN: &[(&str, &str)] = &[
    ("logo", "How Long Today?"),
    ("page.title", "How Long Today? - 今天已经过去多少秒？"),
    ("seconds.passed", "今天已经过去的秒数"),
    ("current.date", "日期："),
    ("current.time", "当前时间："),
    ("remaining.time", "今日剩余："),
    ("timezone.display", "时区："),
    ("refresh.rate", "刷新率："),
    ("settings.title", "设置"),
    ("footer.text", "感知时间的流逝 | HowLongToday"),
    ("timezone.local", "本地时区"),
    ("timezone.utc", "协调世界时"),
    ("timezone.beijing", "北京时间"),
    ("timezone.tokyo", "东京时间"),
    ("timezone.newyork", "纽约时间"),
    ("timezone.london", "伦敦时间"),
    ("timezone.paris", "巴黎时间"),
    ("timezone.sydney", "悉尼时间"),
    ("timezone.moscow", "莫斯科时间"),
    ("timezone.dubai", "迪拜时间"),
    ("timezone.losangeles", "洛杉矶时间"),
    ("aria.language", "选择语言"),
    ("aria.timezone", "选择时区"),
    ("aria.theme", "切换主题"),
    ("aria.refresh", "刷新率"),
    ("feels.title", "今天到目前为止，相当于"),
    ("feels.heartbeat", "次心跳"),
    ("feels.minute", "分钟"),
    ("feels.song", "首流行歌曲"),
    ("feels.pomodoro", "个番茄钟"),
    ("feels.match", "场足球比赛"),
    ("feels.movie", "部长电影"),
    ("feels.sleep", "个夜晚的睡眠"),
    ("feels.day", "整天"),
];

/// Interactive controls carrying a localized accessibility label
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    LanguageSelector,
    TimezoneSelector,
    ThemeToggle,
    RefreshRate,
}

impl Control {
    pub const ALL: &'static [Control] = &[
        Control::LanguageSelector,
        Control::TimezoneSelector,
        Control::ThemeToggle,
        Control::RefreshRate,
    ];

    /// Localization key of the accessibility label
    pub fn aria_key(self) -> &'static str {
        match self {
            Control::LanguageSelector => "aria.language",
            Control::TimezoneSelector => "aria.timezone",
            Control::ThemeToggle => "aria.theme",
            Control::RefreshRate => "aria.refresh",
        }
    }
}

/// Document-level effects of a language switch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageChange {
    /// Value for the document `lang` attribute
    pub tag: String,
    pub title: String,
    pub aria_labels: Vec<(Control, String)>,
}

/// Pick the startup language: persisted choice, else `zh*` hosts get
/// Chinese, everyone else the default.
pub fn resolve_initial_language(persisted: Option<&str>, host_language: Option<&str>) -> String {
    if let Some(tag) = persisted {
        return tag.to_string();
    }
    match host_language {
        Some(lang) if lang.to_ascii_lowercase().starts_with("zh") => CHINESE_LANGUAGE.to_string(),
        _ => DEFAULT_LANGUAGE.to_string(),
    }
}

/// Active language plus lookups into its table
pub struct Localizer {
    active: String,
    prefs: Preferences,
}

impl Localizer {
    /// Start on `initial` without persisting it
    pub fn new(prefs: Preferences, initial: &str) -> Self {
        debug!(language = initial, "Localizer initialized");
        Self {
            active: initial.to_string(),
            prefs,
        }
    }

    pub fn language(&self) -> &str {
        &self.active
    }

    /// Localized text for `key`, or `key` itself when unmapped
    pub fn translate<'a>(&self, key: &'a str) -> &'a str {
        match self.locale().and_then(|l| l.lookup(key)) {
            Some(text) => text,
            None => {
                trace!(key, language = %self.active, "Missing translation");
                key
            }
        }
    }

    /// Switch language, persist it, and describe what the document must update
    pub fn set_language(&mut self, tag: &str) -> LanguageChange {
        if self.active != tag {
            debug!(from = %self.active, to = tag, "Language changed");
        }
        self.active = tag.to_string();
        self.prefs.set_language(tag);
        self.document_state()
    }

    /// Document-level strings for the active language
    pub fn document_state(&self) -> LanguageChange {
        LanguageChange {
            tag: self.active.clone(),
            title: self.translate(TITLE_KEY).to_string(),
            aria_labels: Control::ALL
                .iter()
                .map(|&c| (c, self.translate(c.aria_key()).to_string()))
                .collect(),
        }
    }

    fn locale(&self) -> Option<&'static Locale> {
        SUPPORTED_LANGUAGES.iter().find(|l| l.tag == self.active)
    }
}
