//! Timezone catalog and zone-aware day arithmetic
//!
//! Offsets are always derived from the timezone database for the instant in
//! question; the nominal offsets in [`CATALOG`] are display hints only and
//! are wrong for half the year in zones with daylight saving time.

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use super::elapsed::ElapsedTimeSnapshot;
use super::error::{Result, WidgetError};

/// Selection id meaning "whatever the host clock uses"
pub const LOCAL_TIMEZONE: &str = "local";

/// One selectable timezone
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimezoneEntry {
    /// IANA id, or [`LOCAL_TIMEZONE`]
    pub id: &'static str,
    /// Localization key of the display name
    pub display_key: &'static str,
    /// Nominal standard offset; `None` for the host zone
    pub utc_offset_hours: Option<f32>,
}

/// Fixed selector catalog; the host zone always comes first
pub const CATALOG: [TimezoneEntry; 11] = [
    TimezoneEntry { id: LOCAL_TIMEZONE, display_key: "timezone.local", utc_offset_hours: None },
    TimezoneEntry { id: "UTC", display_key: "timezone.utc", utc_offset_hours: Some(0.0) },
    TimezoneEntry { id: "Asia/Shanghai", display_key: "timezone.beijing", utc_offset_hours: Some(8.0) },
    TimezoneEntry { id: "Asia/Tokyo", display_key: "timezone.tokyo", utc_offset_hours: Some(9.0) },
    TimezoneEntry { id: "America/New_York", display_key: "timezone.newyork", utc_offset_hours: Some(-5.0) },
    TimezoneEntry { id: "Europe/London", display_key: "timezone.london", utc_offset_hours: Some(0.0) },
    TimezoneEntry { id: "Europe/Paris", display_key: "timezone.paris", utc_offset_hours: Some(1.0) },
    TimezoneEntry { id: "Australia/Sydney", display_key: "timezone.sydney", utc_offset_hours: Some(10.0) },
    TimezoneEntry { id: "Europe/Moscow", display_key: "timezone.moscow", utc_offset_hours: Some(3.0) },
    TimezoneEntry { id: "Asia/Dubai", display_key: "timezone.dubai", utc_offset_hours: Some(4.0) },
    TimezoneEntry { id: "America/Los_Angeles", display_key: "timezone.losangeles", utc_offset_hours: Some(-8.0) },
];

/// Catalog entry for an id
pub fn catalog_entry(id: &str) -> Option<&'static TimezoneEntry> {
    CATALOG.iter().find(|tz| tz.id == id)
}

/// Best-effort match of the host's IANA id against the catalog, `"local"`
/// when it is not one of ours.
pub fn detect_host_timezone(host_id: &str) -> &'static str {
    match CATALOG.iter().skip(1).find(|tz| tz.id == host_id) {
        Some(entry) => {
            debug!(host_id, "Host timezone matched catalog");
            entry.id
        }
        None => {
            debug!(host_id, "Host timezone not in catalog, staying local");
            LOCAL_TIMEZONE
        }
    }
}

/// A resolved timezone selection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    Local,
    Named(Tz),
}

/// What "local" means to a resolver
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HostZone {
    /// The host clock's own rules (`chrono::Local`)
    #[default]
    System,
    /// A fixed zone standing in for the host
    Fixed(Tz),
}

/// Wall-clock reading of an instant in a zone
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallClock {
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// East-positive offset from UTC in minutes
    pub offset_minutes: i32,
    /// Zone abbreviation (`JST`, `CEST`), or the numeric offset when the
    /// zone has none
    pub abbreviation: String,
}

// Run `$body` with `$tz` bound to the concrete `TimeZone` behind a `Zone`
macro_rules! with_zone {
    ($self:expr, $zone:expr, |$tz:ident| $body:expr) => {{
        match ($zone, &$self.host) {
            (Zone::Named(named), _) => {
                let $tz = named;
                $body
            }
            (Zone::Local, HostZone::Fixed(fixed)) => {
                let $tz = fixed;
                $body
            }
            (Zone::Local, HostZone::System) => {
                let $tz = &Local;
                $body
            }
        }
    }};
}

/// Resolves timezone selections to midnights, offsets and wall clocks
#[derive(Clone, Debug, Default)]
pub struct TimezoneResolver {
    host: HostZone,
}

impl TimezoneResolver {
    /// Resolver whose "local" is the host clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver whose "local" is `tz`
    pub fn with_host_zone(tz: Tz) -> Self {
        Self {
            host: HostZone::Fixed(tz),
        }
    }

    /// Resolve a selection id. Any IANA id is accepted, catalog or not.
    pub fn resolve(&self, id: &str) -> Result<Zone> {
        if id.is_empty() || id == LOCAL_TIMEZONE {
            return Ok(Zone::Local);
        }
        id.parse::<Tz>()
            .map(Zone::Named)
            .map_err(|_| WidgetError::UnknownTimezone(id.to_string()))
    }

    /// Resolve a selection id, falling back to local with a warning
    pub fn resolve_or_local(&self, id: &str) -> Zone {
        self.resolve(id).unwrap_or_else(|e| {
            warn!(timezone = id, error = %e, "Falling back to local timezone");
            Zone::Local
        })
    }

    /// Current offset of a zone from UTC in minutes, east-positive
    pub fn resolve_offset_minutes(&self, id: &str, now: DateTime<Utc>) -> i32 {
        let zone = self.resolve_or_local(id);
        self.wall_clock(&zone, now).offset_minutes
    }

    /// Instant of 00:00 on the zone's current calendar date
    pub fn start_of_day(&self, id: &str, now: DateTime<Utc>) -> DateTime<Utc> {
        let zone = self.resolve_or_local(id);
        with_zone!(self, &zone, |tz| {
            let date = now.with_timezone(tz).date_naive();
            start_of_day_in(tz, date).with_timezone(&Utc)
        })
    }

    /// Elapsed time of day at `now` for a selection id
    pub fn compute_elapsed(&self, now: DateTime<Utc>, id: &str) -> ElapsedTimeSnapshot {
        let zone = self.resolve_or_local(id);
        self.elapsed_in_zone(&zone, now)
    }

    /// Elapsed time of day at `now` in an already resolved zone
    pub fn elapsed_in_zone(&self, zone: &Zone, now: DateTime<Utc>) -> ElapsedTimeSnapshot {
        with_zone!(self, zone, |tz| elapsed_in(tz, now))
    }

    /// Wall-clock reading of `now` in a resolved zone
    pub fn wall_clock(&self, zone: &Zone, now: DateTime<Utc>) -> WallClock {
        with_zone!(self, zone, |tz| wall_clock_in(tz, now))
    }

    /// Catalog match for the host's IANA id; unmatched or unknown hosts stay
    /// on `"local"`.
    pub fn detect_host_timezone(&self, host_id: Option<&str>) -> &'static str {
        host_id.map_or(LOCAL_TIMEZONE, detect_host_timezone)
    }
}

/// Midnight of `date` in `tz`. A midnight skipped by a DST gap resolves to
/// the first valid wall-clock time after it; an ambiguous one to the
/// earliest instant.
fn start_of_day_in<T: TimeZone>(tz: &T, date: NaiveDate) -> DateTime<T> {
    const GAP_STEP_MINUTES: i64 = 15;
    const GAP_MAX_STEPS: i64 = 4 * 60 / GAP_STEP_MINUTES;

    let midnight = date.and_time(NaiveTime::MIN);
    for step in 0..=GAP_MAX_STEPS {
        let probe = midnight + TimeDelta::minutes(step * GAP_STEP_MINUTES);
        if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
            return dt;
        }
    }
    tz.from_utc_datetime(&midnight)
}

fn elapsed_in<T: TimeZone>(tz: &T, now: DateTime<Utc>) -> ElapsedTimeSnapshot {
    let date = now.with_timezone(tz).date_naive();
    let start = start_of_day_in(tz, date).with_timezone(&Utc);
    let end = date
        .succ_opt()
        .map(|next| start_of_day_in(tz, next).with_timezone(&Utc))
        .unwrap_or(start + TimeDelta::days(1));
    ElapsedTimeSnapshot::between(start, now, end)
}

fn wall_clock_in<T: TimeZone>(tz: &T, now: DateTime<Utc>) -> WallClock
where
    T::Offset: Display,
{
    let local = now.with_timezone(tz);
    let offset_minutes = (local.naive_local() - local.naive_utc()).num_minutes() as i32;
    WallClock {
        date: local.date_naive(),
        time: local.time(),
        offset_minutes,
        abbreviation: local.format("%Z").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::utc;
    use chrono::Timelike;

    fn shanghai_host() -> TimezoneResolver {
        TimezoneResolver::with_host_zone(chrono_tz::Asia::Shanghai)
    }

    #[test]
    fn test_catalog_shape() {
        assert_eq!(CATALOG.len(), 11);
        assert_eq!(CATALOG[0].id, LOCAL_TIMEZONE);
        assert_eq!(CATALOG[0].utc_offset_hours, None);
        let resolver = TimezoneResolver::new();
        for entry in CATALOG.iter().skip(1) {
            assert!(
                matches!(resolver.resolve(entry.id), Ok(Zone::Named(_))),
                "{} should resolve",
                entry.id
            );
            assert!(entry.utc_offset_hours.is_some());
        }
    }

    #[test]
    fn test_nominal_offsets_match_standard_time() {
        // January: standard time north of the equator, daylight time in Sydney
        let resolver = TimezoneResolver::new();
        let winter = utc(2024, 1, 15, 12, 0, 0);
        for entry in CATALOG.iter().skip(1) {
            let real = resolver.resolve_offset_minutes(entry.id, winter);
            let nominal = (entry.utc_offset_hours.unwrap() * 60.0) as i32;
            if entry.id == "Australia/Sydney" {
                assert_eq!(real, nominal + 60);
            } else {
                assert_eq!(real, nominal, "{}", entry.id);
            }
        }
    }

    #[test]
    fn test_offsets_follow_daylight_saving() {
        let resolver = TimezoneResolver::new();
        let summer = utc(2024, 7, 1, 12, 0, 0);
        assert_eq!(resolver.resolve_offset_minutes("America/New_York", summer), -240);
        assert_eq!(resolver.resolve_offset_minutes("Europe/Paris", summer), 120);
        assert_eq!(resolver.resolve_offset_minutes("Australia/Sydney", summer), 600);
        assert_eq!(resolver.resolve_offset_minutes("Asia/Tokyo", summer), 540);
    }

    #[test]
    fn test_local_offset_uses_host_zone() {
        let resolver = shanghai_host();
        assert_eq!(resolver.resolve_offset_minutes(LOCAL_TIMEZONE, utc(2024, 7, 1, 0, 0, 0)), 480);
    }

    #[test]
    fn test_local_afternoon_elapsed() {
        // 14:30:00.000 in Shanghai
        let resolver = shanghai_host();
        let snap = resolver.compute_elapsed(utc(2024, 5, 20, 6, 30, 0), LOCAL_TIMEZONE);
        assert!((snap.elapsed_seconds - 52_200.0).abs() < 1e-9);
        assert!((snap.percentage - 60.4167).abs() < 1e-4);
    }

    #[test]
    fn test_named_zone_elapsed_with_millis() {
        let resolver = TimezoneResolver::new();
        let now = utc(2024, 5, 20, 0, 0, 1) + TimeDelta::milliseconds(250);
        let snap = resolver.compute_elapsed(now, "Asia/Tokyo");
        assert_eq!(snap.elapsed_ms, 9 * 3_600_000 + 1_250);
        assert_eq!(snap.elapsed_ms + snap.remaining_ms, 86_400_000);
    }

    #[test]
    fn test_unresolvable_zone_falls_back_to_local() {
        let resolver = shanghai_host();
        let now = utc(2024, 5, 20, 6, 30, 0);
        assert!(matches!(
            resolver.resolve("Mars/Olympus_Mons"),
            Err(WidgetError::UnknownTimezone(_))
        ));
        let fallback = resolver.compute_elapsed(now, "Mars/Olympus_Mons");
        let local = resolver.compute_elapsed(now, LOCAL_TIMEZONE);
        assert_eq!(fallback, local);
    }

    #[test]
    fn test_host_clock_local_matches_its_own_wall_clock() {
        let resolver = TimezoneResolver::new();
        let now = utc(2024, 5, 20, 6, 30, 0) + TimeDelta::milliseconds(125);
        let start = resolver.start_of_day(LOCAL_TIMEZONE, now);
        let snap = resolver.compute_elapsed(now, LOCAL_TIMEZONE);
        assert!(start <= now);
        assert_eq!(snap.elapsed_ms, (now - start).num_milliseconds());
        assert!(snap.remaining_ms > 0);

        // Midnight of the host's date, read back through the host zone
        let midnight = resolver.wall_clock(&Zone::Local, start);
        let today = resolver.wall_clock(&Zone::Local, now);
        assert_eq!(midnight.date, today.date);
        assert!(midnight.time <= NaiveTime::from_hms_opt(4, 0, 0).unwrap());
    }

    #[test]
    fn test_start_of_day_when_zone_date_differs() {
        // 20:00 on May 31 in Los Angeles is already noon on June 1 in Tokyo
        let resolver = TimezoneResolver::with_host_zone(chrono_tz::America::Los_Angeles);
        let now = utc(2024, 6, 1, 3, 0, 0);
        assert_eq!(resolver.start_of_day("Asia/Tokyo", now), utc(2024, 5, 31, 15, 0, 0));
        assert_eq!(resolver.start_of_day(LOCAL_TIMEZONE, now), utc(2024, 5, 31, 7, 0, 0));
    }

    #[test]
    fn test_spring_forward_day_is_short() {
        // New York, 2024-03-10 12:00 EDT: only 11 hours since midnight EST
        let resolver = TimezoneResolver::new();
        let snap = resolver.compute_elapsed(utc(2024, 3, 10, 16, 0, 0), "America/New_York");
        assert_eq!(snap.elapsed_seconds, 39_600.0);
        assert_eq!(snap.elapsed_ms + snap.remaining_ms, 23 * 3_600_000);
    }

    #[test]
    fn test_fall_back_day_exceeds_nominal_length() {
        // New York, 2024-11-03 23:30 EST: 24.5 hours since midnight EDT
        let resolver = TimezoneResolver::new();
        let snap = resolver.compute_elapsed(utc(2024, 11, 4, 4, 30, 0), "America/New_York");
        assert_eq!(snap.elapsed_seconds, 88_200.0);
        assert!(snap.percentage > 100.0);
        assert_eq!(snap.display_percentage(), 100.0);
        assert_eq!(snap.remaining_ms, 1_800_000);
    }

    #[test]
    fn test_skipped_midnight_starts_at_first_valid_time() {
        // Beirut springs forward at 00:00 on 2024-03-31; the day starts at 01:00 EEST
        let resolver = TimezoneResolver::new();
        let now = utc(2024, 3, 31, 9, 0, 0);
        assert_eq!(resolver.start_of_day("Asia/Beirut", now), utc(2024, 3, 30, 22, 0, 0));
        let snap = resolver.compute_elapsed(now, "Asia/Beirut");
        assert_eq!(snap.elapsed_seconds, 39_600.0);
    }

    #[test]
    fn test_wall_clock_in_named_zone() {
        let resolver = TimezoneResolver::new();
        let zone = resolver.resolve("Europe/Paris").unwrap();
        let clock = resolver.wall_clock(&zone, utc(2024, 7, 14, 21, 5, 9));
        assert_eq!(clock.date, NaiveDate::from_ymd_opt(2024, 7, 14).unwrap());
        assert_eq!((clock.time.hour(), clock.time.minute(), clock.time.second()), (23, 5, 9));
        assert_eq!(clock.offset_minutes, 120);
        assert_eq!(clock.abbreviation, "CEST");
    }

    #[test]
    fn test_detect_host_timezone() {
        let resolver = TimezoneResolver::new();
        assert_eq!(resolver.detect_host_timezone(Some("Europe/London")), "Europe/London");
        assert_eq!(resolver.detect_host_timezone(Some("America/Chicago")), LOCAL_TIMEZONE);
        assert_eq!(resolver.detect_host_timezone(None), LOCAL_TIMEZONE);
        assert_eq!(detect_host_timezone(LOCAL_TIMEZONE), LOCAL_TIMEZONE);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        const FIXED_ZONES: &[&str] = &["UTC", "Asia/Shanghai", "Asia/Tokyo", "Asia/Dubai"];
        const DST_ZONES: &[&str] = &["America/New_York", "Europe/London", "Australia/Sydney"];

        fn instant(secs: i64, millis: i64) -> DateTime<Utc> {
            DateTime::from_timestamp(secs, 0).unwrap() + TimeDelta::milliseconds(millis)
        }

        proptest! {
            #[test]
            fn elapsed_within_day_without_dst(
                secs in 946_684_800i64..4_102_444_800,
                millis in 0i64..1000,
                zone in proptest::sample::select(FIXED_ZONES),
            ) {
                let resolver = TimezoneResolver::new();
                let snap = resolver.compute_elapsed(instant(secs, millis), zone);
                prop_assert!(snap.elapsed_seconds >= 0.0);
                prop_assert!(snap.elapsed_seconds < DAY_SECONDS_F64);
                prop_assert_eq!(snap.elapsed_ms + snap.remaining_ms, 86_400_000);
            }

            #[test]
            fn elapsed_bounded_by_day_length_with_dst(
                secs in 946_684_800i64..4_102_444_800,
                zone in proptest::sample::select(DST_ZONES),
            ) {
                let resolver = TimezoneResolver::new();
                let snap = resolver.compute_elapsed(instant(secs, 0), zone);
                let day_ms = snap.elapsed_ms + snap.remaining_ms;
                prop_assert!(snap.elapsed_ms >= 0);
                prop_assert!(snap.elapsed_ms < day_ms);
                prop_assert!([82_800_000, 86_400_000, 90_000_000].contains(&day_ms));
            }

            #[test]
            fn host_clock_local_day_is_consistent(
                secs in 946_684_800i64..4_102_444_800,
                millis in 0i64..1000,
            ) {
                let resolver = TimezoneResolver::new();
                let now = instant(secs, millis);
                let snap = resolver.compute_elapsed(now, LOCAL_TIMEZONE);
                prop_assert!(snap.elapsed_ms >= 0);
                prop_assert!(snap.elapsed_ms < snap.elapsed_ms + snap.remaining_ms);
                let expected = 100.0 * snap.elapsed_seconds / DAY_SECONDS_F64;
                prop_assert!((snap.percentage - expected).abs() < 1e-9);
                prop_assert!(resolver.start_of_day(LOCAL_TIMEZONE, now) <= now);
            }

            #[test]
            fn percentage_tracks_elapsed_seconds(
                secs in 946_684_800i64..4_102_444_800,
                zone in proptest::sample::select(DST_ZONES),
            ) {
                let resolver = TimezoneResolver::new();
                let snap = resolver.compute_elapsed(instant(secs, 0), zone);
                let expected = 100.0 * snap.elapsed_seconds / DAY_SECONDS_F64;
                prop_assert!((snap.percentage - expected).abs() < 1e-9);
            }
        }

        const DAY_SECONDS_F64: f64 = crate::core::elapsed::DAY_SECONDS as f64;
    }
}
