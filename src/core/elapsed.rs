//! Elapsed-time-of-day snapshot
//!
//! `elapsed` is the physical time since the zone's midnight, not the wall
//! clock reading. On a normal day the two agree. On a daylight-saving day
//! they differ by the shift: a 23-hour day never reaches 86 400 s and a
//! 25-hour day runs up to 90 000 s. `percentage` follows `elapsed` and is
//! only clamped for display.

use chrono::{DateTime, Utc};

/// Nominal length of a day
pub const DAY_SECONDS: u32 = 86_400;
pub const DAY_MS: i64 = DAY_SECONDS as i64 * 1000;

/// Elapsed-time-of-day computed for one tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElapsedTimeSnapshot {
    pub elapsed_ms: i64,
    pub elapsed_seconds: f64,
    /// `100 * elapsed_seconds / 86400`, not clamped
    pub percentage: f64,
    /// Time left until the next midnight of the same zone
    pub remaining_ms: i64,
}

impl ElapsedTimeSnapshot {
    /// Snapshot at `now` for a day spanning `start_of_day..start_of_next_day`
    pub fn between(
        start_of_day: DateTime<Utc>,
        now: DateTime<Utc>,
        start_of_next_day: DateTime<Utc>,
    ) -> Self {
        let elapsed_ms = (now - start_of_day).num_milliseconds();
        let remaining_ms = (start_of_next_day - now).num_milliseconds().max(0);
        Self::from_elapsed_ms(elapsed_ms, remaining_ms)
    }

    /// Snapshot from a raw millisecond count on a nominal 24-hour day
    pub fn from_elapsed_ms(elapsed_ms: i64, remaining_ms: i64) -> Self {
        let elapsed_seconds = elapsed_ms as f64 / 1000.0;
        Self {
            elapsed_ms,
            elapsed_seconds,
            percentage: percentage_of_day(elapsed_seconds),
            remaining_ms,
        }
    }

    /// Percentage clamped to `[0, 100]`
    pub fn display_percentage(&self) -> f64 {
        self.percentage.clamp(0.0, 100.0)
    }

    /// Progress clamped to `[0, 1]`, for bars and rings
    pub fn progress_fraction(&self) -> f64 {
        self.display_percentage() / 100.0
    }
}

/// `100 * seconds / 86400`
pub fn percentage_of_day(elapsed_seconds: f64) -> f64 {
    100.0 * elapsed_seconds / DAY_SECONDS as f64
}

/// `stroke-dashoffset` for a circular indicator of the given circumference
/// that is `fraction` full
pub fn stroke_dash_offset(circumference: f64, fraction: f64) -> f64 {
    circumference * (1.0 - fraction.clamp(0.0, 1.0))
}

/// An illustrative duration: "this is how long N seconds feels like"
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReferenceDuration {
    pub seconds: u32,
    /// Localization key of the description
    pub key: &'static str,
}

/// Static reference table, shortest first
pub const REFERENCE_DURATIONS: &[ReferenceDuration] = &[
    ReferenceDuration { seconds: 1, key: "feels.heartbeat" },
    ReferenceDuration { seconds: 60, key: "feels.minute" },
    ReferenceDuration { seconds: 210, key: "feels.song" },
    ReferenceDuration { seconds: 1_500, key: "feels.pomodoro" },
    ReferenceDuration { seconds: 5_400, key: "feels.match" },
    ReferenceDuration { seconds: 8_100, key: "feels.movie" },
    ReferenceDuration { seconds: 28_800, key: "feels.sleep" },
    ReferenceDuration { seconds: 86_400, key: "feels.day" },
];

/// How many whole reference durations fit into the time elapsed so far
pub fn equivalents(elapsed_seconds: f64) -> Vec<(ReferenceDuration, u64)> {
    let elapsed = elapsed_seconds.max(0.0);
    REFERENCE_DURATIONS
        .iter()
        .map(|r| (*r, (elapsed / r.seconds as f64).floor() as u64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::utc;

    #[test]
    fn test_afternoon_snapshot() {
        let start = utc(2024, 6, 1, 0, 0, 0);
        let now = utc(2024, 6, 1, 14, 30, 0);
        let end = utc(2024, 6, 2, 0, 0, 0);
        let snap = ElapsedTimeSnapshot::between(start, now, end);
        assert_eq!(snap.elapsed_ms, 52_200_000);
        assert_eq!(snap.elapsed_seconds, 52_200.0);
        assert!((snap.percentage - 60.416_666).abs() < 1e-4);
        assert_eq!(snap.remaining_ms, 34_200_000);
    }

    #[test]
    fn test_display_percentage_is_clamped() {
        // 25-hour day, half an hour before its end
        let snap = ElapsedTimeSnapshot::from_elapsed_ms(88_200_000, 1_800_000);
        assert!(snap.percentage > 100.0);
        assert_eq!(snap.display_percentage(), 100.0);
        assert_eq!(snap.progress_fraction(), 1.0);

        let snap = ElapsedTimeSnapshot::from_elapsed_ms(-5, DAY_MS);
        assert_eq!(snap.display_percentage(), 0.0);
    }

    #[test]
    fn test_stroke_dash_offset() {
        let c = 2.0 * std::f64::consts::PI * 90.0;
        assert_eq!(stroke_dash_offset(c, 0.0), c);
        assert_eq!(stroke_dash_offset(c, 1.0), 0.0);
        assert!((stroke_dash_offset(c, 0.25) - c * 0.75).abs() < 1e-9);
        assert_eq!(stroke_dash_offset(c, 3.0), 0.0);
    }

    #[test]
    fn test_equivalents_at_noon() {
        let eq = equivalents(43_200.0);
        let count = |key: &str| eq.iter().find(|(r, _)| r.key == key).map(|(_, n)| *n);
        assert_eq!(count("feels.heartbeat"), Some(43_200));
        assert_eq!(count("feels.minute"), Some(720));
        assert_eq!(count("feels.sleep"), Some(1));
        assert_eq!(count("feels.day"), Some(0));
        assert_eq!(eq.len(), REFERENCE_DURATIONS.len());
    }

    #[test]
    fn test_reference_table_sorted() {
        assert!(REFERENCE_DURATIONS
            .windows(2)
            .all(|w| w[0].seconds < w[1].seconds));
    }
}
