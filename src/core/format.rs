//! Text formatting for display fields

use chrono::{NaiveDate, NaiveTime};

/// Seconds counter, e.g. `52200.00` or `52,200.000`
pub fn format_seconds(seconds: f64, decimals: usize, group_thousands: bool) -> String {
    let plain = format!("{:.*}", decimals, seconds);
    if !group_thousands {
        return plain;
    }

    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(plain.len() + int_part.len() / 3);
    grouped.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

/// Duration as `HH:MM:SS`, truncated to whole seconds; negative is zero
pub fn format_duration(ms: i64) -> String {
    let total_seconds = ms.max(0) / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Percentage text, e.g. `60.4%`
pub fn format_percentage(percentage: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, percentage)
}

/// Calendar date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// 24-hour time as `HH:MM:SS`
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

/// East-positive offset as `UTC+8`, `UTC-3:30` or `UTC+5:45`
pub fn format_utc_offset(offset_minutes: i32) -> String {
    let sign = if offset_minutes < 0 { '-' } else { '+' };
    let abs = offset_minutes.unsigned_abs();
    let (hours, minutes) = (abs / 60, abs % 60);
    if minutes > 0 {
        format!("UTC{}{}:{:02}", sign, hours, minutes)
    } else {
        format!("UTC{}{}", sign, hours)
    }
}
