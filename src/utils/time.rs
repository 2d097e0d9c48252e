//! Time utilities: parsing HH:MM durations, formatting seconds, etc.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
        .ok()
}

/// Read a time of day as a duration: seconds elapsed since midnight.
/// "02:30" → 9000.
pub fn duration_from_time_of_day(t: &str) -> AppResult<i64> {
    let time = parse_time(t).ok_or_else(|| AppError::InvalidDuration(t.to_string()))?;
    Ok(i64::from(time.num_seconds_from_midnight()))
}

/// Seconds → "HH:MM" (minutes truncated).
pub fn format_seconds(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let m = secs.abs() / 60;
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}

/// Seconds → hours with two decimals ("2.50").
pub fn seconds_to_hours_label(secs: i64) -> String {
    format!("{:.2}", secs as f64 / 3600.0)
}
