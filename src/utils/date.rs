use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Days, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn parse_date_required(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

pub fn parse_optional_date(input: Option<&String>) -> AppResult<Option<NaiveDate>> {
    input.map(|s| parse_date_required(s)).transpose()
}

/// Return the 7-day span containing `date`, starting on the configured
/// weekday (`week_start`: 0 = Sunday ... 6 = Saturday).
///
/// Example, Monday as first day: 2021-12-15 → (2021-12-13, 2021-12-19).
pub fn week_boundary(date: NaiveDate, week_start: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    if week_start > 6 {
        return Err(AppError::Config(format!(
            "Invalid week start day index: {}",
            week_start
        )));
    }

    let weekday = date.weekday().num_days_from_sunday();
    let back = (weekday + 7 - week_start) % 7;

    let start = date - Days::new(u64::from(back));
    let end = start + Days::new(6);

    Ok((start, end))
}

/// All dates from `start` to `end`, both included.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}
