use chrono::{DateTime, Datelike, Local, NaiveDate};

use crate::error::{AppError, AppResult};

pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap()
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    let next_month = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    next_month.unwrap() - chrono::Duration::days(1)
}

/// Inclusive `[first-of-month, last-of-month]` window for a `(year, month)` pair.
/// Returns `None` for an out-of-range month number.
pub fn month_window(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some((start, month_end(start)))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Normalize a caller-supplied date to the canonical `YYYY-MM-DD` form.
/// Accepts a plain calendar date or an RFC 3339 timestamp (the date part is
/// kept). `None` defaults to today.
pub fn normalize_date(input: Option<&str>) -> AppResult<String> {
    let raw = match input {
        Some(s) if !s.trim().is_empty() => s.trim(),
        _ => return Ok(today().format("%Y-%m-%d").to_string()),
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.format("%Y-%m-%d").to_string());
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Ok(datetime.date_naive().format("%Y-%m-%d").to_string());
    }

    Err(AppError::Validation(format!("Invalid date: {}", raw)))
}

/// Parse a stored `YYYY-MM-DD` date. Records with unparseable dates fall out
/// of date-filtered views, matching how invalid dates behaved upstream.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
