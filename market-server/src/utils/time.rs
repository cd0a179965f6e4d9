//! Date and time-of-day validation
//!
//! Schedules store their date as `YYYY-MM-DD` and times as `HH:MM` TEXT,
//! so lexicographic comparison matches chronological order. These helpers
//! enforce the formats at the boundary.

use chrono::{NaiveDate, NaiveTime};
use shared::{AppError, ErrorCode};

/// Parse a `YYYY-MM-DD` date string
pub fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date '{value}', expected YYYY-MM-DD")))
}

/// Parse an `HH:MM` time-of-day string
pub fn parse_hhmm(value: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::validation(format!("Invalid time '{value}', expected HH:MM")))
}

/// Validate a schedule window: well-formed date and times, start before end
pub fn validate_time_window(date: &str, start: &str, end: &str) -> Result<(), AppError> {
    parse_date(date)?;
    let start_t = parse_hhmm(start)?;
    let end_t = parse_hhmm(end)?;
    if start_t >= end_t {
        return Err(AppError::with_message(
            ErrorCode::InvalidTimeWindow,
            format!("Start time {start} must be before end time {end}"),
        ));
    }
    Ok(())
}
