use chrono::NaiveDate;
use thiserror::Error;

/// Failures raised while parsing or validating domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),
    #[error("Invalid date `{0}`: expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid time `{0}`: expected HH:MM (24-hour)")]
    InvalidTime(String),
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    #[error("Invalid attendance status: {0}")]
    InvalidStatus(String),
    #[error("Invalid month `{0}`: expected YYYY-MM")]
    InvalidMonth(String),
    #[error("Validation failed: {0}")]
    Validation(String),
}
