//! Fixed-width date and time handling.
//!
//! Dates travel as `YYYY-MM-DD` and times as `HH:MM`. Both are zero-padded so
//! their lexicographic order matches chronological order; parsing rejects
//! anything that is not exactly that shape.

use chrono::{NaiveDate, NaiveTime};

use crate::DomainError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

const DATE_SHAPE: &str = "dddd-dd-dd";
const TIME_SHAPE: &str = "dd:dd";

/// Parses a strict `YYYY-MM-DD` date string.
pub fn parse_date(raw: &str) -> Result<NaiveDate, DomainError> {
    let trimmed = raw.trim();
    if !matches_shape(trimmed, DATE_SHAPE) {
        return Err(DomainError::InvalidDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| DomainError::InvalidDate(raw.to_string()))
}

/// Parses a strict 24-hour `HH:MM` time string.
pub fn parse_time(raw: &str) -> Result<NaiveTime, DomainError> {
    let trimmed = raw.trim();
    if !matches_shape(trimmed, TIME_SHAPE) {
        return Err(DomainError::InvalidTime(raw.to_string()));
    }
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .map_err(|_| DomainError::InvalidTime(raw.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

fn matches_shape(raw: &str, shape: &str) -> bool {
    raw.len() == shape.len()
        && raw
            .bytes()
            .zip(shape.bytes())
            .all(|(value, expected)| match expected {
                b'd' => value.is_ascii_digit(),
                other => value == other,
            })
}

/// Serde adapter for `YYYY-MM-DD` dates.
pub mod ymd {
    use chrono::NaiveDate;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(D::Error::custom)
    }
}

/// Serde adapter for `HH:MM` times.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(D::Error::custom)
    }
}
