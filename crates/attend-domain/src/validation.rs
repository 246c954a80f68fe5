//! Input rules shared by the entity constructors.

use std::collections::HashSet;

use crate::{DomainError, Session};

pub const SUBJECT_ID_MIN: usize = 2;
pub const SUBJECT_ID_MAX: usize = 50;
pub const SUBJECT_NAME_MIN: usize = 2;
pub const SUBJECT_NAME_MAX: usize = 120;
pub const HOLIDAY_REASON_MIN: usize = 2;
pub const HOLIDAY_REASON_MAX: usize = 200;
pub const MIN_ATTENDANCE_FLOOR: u8 = 1;
pub const MIN_ATTENDANCE_CEILING: u8 = 100;

/// Timetable keys: trimmed, bounded, restricted to `[A-Za-z0-9_-]`.
pub fn subject_id(raw: &str) -> Result<String, DomainError> {
    let value = subject_key(raw)?;
    if !value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-'))
    {
        return Err(DomainError::Validation(
            "Subject ID must only contain letters, numbers, _ or -".into(),
        ));
    }
    Ok(value)
}

/// Attendance records only enforce the length bound on the subject key.
pub fn subject_key(raw: &str) -> Result<String, DomainError> {
    bounded(raw, "Subject ID", SUBJECT_ID_MIN, SUBJECT_ID_MAX)
}

pub fn subject_name(raw: &str) -> Result<String, DomainError> {
    bounded(raw, "Subject name", SUBJECT_NAME_MIN, SUBJECT_NAME_MAX)
}

pub fn holiday_reason(raw: &str) -> Result<String, DomainError> {
    bounded(raw, "Reason", HOLIDAY_REASON_MIN, HOLIDAY_REASON_MAX)
}

pub fn min_attendance(value: u8) -> Result<u8, DomainError> {
    if (MIN_ATTENDANCE_FLOOR..=MIN_ATTENDANCE_CEILING).contains(&value) {
        Ok(value)
    } else {
        Err(DomainError::Validation(format!(
            "Minimum attendance must be between {MIN_ATTENDANCE_FLOOR} and {MIN_ATTENDANCE_CEILING}"
        )))
    }
}

/// A subject needs at least one session and at most one per weekday.
pub fn sessions(sessions: &[Session]) -> Result<(), DomainError> {
    if sessions.is_empty() {
        return Err(DomainError::Validation(
            "Add at least one day/time session".into(),
        ));
    }
    let mut seen = HashSet::new();
    for session in sessions {
        session.validate()?;
        if !seen.insert(session.weekday) {
            return Err(DomainError::Validation(
                "A subject can only have one time slot per weekday".into(),
            ));
        }
    }
    Ok(())
}

fn bounded(raw: &str, label: &str, min: usize, max: usize) -> Result<String, DomainError> {
    let value = raw.trim();
    let length = value.chars().count();
    if length < min {
        return Err(DomainError::Validation(format!(
            "{label} must be at least {min} characters"
        )));
    }
    if length > max {
        return Err(DomainError::Validation(format!(
            "{label} must be at most {max} characters"
        )));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_id_is_trimmed_and_checked() {
        assert_eq!(subject_id("  CS-101 ").unwrap(), "CS-101");
        assert!(subject_id("x").is_err());
        assert!(subject_id("has space").is_err());
        assert!(subject_id(&"a".repeat(51)).is_err());
    }

    #[test]
    fn subject_key_allows_any_characters() {
        assert_eq!(subject_key("lab 2").unwrap(), "lab 2");
    }

    #[test]
    fn min_attendance_bounds() {
        assert!(min_attendance(0).is_err());
        assert_eq!(min_attendance(1).unwrap(), 1);
        assert_eq!(min_attendance(100).unwrap(), 100);
        assert!(min_attendance(101).is_err());
    }
}
