use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{common::ymd, validation, DomainError};

/// Outcome recorded for one subject on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
        }
    }

    pub fn is_present(self) -> bool {
        self == AttendanceStatus::Present
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "present" | "p" => Ok(AttendanceStatus::Present),
            "absent" | "a" => Ok(AttendanceStatus::Absent),
            _ => Err(DomainError::InvalidStatus(value.to_string())),
        }
    }
}

/// One entry of the attendance log, unique per `(date, subject_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(with = "ymd")]
    pub date: NaiveDate,
    pub subject_id: String,
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    pub fn new(
        date: NaiveDate,
        subject_id: &str,
        status: AttendanceStatus,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            date,
            subject_id: validation::subject_key(subject_id)?,
            status,
        })
    }

    pub fn key(&self) -> (NaiveDate, &str) {
        (self.date, self.subject_id.as_str())
    }
}
