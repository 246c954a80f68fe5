use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{common::ymd, validation, DateRange, DomainError};

/// The active semester window and its attendance threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterConfig {
    #[serde(with = "ymd")]
    pub semester_start: NaiveDate,
    #[serde(with = "ymd")]
    pub semester_end: NaiveDate,
    /// Required attendance percentage, 1 to 100.
    pub min_attendance: u8,
}

impl SemesterConfig {
    pub fn new(
        semester_start: NaiveDate,
        semester_end: NaiveDate,
        min_attendance: u8,
    ) -> Result<Self, DomainError> {
        let config = Self {
            semester_start,
            semester_end,
            min_attendance,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        validation::min_attendance(self.min_attendance)?;
        if self.semester_start > self.semester_end {
            return Err(DomainError::Validation(
                "Semester end date must be on or after semester start date".into(),
            ));
        }
        Ok(())
    }

    pub fn window(&self) -> Result<DateRange, DomainError> {
        DateRange::new(self.semester_start, self.semester_end)
    }
}
