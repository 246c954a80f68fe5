use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{common::ymd, validation, DomainError};

/// A date on which no classes are conducted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    #[serde(with = "ymd")]
    pub date: NaiveDate,
    pub reason: String,
}

impl Holiday {
    pub fn new(date: NaiveDate, reason: &str) -> Result<Self, DomainError> {
        Ok(Self {
            date,
            reason: validation::holiday_reason(reason)?,
        })
    }
}
