use std::{fmt, str::FromStr};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::{common::hhmm, format_time, parse_time, validation, DomainError, Weekday};

/// A weekly recurring class slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "day")]
    pub weekday: Weekday,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

impl Session {
    pub fn new(
        weekday: Weekday,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Self, DomainError> {
        let session = Self {
            weekday,
            start_time,
            end_time,
        };
        session.validate()?;
        Ok(session)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.start_time >= self.end_time {
            return Err(DomainError::Validation(
                "Start time must be earlier than end time".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}-{}",
            self.weekday,
            format_time(self.start_time),
            format_time(self.end_time)
        )
    }
}

impl FromStr for Session {
    type Err = DomainError;

    /// Parses the compact `Day@HH:MM-HH:MM` form.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            DomainError::Validation(format!(
                "Session `{value}` must look like Monday@09:00-10:00"
            ))
        };
        let (day, times) = value.trim().split_once('@').ok_or_else(invalid)?;
        let (start, end) = times.split_once('-').ok_or_else(invalid)?;
        Session::new(day.parse()?, parse_time(start)?, parse_time(end)?)
    }
}

/// A subject together with its weekly sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub subject_id: String,
    pub subject_name: String,
    pub sessions: Vec<Session>,
}

impl TimetableEntry {
    pub fn new(
        subject_id: &str,
        subject_name: &str,
        sessions: Vec<Session>,
    ) -> Result<Self, DomainError> {
        let entry = Self {
            subject_id: validation::subject_id(subject_id)?,
            subject_name: validation::subject_name(subject_name)?,
            sessions,
        };
        validation::sessions(&entry.sessions)?;
        Ok(entry)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        validation::subject_id(&self.subject_id)?;
        validation::subject_name(&self.subject_name)?;
        validation::sessions(&self.sessions)
    }

    pub fn session_on(&self, weekday: Weekday) -> Option<&Session> {
        self.sessions
            .iter()
            .find(|session| session.weekday == weekday)
    }

    pub fn has_session_on(&self, weekday: Weekday) -> bool {
        self.session_on(weekday).is_some()
    }
}

/// Timetable listing order: by subject name, then subject id.
pub fn sort_timetable(entries: &mut [TimetableEntry]) {
    entries.sort_by(|a, b| {
        a.subject_name
            .cmp(&b.subject_name)
            .then_with(|| a.subject_id.cmp(&b.subject_id))
    });
}
