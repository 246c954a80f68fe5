use attend_domain::{Session, TimetableEntry};
use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::{
    schedule::{classes_scheduled_on_date, ScheduledClass},
    storage::AttendanceStore,
    CoreError,
};

pub struct TimetableService;

impl TimetableService {
    pub fn create(
        store: &dyn AttendanceStore,
        subject_id: &str,
        subject_name: &str,
        sessions: Vec<Session>,
    ) -> Result<TimetableEntry, CoreError> {
        let entry = TimetableEntry::new(subject_id, subject_name, sessions)?;
        store.insert_timetable_entry(entry.clone())?;
        tracing::info!(subject = %entry.subject_id, "created timetable entry");
        Ok(entry)
    }

    /// Replaces the name and sessions of an existing subject.
    pub fn update(
        store: &dyn AttendanceStore,
        subject_id: &str,
        subject_name: &str,
        sessions: Vec<Session>,
    ) -> Result<TimetableEntry, CoreError> {
        let entry = TimetableEntry::new(subject_id, subject_name, sessions)?;
        store.replace_timetable_entry(entry.clone())?;
        tracing::info!(subject = %entry.subject_id, "updated timetable entry");
        Ok(entry)
    }

    pub fn delete(store: &dyn AttendanceStore, subject_id: &str) -> Result<(), CoreError> {
        let subject_id = subject_id.trim();
        if !store.delete_timetable_entry(subject_id)? {
            return Err(CoreError::SubjectNotFound(subject_id.to_string()));
        }
        tracing::info!(subject = subject_id, "deleted timetable entry");
        Ok(())
    }

    /// Entries ordered by subject name, then id.
    pub fn list(store: &dyn AttendanceStore) -> Result<Vec<TimetableEntry>, CoreError> {
        store.fetch_timetable()
    }

    pub fn classes_for_date(
        store: &dyn AttendanceStore,
        date: NaiveDate,
        timezone: Tz,
    ) -> Result<Vec<ScheduledClass>, CoreError> {
        let timetable = store.fetch_timetable()?;
        Ok(classes_scheduled_on_date(&timetable, date, timezone)?)
    }
}
