use attend_domain::DomainError;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Subject not found: {0}")]
    SubjectNotFound(String),
    #[error("Subject '{0}' already exists")]
    SubjectExists(String),
    #[error("Holiday '{0}' does not exist")]
    HolidayNotFound(NaiveDate),
    #[error("Holiday for '{0}' already exists")]
    HolidayExists(NaiveDate),
    #[error("Cannot mark attendance for future date {0}")]
    FutureDate(NaiveDate),
    #[error("Cannot mark attendance on holiday {0}")]
    MarkOnHoliday(NaiveDate),
    #[error("Subject '{subject_id}' is not scheduled on {date}")]
    NotScheduled { subject_id: String, date: NaiveDate },
    #[error("No classes scheduled on {0}")]
    NoClassesScheduled(NaiveDate),
    #[error("Semester is not configured")]
    SemesterNotConfigured,
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}
