use attend_domain::SemesterConfig;
use chrono::NaiveDate;

use crate::{storage::AttendanceStore, CoreError};

pub struct SemesterService;

impl SemesterService {
    pub fn configure(
        store: &dyn AttendanceStore,
        semester_start: NaiveDate,
        semester_end: NaiveDate,
        min_attendance: u8,
    ) -> Result<SemesterConfig, CoreError> {
        let config = SemesterConfig::new(semester_start, semester_end, min_attendance)?;
        store.save_semester_config(config.clone())?;
        tracing::info!(
            start = %semester_start,
            end = %semester_end,
            min_attendance,
            "configured semester"
        );
        Ok(config)
    }

    pub fn current(store: &dyn AttendanceStore) -> Result<Option<SemesterConfig>, CoreError> {
        store.fetch_semester_config()
    }

    /// Like [`SemesterService::current`], but a missing config is an error.
    pub fn require(store: &dyn AttendanceStore) -> Result<SemesterConfig, CoreError> {
        Self::current(store)?.ok_or(CoreError::SemesterNotConfigured)
    }
}
