//! Read-only inputs for the engine, fetched once per request.

use std::collections::{HashMap, HashSet};

use attend_domain::{
    AttendanceRecord, AttendanceStatus, DateRange, Holiday, SemesterConfig, TimetableEntry,
};
use chrono::NaiveDate;

use crate::{
    storage::{AttendanceStore, SnapshotParts},
    CoreError,
};

/// Sparse attendance log keyed by date and subject. Later records win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceLog {
    by_date: HashMap<NaiveDate, HashMap<String, AttendanceStatus>>,
}

impl AttendanceLog {
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = AttendanceRecord>,
    {
        let mut log = Self::default();
        for record in records {
            log.record(record);
        }
        log
    }

    pub fn record(&mut self, record: AttendanceRecord) {
        self.by_date
            .entry(record.date)
            .or_default()
            .insert(record.subject_id, record.status);
    }

    pub fn status(&self, date: NaiveDate, subject_id: &str) -> Option<AttendanceStatus> {
        self.by_date
            .get(&date)
            .and_then(|subjects| subjects.get(subject_id))
            .copied()
    }

    pub fn is_present(&self, date: NaiveDate, subject_id: &str) -> bool {
        self.status(date, subject_id)
            .is_some_and(AttendanceStatus::is_present)
    }

    pub fn len(&self) -> usize {
        self.by_date.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything a stats, calendar, or simulator computation reads.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub semester: Option<SemesterConfig>,
    pub timetable: Vec<TimetableEntry>,
    pub holidays: HashSet<NaiveDate>,
    pub attendance: AttendanceLog,
}

impl Snapshot {
    pub fn new<H, A>(
        semester: Option<SemesterConfig>,
        timetable: Vec<TimetableEntry>,
        holidays: H,
        attendance: A,
    ) -> Self
    where
        H: IntoIterator<Item = Holiday>,
        A: IntoIterator<Item = AttendanceRecord>,
    {
        Self {
            semester,
            timetable,
            holidays: holidays.into_iter().map(|holiday| holiday.date).collect(),
            attendance: AttendanceLog::from_records(attendance),
        }
    }

    /// Fetches holidays and attendance for `range` only; `None` skips both.
    pub fn load(store: &dyn AttendanceStore, range: Option<DateRange>) -> Result<Self, CoreError> {
        Self::load_with(store, |_| range)
    }

    /// Like [`Snapshot::load`], but the range may depend on the semester config.
    pub fn load_with<F>(store: &dyn AttendanceStore, select_range: F) -> Result<Self, CoreError>
    where
        F: Fn(Option<&SemesterConfig>) -> Option<DateRange>,
    {
        let parts = store.fetch_snapshot_parts(&select_range)?;
        tracing::debug!(
            subjects = parts.timetable.len(),
            holidays = parts.holidays.len(),
            records = parts.attendance.len(),
            "loaded attendance snapshot"
        );
        Ok(Self::from_parts(parts))
    }

    pub fn from_parts(parts: SnapshotParts) -> Self {
        Self::new(parts.semester, parts.timetable, parts.holidays, parts.attendance)
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }
}
