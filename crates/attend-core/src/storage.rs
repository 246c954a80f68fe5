use std::sync::RwLock;

use attend_domain::{
    sort_timetable, AttendanceRecord, DateRange, Holiday, SemesterConfig, TimetableEntry,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Abstraction over persistence backends holding the timetable, holidays,
/// attendance log, and semester configuration.
///
/// Range-scoped fetches only return rows whose date lies inside the range.
pub trait AttendanceStore: Send + Sync {
    fn fetch_timetable(&self) -> Result<Vec<TimetableEntry>, CoreError>;
    fn fetch_holidays(&self, range: DateRange) -> Result<Vec<Holiday>, CoreError>;
    fn fetch_all_holidays(&self) -> Result<Vec<Holiday>, CoreError>;
    fn fetch_attendance(&self, range: DateRange) -> Result<Vec<AttendanceRecord>, CoreError>;
    fn fetch_semester_config(&self) -> Result<Option<SemesterConfig>, CoreError>;

    /// Upserts by `(date, subject_id)`.
    fn write_attendance(&self, records: &[AttendanceRecord]) -> Result<(), CoreError>;
    fn insert_timetable_entry(&self, entry: TimetableEntry) -> Result<(), CoreError>;
    fn replace_timetable_entry(&self, entry: TimetableEntry) -> Result<(), CoreError>;
    fn delete_timetable_entry(&self, subject_id: &str) -> Result<bool, CoreError>;
    fn insert_holiday(&self, holiday: Holiday) -> Result<(), CoreError>;
    fn upsert_holiday(&self, holiday: Holiday) -> Result<(), CoreError>;
    /// Updates the holiday stored at `old_date`, moving it when the date changes.
    fn replace_holiday(&self, old_date: NaiveDate, holiday: Holiday) -> Result<(), CoreError>;
    fn delete_holiday(&self, date: NaiveDate) -> Result<bool, CoreError>;
    fn save_semester_config(&self, config: SemesterConfig) -> Result<(), CoreError>;

    /// Everything a snapshot reads, with holidays and attendance limited to the
    /// range picked from the semester config. Backends that can read their
    /// whole state at once override this so the parts come from one read.
    fn fetch_snapshot_parts(&self, select_range: RangeSelector<'_>) -> Result<SnapshotParts, CoreError> {
        let semester = self.fetch_semester_config()?;
        let timetable = self.fetch_timetable()?;
        let (holidays, attendance) = match select_range(semester.as_ref()) {
            Some(range) => (self.fetch_holidays(range)?, self.fetch_attendance(range)?),
            None => (Vec::new(), Vec::new()),
        };
        Ok(SnapshotParts {
            semester,
            timetable,
            holidays,
            attendance,
        })
    }
}

/// Picks the holiday/attendance window once the semester config is known.
pub type RangeSelector<'a> = &'a dyn Fn(Option<&SemesterConfig>) -> Option<DateRange>;

/// Raw rows behind a [`crate::Snapshot`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotParts {
    pub semester: Option<SemesterConfig>,
    pub timetable: Vec<TimetableEntry>,
    pub holidays: Vec<Holiday>,
    pub attendance: Vec<AttendanceRecord>,
}

/// The full persisted document. Backends wrap one of these and delegate
/// every mutation to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreState {
    #[serde(default)]
    pub timetable: Vec<TimetableEntry>,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    #[serde(default)]
    pub semester: Option<SemesterConfig>,
}

impl StoreState {
    pub fn sorted_timetable(&self) -> Vec<TimetableEntry> {
        let mut entries = self.timetable.clone();
        sort_timetable(&mut entries);
        entries
    }

    pub fn all_holidays(&self) -> Vec<Holiday> {
        let mut holidays = self.holidays.clone();
        holidays.sort_by_key(|holiday| holiday.date);
        holidays
    }

    pub fn holidays_in(&self, range: DateRange) -> Vec<Holiday> {
        self.all_holidays()
            .into_iter()
            .filter(|holiday| range.contains(holiday.date))
            .collect()
    }

    pub fn attendance_in(&self, range: DateRange) -> Vec<AttendanceRecord> {
        self.attendance
            .iter()
            .filter(|record| range.contains(record.date))
            .cloned()
            .collect()
    }

    pub fn snapshot_parts(&self, select_range: RangeSelector<'_>) -> SnapshotParts {
        let range = select_range(self.semester.as_ref());
        SnapshotParts {
            semester: self.semester.clone(),
            timetable: self.sorted_timetable(),
            holidays: range.map(|range| self.holidays_in(range)).unwrap_or_default(),
            attendance: range.map(|range| self.attendance_in(range)).unwrap_or_default(),
        }
    }

    pub fn upsert_attendance(&mut self, records: &[AttendanceRecord]) {
        for record in records {
            match self
                .attendance
                .iter_mut()
                .find(|existing| existing.key() == record.key())
            {
                Some(existing) => existing.status = record.status,
                None => self.attendance.push(record.clone()),
            }
        }
    }

    pub fn insert_timetable_entry(&mut self, entry: TimetableEntry) -> Result<(), CoreError> {
        if self.subject_index(&entry.subject_id).is_some() {
            return Err(CoreError::SubjectExists(entry.subject_id));
        }
        self.timetable.push(entry);
        Ok(())
    }

    pub fn replace_timetable_entry(&mut self, entry: TimetableEntry) -> Result<(), CoreError> {
        let idx = self
            .subject_index(&entry.subject_id)
            .ok_or_else(|| CoreError::SubjectNotFound(entry.subject_id.clone()))?;
        self.timetable[idx] = entry;
        Ok(())
    }

    pub fn delete_timetable_entry(&mut self, subject_id: &str) -> bool {
        let before = self.timetable.len();
        self.timetable.retain(|entry| entry.subject_id != subject_id);
        self.timetable.len() != before
    }

    pub fn insert_holiday(&mut self, holiday: Holiday) -> Result<(), CoreError> {
        if self.holiday_index(holiday.date).is_some() {
            return Err(CoreError::HolidayExists(holiday.date));
        }
        self.holidays.push(holiday);
        Ok(())
    }

    pub fn upsert_holiday(&mut self, holiday: Holiday) {
        match self.holiday_index(holiday.date) {
            Some(idx) => self.holidays[idx] = holiday,
            None => self.holidays.push(holiday),
        }
    }

    pub fn replace_holiday(&mut self, old_date: NaiveDate, holiday: Holiday) -> Result<(), CoreError> {
        let idx = self
            .holiday_index(old_date)
            .ok_or(CoreError::HolidayNotFound(old_date))?;
        if holiday.date != old_date && self.holiday_index(holiday.date).is_some() {
            return Err(CoreError::HolidayExists(holiday.date));
        }
        self.holidays[idx] = holiday;
        Ok(())
    }

    pub fn delete_holiday(&mut self, date: NaiveDate) -> bool {
        let before = self.holidays.len();
        self.holidays.retain(|holiday| holiday.date != date);
        self.holidays.len() != before
    }

    pub fn set_semester(&mut self, config: SemesterConfig) {
        self.semester = Some(config);
    }

    fn subject_index(&self, subject_id: &str) -> Option<usize> {
        self.timetable
            .iter()
            .position(|entry| entry.subject_id == subject_id)
    }

    fn holiday_index(&self, date: NaiveDate) -> Option<usize> {
        self.holidays.iter().position(|holiday| holiday.date == date)
    }
}

/// In-process store, used by tests and as a scratch backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: StoreState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    pub fn snapshot_state(&self) -> Result<StoreState, CoreError> {
        self.read(|state| state.clone())
    }

    fn read<T>(&self, f: impl FnOnce(&StoreState) -> T) -> Result<T, CoreError> {
        let guard = self
            .state
            .read()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        Ok(f(&guard))
    }

    fn write<T>(&self, f: impl FnOnce(&mut StoreState) -> T) -> Result<T, CoreError> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        Ok(f(&mut guard))
    }
}

impl AttendanceStore for MemoryStore {
    fn fetch_timetable(&self) -> Result<Vec<TimetableEntry>, CoreError> {
        self.read(StoreState::sorted_timetable)
    }

    fn fetch_holidays(&self, range: DateRange) -> Result<Vec<Holiday>, CoreError> {
        self.read(|state| state.holidays_in(range))
    }

    fn fetch_all_holidays(&self) -> Result<Vec<Holiday>, CoreError> {
        self.read(StoreState::all_holidays)
    }

    fn fetch_attendance(&self, range: DateRange) -> Result<Vec<AttendanceRecord>, CoreError> {
        self.read(|state| state.attendance_in(range))
    }

    fn fetch_semester_config(&self) -> Result<Option<SemesterConfig>, CoreError> {
        self.read(|state| state.semester.clone())
    }

    fn write_attendance(&self, records: &[AttendanceRecord]) -> Result<(), CoreError> {
        self.write(|state| state.upsert_attendance(records))
    }

    fn insert_timetable_entry(&self, entry: TimetableEntry) -> Result<(), CoreError> {
        self.write(|state| state.insert_timetable_entry(entry))?
    }

    fn replace_timetable_entry(&self, entry: TimetableEntry) -> Result<(), CoreError> {
        self.write(|state| state.replace_timetable_entry(entry))?
    }

    fn delete_timetable_entry(&self, subject_id: &str) -> Result<bool, CoreError> {
        self.write(|state| state.delete_timetable_entry(subject_id))
    }

    fn insert_holiday(&self, holiday: Holiday) -> Result<(), CoreError> {
        self.write(|state| state.insert_holiday(holiday))?
    }

    fn upsert_holiday(&self, holiday: Holiday) -> Result<(), CoreError> {
        self.write(|state| state.upsert_holiday(holiday))
    }

    fn replace_holiday(&self, old_date: NaiveDate, holiday: Holiday) -> Result<(), CoreError> {
        self.write(|state| state.replace_holiday(old_date, holiday))?
    }

    fn delete_holiday(&self, date: NaiveDate) -> Result<bool, CoreError> {
        self.write(|state| state.delete_holiday(date))
    }

    fn save_semester_config(&self, config: SemesterConfig) -> Result<(), CoreError> {
        self.write(|state| state.set_semester(config))
    }

    fn fetch_snapshot_parts(&self, select_range: RangeSelector<'_>) -> Result<SnapshotParts, CoreError> {
        self.read(|state| state.snapshot_parts(select_range))
    }
}
