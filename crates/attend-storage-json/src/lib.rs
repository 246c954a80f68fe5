//! attend-storage-json
//!
//! Filesystem-backed [`AttendanceStore`] keeping the whole state in one JSON
//! document.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use attend_core::{AttendanceStore, CoreError, RangeSelector, SnapshotParts, StoreState};
use attend_domain::{AttendanceRecord, DateRange, Holiday, SemesterConfig, TimetableEntry};
use chrono::NaiveDate;

pub const DATA_FILE_NAME: &str = "attendance.json";
const TMP_SUFFIX: &str = "tmp";

/// JSON persistence for the timetable, holidays, attendance log, and semester.
///
/// Every mutation is a read-modify-write of the document under a process-wide
/// lock, finished by an atomic rename.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    /// Opens (or prepares) `attendance.json` inside `data_root`.
    pub fn open(data_root: &Path) -> Result<Self, CoreError> {
        fs::create_dir_all(data_root)?;
        Ok(Self::at_path(data_root.join(DATA_FILE_NAME)))
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_state(&self) -> Result<StoreState, CoreError> {
        load_state_from_path(&self.path)
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, CoreError> {
        self.write_lock
            .lock()
            .map_err(|_| CoreError::Storage("json store lock poisoned".into()))
    }

    fn read<T>(&self, f: impl FnOnce(&StoreState) -> T) -> Result<T, CoreError> {
        let state = self.load_state()?;
        Ok(f(&state))
    }

    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut StoreState) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let _guard = self.lock()?;
        let mut state = self.load_state()?;
        let value = f(&mut state)?;
        save_state_to_path(&state, &self.path)?;
        Ok(value)
    }
}

impl AttendanceStore for JsonStore {
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
        self.mutate(|state| {
            state.upsert_attendance(records);
            Ok(())
        })
    }

    fn insert_timetable_entry(&self, entry: TimetableEntry) -> Result<(), CoreError> {
        self.mutate(|state| state.insert_timetable_entry(entry))
    }

    fn replace_timetable_entry(&self, entry: TimetableEntry) -> Result<(), CoreError> {
        self.mutate(|state| state.replace_timetable_entry(entry))
    }

    fn delete_timetable_entry(&self, subject_id: &str) -> Result<bool, CoreError> {
        self.mutate(|state| Ok(state.delete_timetable_entry(subject_id)))
    }

    fn insert_holiday(&self, holiday: Holiday) -> Result<(), CoreError> {
        self.mutate(|state| state.insert_holiday(holiday))
    }

    fn upsert_holiday(&self, holiday: Holiday) -> Result<(), CoreError> {
        self.mutate(|state| {
            state.upsert_holiday(holiday);
            Ok(())
        })
    }

    fn replace_holiday(&self, old_date: NaiveDate, holiday: Holiday) -> Result<(), CoreError> {
        self.mutate(|state| state.replace_holiday(old_date, holiday))
    }

    fn delete_holiday(&self, date: NaiveDate) -> Result<bool, CoreError> {
        self.mutate(|state| Ok(state.delete_holiday(date)))
    }

    fn save_semester_config(&self, config: SemesterConfig) -> Result<(), CoreError> {
        self.mutate(|state| {
            state.set_semester(config);
            Ok(())
        })
    }

    fn fetch_snapshot_parts(&self, select_range: RangeSelector<'_>) -> Result<SnapshotParts, CoreError> {
        self.read(|state| state.snapshot_parts(select_range))
    }
}

/// Reads a state document; a missing file is an empty state.
pub fn load_state_from_path(path: &Path) -> Result<StoreState, CoreError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no attendance document yet");
        return Ok(StoreState::default());
    }
    let data = fs::read_to_string(path)?;
    let state: StoreState =
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))?;
    for entry in &state.timetable {
        if let Err(err) = entry.validate() {
            tracing::warn!(subject = %entry.subject_id, %err, "stored timetable entry is invalid");
        }
    }
    Ok(state)
}

/// Writes a state document through a temp file and rename.
pub fn save_state_to_path(state: &StoreState, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json =
        serde_json::to_string_pretty(state).map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), "saved attendance document");
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}
