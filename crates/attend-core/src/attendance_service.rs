use std::collections::{BTreeMap, HashSet};

use attend_domain::{AttendanceRecord, AttendanceStatus, DateRange};
use chrono::NaiveDate;

use crate::{
    schedule::{classes_scheduled_on_date, distinct_subjects, ScheduledClass},
    storage::AttendanceStore,
    time::EngineContext,
    CoreError,
};

pub struct AttendanceService;

impl AttendanceService {
    /// Records one status, replacing any earlier mark for the same class.
    ///
    /// The date must not be in the future or a holiday, and the subject must
    /// meet on that weekday.
    pub fn mark(
        store: &dyn AttendanceStore,
        ctx: &EngineContext,
        date: NaiveDate,
        subject_id: &str,
        status: AttendanceStatus,
    ) -> Result<AttendanceRecord, CoreError> {
        let record = AttendanceRecord::new(date, subject_id, status)?;
        let classes = Self::markable_classes(store, ctx, date)?;
        ensure_scheduled(&classes, &record.subject_id, date)?;
        store.write_attendance(std::slice::from_ref(&record))?;
        tracing::debug!(%date, subject = %record.subject_id, %status, "marked attendance");
        Ok(record)
    }

    /// Marks each listed subject present on `date`. Blank and repeated ids are
    /// skipped; returns how many records were written. Nothing is written if
    /// any subject fails the checks of [`AttendanceService::mark`].
    pub fn mark_present<'a, I>(
        store: &dyn AttendanceStore,
        ctx: &EngineContext,
        date: NaiveDate,
        subject_ids: I,
    ) -> Result<usize, CoreError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let records = subject_ids
            .into_iter()
            .map(str::trim)
            .filter(|id| !id.is_empty() && seen.insert(*id))
            .map(|id| AttendanceRecord::new(date, id, AttendanceStatus::Present))
            .collect::<Result<Vec<_>, _>>()?;
        if records.is_empty() {
            return Ok(0);
        }
        let classes = Self::markable_classes(store, ctx, date)?;
        for record in &records {
            ensure_scheduled(&classes, &record.subject_id, date)?;
        }
        store.write_attendance(&records)?;
        tracing::debug!(%date, count = records.len(), "marked subjects present");
        Ok(records.len())
    }

    /// Marks every subject meeting today present.
    pub fn mark_all_present_today(
        store: &dyn AttendanceStore,
        ctx: &EngineContext,
    ) -> Result<usize, CoreError> {
        let today = ctx.today;
        let classes = Self::markable_classes(store, ctx, today)?;
        if classes.is_empty() {
            return Err(CoreError::NoClassesScheduled(today));
        }
        let records = distinct_subjects(&classes)
            .into_iter()
            .map(|subject| AttendanceRecord::new(today, &subject.subject_id, AttendanceStatus::Present))
            .collect::<Result<Vec<_>, _>>()?;
        store.write_attendance(&records)?;
        tracing::info!(date = %today, count = records.len(), "marked all of today present");
        Ok(records.len())
    }

    pub fn statuses_for_date(
        store: &dyn AttendanceStore,
        date: NaiveDate,
    ) -> Result<BTreeMap<String, AttendanceStatus>, CoreError> {
        Ok(store
            .fetch_attendance(DateRange::single(date))?
            .into_iter()
            .map(|record| (record.subject_id, record.status))
            .collect())
    }

    /// Classes on `date`, or why nothing on that date may be marked.
    fn markable_classes(
        store: &dyn AttendanceStore,
        ctx: &EngineContext,
        date: NaiveDate,
    ) -> Result<Vec<ScheduledClass>, CoreError> {
        if date > ctx.today {
            return Err(CoreError::FutureDate(date));
        }
        if !store.fetch_holidays(DateRange::single(date))?.is_empty() {
            return Err(CoreError::MarkOnHoliday(date));
        }
        let timetable = store.fetch_timetable()?;
        Ok(classes_scheduled_on_date(&timetable, date, ctx.timezone)?)
    }
}

fn ensure_scheduled(
    classes: &[ScheduledClass],
    subject_id: &str,
    date: NaiveDate,
) -> Result<(), CoreError> {
    if classes.iter().any(|class| class.subject_id == subject_id) {
        Ok(())
    } else {
        Err(CoreError::NotScheduled {
            subject_id: subject_id.to_string(),
            date,
        })
    }
}
