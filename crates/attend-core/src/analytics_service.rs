use attend_domain::{common::ymd, DateRange};
use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    calendar::YearMonth,
    month_view::{grid_range, month_view, CalendarMonthView},
    schedule::{classes_scheduled_on_date, distinct_subjects, ScheduledClass, SubjectRef},
    simulator::{
        full_day_projection, max_additional_misses, project_subject, FullDayProjection,
        MissAllowance, SubjectProjection,
    },
    snapshot::Snapshot,
    stats::{counting_window, semester_stats, SemesterStats},
    storage::AttendanceStore,
    time::EngineContext,
    CoreError,
};

/// Inputs for the bunk simulator: current stats plus what meets today.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulatorView {
    #[serde(with = "ymd")]
    pub today: NaiveDate,
    pub stats: SemesterStats,
    pub today_classes: Vec<ScheduledClass>,
    pub today_subjects: Vec<SubjectRef>,
}

impl SimulatorView {
    fn target(&self) -> f64 {
        f64::from(self.stats.min_attendance)
    }

    pub fn project_subject(
        &self,
        subject_id: &str,
        extra_misses: u32,
    ) -> Result<SubjectProjection, CoreError> {
        let stats = self
            .stats
            .subject(subject_id.trim())
            .ok_or_else(|| CoreError::SubjectNotFound(subject_id.trim().to_string()))?;
        Ok(project_subject(stats, extra_misses, self.target()))
    }

    /// Skipping `days` whole days shaped like today.
    pub fn project_full_days(&self, days: i64) -> FullDayProjection {
        full_day_projection(
            self.stats.overall.attended_classes,
            self.stats.overall.conducted_classes,
            &self.today_classes,
            days,
        )
    }

    /// Remaining misses per subject, in timetable order.
    pub fn miss_allowances(&self) -> Vec<(SubjectRef, MissAllowance)> {
        let target = self.target();
        self.stats
            .subjects
            .iter()
            .map(|subject| {
                (
                    SubjectRef {
                        subject_id: subject.subject_id.clone(),
                        subject_name: subject.subject_name.clone(),
                    },
                    max_additional_misses(
                        subject.attended_classes,
                        subject.conducted_classes,
                        target,
                    ),
                )
            })
            .collect()
    }

    pub fn overall_allowance(&self) -> MissAllowance {
        max_additional_misses(
            self.stats.overall.attended_classes,
            self.stats.overall.conducted_classes,
            self.target(),
        )
    }
}

/// Entry points that load one snapshot from a store and run the engine on it.
pub struct AnalyticsService;

impl AnalyticsService {
    /// Holidays and attendance are fetched only for the counting window.
    pub fn semester_stats(
        store: &dyn AttendanceStore,
        ctx: &EngineContext,
    ) -> Result<SemesterStats, CoreError> {
        let snapshot = Snapshot::load_with(store, |semester| counting_window(semester, ctx.today))?;
        Ok(semester_stats(&snapshot, ctx)?)
    }

    /// Fetches exactly the 42 dates shown in the grid.
    pub fn month_view(
        store: &dyn AttendanceStore,
        month: Option<YearMonth>,
        ctx: &EngineContext,
    ) -> Result<CalendarMonthView, CoreError> {
        let month = month.unwrap_or_else(|| YearMonth::of(ctx.today));
        let range: DateRange = grid_range(month, ctx.timezone)?;
        let snapshot = Snapshot::load(store, Some(range))?;
        Ok(month_view(&snapshot, Some(month), ctx)?)
    }

    pub fn simulator_view(
        store: &dyn AttendanceStore,
        ctx: &EngineContext,
    ) -> Result<SimulatorView, CoreError> {
        let snapshot = Snapshot::load_with(store, |semester| counting_window(semester, ctx.today))?;
        let stats = semester_stats(&snapshot, ctx)?;
        let today_classes = classes_scheduled_on_date(&snapshot.timetable, ctx.today, ctx.timezone)?;
        let today_subjects = distinct_subjects(&today_classes);
        Ok(SimulatorView {
            today: ctx.today,
            stats,
            today_classes,
            today_subjects,
        })
    }
}
