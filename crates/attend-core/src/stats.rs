//! Semester statistics: conducted and attended counts, percentages, and the
//! number of classes still needed to reach the attendance target.

use attend_domain::{common::ymd, DateRange, DomainError, SemesterConfig, TimetableEntry};
use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    calendar::{each_date_in_range, min_date, weekday_of},
    snapshot::Snapshot,
    time::EngineContext,
};

/// Threshold reported when no semester has been configured yet.
pub const DEFAULT_MIN_ATTENDANCE: u8 = 75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SemesterStatus {
    NotConfigured,
    NotStarted,
    Active,
    Ended,
}

impl SemesterStatus {
    /// Where `today` falls relative to the configured window.
    pub fn of(semester: Option<&SemesterConfig>, today: NaiveDate) -> Self {
        match semester {
            None => SemesterStatus::NotConfigured,
            Some(config) if today < config.semester_start => SemesterStatus::NotStarted,
            Some(config) if today > config.semester_end => SemesterStatus::Ended,
            Some(_) => SemesterStatus::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectStats {
    pub subject_id: String,
    pub subject_name: String,
    pub conducted_classes: u32,
    pub attended_classes: u32,
    pub attendance_percentage: f64,
    /// Best-case lower bound: assumes every future class is attended.
    pub required_classes_to_target: u32,
}

impl SubjectStats {
    fn zeroed(entry: &TimetableEntry) -> Self {
        Self {
            subject_id: entry.subject_id.clone(),
            subject_name: entry.subject_name.clone(),
            conducted_classes: 0,
            attended_classes: 0,
            attendance_percentage: 0.0,
            required_classes_to_target: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverallStats {
    pub conducted_classes: u32,
    pub attended_classes: u32,
    pub attendance_percentage: f64,
    pub risk: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemesterStats {
    pub status: SemesterStatus,
    #[serde(with = "optional_ymd", skip_serializing_if = "Option::is_none")]
    pub semester_start: Option<NaiveDate>,
    #[serde(with = "optional_ymd", skip_serializing_if = "Option::is_none")]
    pub semester_end: Option<NaiveDate>,
    pub min_attendance: u8,
    pub overall: OverallStats,
    pub subjects: Vec<SubjectStats>,
}

impl SemesterStats {
    fn zeroed(
        status: SemesterStatus,
        semester: Option<&SemesterConfig>,
        timetable: &[TimetableEntry],
    ) -> Self {
        Self {
            status,
            semester_start: semester.map(|config| config.semester_start),
            semester_end: semester.map(|config| config.semester_end),
            min_attendance: semester.map_or(DEFAULT_MIN_ATTENDANCE, |config| config.min_attendance),
            overall: OverallStats::default(),
            subjects: timetable.iter().map(SubjectStats::zeroed).collect(),
        }
    }

    pub fn subject(&self, subject_id: &str) -> Option<&SubjectStats> {
        self.subjects
            .iter()
            .find(|subject| subject.subject_id == subject_id)
    }
}

/// Rounds half up to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `attended / conducted` as a rounded percentage; 0 when nothing was conducted.
pub fn attendance_percentage(attended: u32, conducted: u32) -> f64 {
    if conducted == 0 {
        return 0.0;
    }
    round2(f64::from(attended) / f64::from(conducted) * 100.0)
}

/// Smallest `x` with `(attended + x) / (conducted + x) >= target / 100`.
///
/// Assumes every one of those `x` future classes is attended. A target of
/// 100% or more can never be made up this way and reports 0 by convention.
pub fn required_classes_to_target(attended: u32, conducted: u32, target_percent: f64) -> u32 {
    let denominator = 100.0 - target_percent;
    if denominator <= 0.0 {
        return 0;
    }
    let numerator = target_percent * f64::from(conducted) - 100.0 * f64::from(attended);
    let required = (numerator / denominator).ceil();
    if required > 0.0 {
        required as u32
    } else {
        0
    }
}

/// Dates over which classes count as conducted: semester start up to today or
/// semester end, whichever comes first. `None` until the semester has started.
pub fn counting_window(semester: Option<&SemesterConfig>, today: NaiveDate) -> Option<DateRange> {
    let semester = semester?;
    if today < semester.semester_start {
        return None;
    }
    DateRange::new(semester.semester_start, min_date(today, semester.semester_end)).ok()
}

/// Computes semester statistics from scratch over the snapshot.
pub fn semester_stats(snapshot: &Snapshot, ctx: &EngineContext) -> Result<SemesterStats, DomainError> {
    let timetable = &snapshot.timetable;
    let Some(semester) = snapshot.semester.as_ref() else {
        return Ok(SemesterStats::zeroed(
            SemesterStatus::NotConfigured,
            None,
            timetable,
        ));
    };

    let status = SemesterStatus::of(Some(semester), ctx.today);
    if status == SemesterStatus::NotStarted {
        return Ok(SemesterStats::zeroed(status, Some(semester), timetable));
    }
    let effective_end = min_date(ctx.today, semester.semester_end);

    let mut conducted = vec![0u32; timetable.len()];
    let mut attended = vec![0u32; timetable.len()];
    for date in each_date_in_range(semester.semester_start, effective_end) {
        if snapshot.is_holiday(date) {
            continue;
        }
        let weekday = weekday_of(date, ctx.timezone)?;
        for (idx, entry) in timetable.iter().enumerate() {
            if !entry.has_session_on(weekday) {
                continue;
            }
            conducted[idx] += 1;
            if snapshot.attendance.is_present(date, &entry.subject_id) {
                attended[idx] += 1;
            }
        }
    }

    let target = f64::from(semester.min_attendance);
    let subjects: Vec<SubjectStats> = timetable
        .iter()
        .zip(conducted.iter().zip(attended.iter()))
        .map(|(entry, (&conducted, &attended))| SubjectStats {
            subject_id: entry.subject_id.clone(),
            subject_name: entry.subject_name.clone(),
            conducted_classes: conducted,
            attended_classes: attended,
            attendance_percentage: attendance_percentage(attended, conducted),
            required_classes_to_target: required_classes_to_target(attended, conducted, target),
        })
        .collect();

    let total_conducted: u32 = subjects.iter().map(|s| s.conducted_classes).sum();
    let total_attended: u32 = subjects.iter().map(|s| s.attended_classes).sum();
    let overall_percentage = attendance_percentage(total_attended, total_conducted);

    tracing::debug!(
        ?status,
        conducted = total_conducted,
        attended = total_attended,
        percentage = overall_percentage,
        "computed semester stats"
    );

    Ok(SemesterStats {
        status,
        semester_start: Some(semester.semester_start),
        semester_end: Some(semester.semester_end),
        min_attendance: semester.min_attendance,
        overall: OverallStats {
            conducted_classes: total_conducted,
            attended_classes: total_attended,
            attendance_percentage: overall_percentage,
            risk: overall_percentage < target,
        },
        subjects,
    })
}

mod optional_ymd {
    use chrono::NaiveDate;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => super::ymd::serialize(date, serializer),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_rounds_half_up() {
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(3.125), 3.13);
        assert_eq!(round2(50.0), 50.0);
    }

    #[test]
    fn percentage_guards_zero_conducted() {
        assert_eq!(attendance_percentage(0, 0), 0.0);
        assert_eq!(attendance_percentage(2, 3), 66.67);
        assert_eq!(attendance_percentage(3, 3), 100.0);
    }

    #[test]
    fn required_classes_examples() {
        assert_eq!(required_classes_to_target(2, 3, 75.0), 1);
        assert_eq!(required_classes_to_target(0, 4, 75.0), 12);
        assert_eq!(required_classes_to_target(10, 10, 75.0), 0);
        assert_eq!(required_classes_to_target(0, 0, 75.0), 0);
    }

    #[test]
    fn full_target_is_never_made_up() {
        assert_eq!(required_classes_to_target(1, 10, 100.0), 0);
    }

    #[test]
    fn counting_window_stops_at_today() {
        let config = SemesterConfig::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
            75,
        )
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let window = counting_window(Some(&config), today).unwrap();
        assert_eq!(window.end(), today);
        assert!(counting_window(Some(&config), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()).is_none());
        assert!(counting_window(None, today).is_none());
    }

    #[test]
    fn status_tracks_the_window() {
        let config = SemesterConfig::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            75,
        )
        .unwrap();
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        assert_eq!(SemesterStatus::of(None, day(5)), SemesterStatus::NotConfigured);
        assert_eq!(SemesterStatus::of(Some(&config), day(1)), SemesterStatus::Active);
        assert_eq!(SemesterStatus::of(Some(&config), day(31)), SemesterStatus::Active);
        assert_eq!(
            SemesterStatus::of(Some(&config), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()),
            SemesterStatus::NotStarted
        );
        assert_eq!(
            SemesterStatus::of(Some(&config), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()),
            SemesterStatus::Ended
        );
    }
}
