//! "What if I skip" projections over the current counts.

use std::fmt;

use serde::Serialize;

use crate::{
    schedule::{distinct_subjects, ScheduledClass, SubjectRef},
    stats::{attendance_percentage, round2, SubjectStats},
};

/// How many more classes can be missed while staying on target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum MissAllowance {
    Limited(u32),
    Unlimited,
}

impl MissAllowance {
    pub fn limit(self) -> Option<u32> {
        match self {
            MissAllowance::Limited(count) => Some(count),
            MissAllowance::Unlimited => None,
        }
    }
}

impl fmt::Display for MissAllowance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissAllowance::Limited(count) => write!(f, "{count}"),
            MissAllowance::Unlimited => f.write_str("no limit"),
        }
    }
}

/// Percentage after `extra_misses` more conducted-but-missed classes.
///
/// Negative miss counts are treated as zero.
pub fn projected_percentage(attended: u32, conducted: u32, extra_misses: i64) -> f64 {
    let denominator = i64::from(conducted) + extra_misses.max(0);
    if denominator <= 0 {
        return 0.0;
    }
    round2(f64::from(attended) / denominator as f64 * 100.0)
}

/// Largest `k` with `attended / (conducted + k) >= target / 100`.
pub fn max_additional_misses(attended: u32, conducted: u32, target_percent: f64) -> MissAllowance {
    if target_percent <= 0.0 {
        return MissAllowance::Unlimited;
    }
    let ceiling = (f64::from(attended) * 100.0 / target_percent).floor() - f64::from(conducted);
    if ceiling > 0.0 {
        MissAllowance::Limited(ceiling.min(f64::from(u32::MAX)) as u32)
    } else {
        MissAllowance::Limited(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectProjection {
    pub subject_id: String,
    pub subject_name: String,
    pub extra_misses: u32,
    pub current_percentage: f64,
    pub projected_percentage: f64,
    pub max_additional_misses: MissAllowance,
}

pub fn project_subject(stats: &SubjectStats, extra_misses: u32, target_percent: f64) -> SubjectProjection {
    SubjectProjection {
        subject_id: stats.subject_id.clone(),
        subject_name: stats.subject_name.clone(),
        extra_misses,
        current_percentage: stats.attendance_percentage,
        projected_percentage: projected_percentage(
            stats.attended_classes,
            stats.conducted_classes,
            i64::from(extra_misses),
        ),
        max_additional_misses: max_additional_misses(
            stats.attended_classes,
            stats.conducted_classes,
            target_percent,
        ),
    }
}

/// Skipping whole days like today: every distinct subject on the day counts
/// as one extra miss per skipped day, applied to the overall totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullDayProjection {
    pub subjects: Vec<SubjectRef>,
    pub days_skipped: u32,
    pub extra_misses: i64,
    pub current_percentage: f64,
    pub projected_percentage: f64,
}

pub fn full_day_projection(
    attended: u32,
    conducted: u32,
    classes: &[ScheduledClass],
    days: i64,
) -> FullDayProjection {
    let subjects = distinct_subjects(classes);
    let days_skipped = days.clamp(0, i64::from(u32::MAX)) as u32;
    let extra_misses = (subjects.len() as i64).saturating_mul(i64::from(days_skipped));
    FullDayProjection {
        current_percentage: attendance_percentage(attended, conducted),
        projected_percentage: projected_percentage(attended, conducted, extra_misses),
        subjects,
        days_skipped,
        extra_misses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attend_domain::Weekday;
    use chrono::NaiveTime;

    fn class(id: &str, hour: u32) -> ScheduledClass {
        ScheduledClass {
            subject_id: id.into(),
            subject_name: format!("{id} name"),
            weekday: Weekday::Monday,
            start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(hour + 1, 0, 0).unwrap(),
        }
    }

    #[test]
    fn projection_grows_the_denominator() {
        assert_eq!(projected_percentage(8, 10, 0), 80.0);
        assert_eq!(projected_percentage(8, 10, 2), 66.67);
        assert_eq!(projected_percentage(8, 10, -5), 80.0);
        assert_eq!(projected_percentage(0, 0, 0), 0.0);
        assert_eq!(projected_percentage(0, 0, 3), 0.0);
    }

    #[test]
    fn max_misses_closed_form() {
        assert_eq!(max_additional_misses(18, 20, 75.0), MissAllowance::Limited(4));
        assert_eq!(max_additional_misses(2, 3, 75.0), MissAllowance::Limited(0));
        assert_eq!(max_additional_misses(0, 0, 75.0), MissAllowance::Limited(0));
        assert_eq!(max_additional_misses(5, 5, 0.0), MissAllowance::Unlimited);
        assert_eq!(MissAllowance::Unlimited.limit(), None);
    }

    #[test]
    fn max_misses_keeps_projection_on_target() {
        let MissAllowance::Limited(k) = max_additional_misses(18, 20, 75.0) else {
            panic!("expected a limit");
        };
        assert!(projected_percentage(18, 20, i64::from(k)) >= 75.0);
        assert!(projected_percentage(18, 20, i64::from(k) + 1) < 75.0);
    }

    #[test]
    fn full_day_counts_each_subject_once() {
        let classes = vec![class("PHY", 9), class("CHE", 10), class("PHY", 11)];
        let projection = full_day_projection(10, 10, &classes, 2);
        assert_eq!(projection.subjects.len(), 2);
        assert_eq!(projection.extra_misses, 4);
        assert_eq!(projection.current_percentage, 100.0);
        assert_eq!(projection.projected_percentage, 71.43);
    }

    #[test]
    fn full_day_ignores_negative_days() {
        let projection = full_day_projection(3, 4, &[class("PHY", 9)], -3);
        assert_eq!(projection.days_skipped, 0);
        assert_eq!(projection.projected_percentage, 75.0);
    }
}
