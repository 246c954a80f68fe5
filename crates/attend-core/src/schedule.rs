//! Resolves which subjects meet on a given weekday or date.

use std::{cmp::Ordering, collections::HashMap, collections::HashSet};

use attend_domain::{common::hhmm, DomainError, TimetableEntry, Weekday};
use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::Serialize;

use crate::calendar::weekday_of;

/// One subject's slot on a particular weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledClass {
    pub subject_id: String,
    pub subject_name: String,
    pub weekday: Weekday,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

/// Identity of a subject without its schedule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SubjectRef {
    pub subject_id: String,
    pub subject_name: String,
}

/// Subjects meeting on `weekday`, ordered by start time and then subject name.
pub fn classes_scheduled_on(timetable: &[TimetableEntry], weekday: Weekday) -> Vec<ScheduledClass> {
    let mut classes: Vec<ScheduledClass> = timetable
        .iter()
        .filter_map(|entry| {
            entry.session_on(weekday).map(|session| ScheduledClass {
                subject_id: entry.subject_id.clone(),
                subject_name: entry.subject_name.clone(),
                weekday,
                start_time: session.start_time,
                end_time: session.end_time,
            })
        })
        .collect();
    classes.sort_by(schedule_order);
    classes
}

pub fn classes_scheduled_on_date(
    timetable: &[TimetableEntry],
    date: NaiveDate,
    timezone: Tz,
) -> Result<Vec<ScheduledClass>, DomainError> {
    let weekday = weekday_of(date, timezone)?;
    Ok(classes_scheduled_on(timetable, weekday))
}

/// Unique subjects in first-seen order.
pub fn distinct_subjects(classes: &[ScheduledClass]) -> Vec<SubjectRef> {
    let mut seen = HashSet::new();
    classes
        .iter()
        .filter(|class| seen.insert(class.subject_id.as_str()))
        .map(|class| SubjectRef {
            subject_id: class.subject_id.clone(),
            subject_name: class.subject_name.clone(),
        })
        .collect()
}

fn schedule_order(a: &ScheduledClass, b: &ScheduledClass) -> Ordering {
    a.start_time
        .cmp(&b.start_time)
        .then_with(|| a.subject_name.cmp(&b.subject_name))
}

/// A timetable bucketed by weekday, for resolving many dates in a row.
#[derive(Debug, Clone, Default)]
pub struct WeeklySchedule {
    by_weekday: HashMap<Weekday, Vec<ScheduledClass>>,
}

impl WeeklySchedule {
    pub fn from_timetable(timetable: &[TimetableEntry]) -> Self {
        let by_weekday = Weekday::ALL
            .into_iter()
            .map(|weekday| (weekday, classes_scheduled_on(timetable, weekday)))
            .filter(|(_, classes)| !classes.is_empty())
            .collect();
        Self { by_weekday }
    }

    pub fn for_weekday(&self, weekday: Weekday) -> &[ScheduledClass] {
        self.by_weekday
            .get(&weekday)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn for_date(&self, date: NaiveDate, timezone: Tz) -> Result<&[ScheduledClass], DomainError> {
        Ok(self.for_weekday(weekday_of(date, timezone)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attend_domain::Session;

    fn session(weekday: Weekday, start: &str, end: &str) -> Session {
        Session::new(
            weekday,
            attend_domain::parse_time(start).unwrap(),
            attend_domain::parse_time(end).unwrap(),
        )
        .unwrap()
    }

    fn timetable() -> Vec<TimetableEntry> {
        vec![
            TimetableEntry::new(
                "PHY",
                "Physics",
                vec![
                    session(Weekday::Monday, "10:00", "11:00"),
                    session(Weekday::Tuesday, "09:00", "10:00"),
                ],
            )
            .unwrap(),
            TimetableEntry::new("CHE", "Chemistry", vec![session(Weekday::Monday, "10:00", "11:00")])
                .unwrap(),
            TimetableEntry::new("MAT", "Maths", vec![session(Weekday::Monday, "08:30", "09:30")])
                .unwrap(),
        ]
    }

    #[test]
    fn sorts_by_start_time_then_name() {
        let names: Vec<_> = classes_scheduled_on(&timetable(), Weekday::Monday)
            .into_iter()
            .map(|class| class.subject_name)
            .collect();
        assert_eq!(names, ["Maths", "Chemistry", "Physics"]);
    }

    #[test]
    fn empty_day_has_no_classes() {
        assert!(classes_scheduled_on(&timetable(), Weekday::Sunday).is_empty());
        let schedule = WeeklySchedule::from_timetable(&timetable());
        assert!(schedule.for_weekday(Weekday::Sunday).is_empty());
        assert_eq!(schedule.for_weekday(Weekday::Tuesday).len(), 1);
    }

    #[test]
    fn resolves_by_date() {
        // 2024-01-02 is a Tuesday.
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let classes = classes_scheduled_on_date(&timetable(), date, Tz::Asia__Kolkata).unwrap();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].subject_id, "PHY");
    }

    #[test]
    fn distinct_subjects_keeps_first_occurrence() {
        let mut classes = classes_scheduled_on(&timetable(), Weekday::Monday);
        classes.push(classes[0].clone());
        let subjects = distinct_subjects(&classes);
        assert_eq!(subjects.len(), 3);
        assert_eq!(subjects[0].subject_id, "MAT");
    }
}
