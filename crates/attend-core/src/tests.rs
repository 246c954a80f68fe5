use attend_domain::{AttendanceRecord, AttendanceStatus, DateRange, Holiday, Session, Weekday};
use chrono::{NaiveDate, NaiveTime};

use crate::{
    analytics_service::AnalyticsService, attendance_service::AttendanceService,
    holiday_service::HolidayService, month_view::month_view, semester_service::SemesterService,
    simulator::MissAllowance, stats::semester_stats, timetable_service::TimetableService,
    AttendanceStore, CalendarStatus, CoreError, EngineContext, MemoryStore, SemesterStatus,
    Snapshot, Tz, YearMonth,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn session(weekday: Weekday) -> Session {
    Session::new(
        weekday,
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
    )
    .unwrap()
}

fn ctx(today: NaiveDate) -> EngineContext {
    EngineContext::new(today, Tz::Asia__Kolkata)
}

/// Physics on Mon/Wed/Fri, semester 2024-01-01..10, holiday on Wed 3rd.
fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    SemesterService::configure(&store, date(2024, 1, 1), date(2024, 1, 10), 75).expect("semester");
    TimetableService::create(
        &store,
        "PHY",
        "Physics",
        vec![
            session(Weekday::Monday),
            session(Weekday::Wednesday),
            session(Weekday::Friday),
        ],
    )
    .expect("subject");
    HolidayService::create(&store, date(2024, 1, 3), "Founders Day").expect("holiday");
    let marking = ctx(date(2024, 1, 9));
    for (day, status) in [
        (1, AttendanceStatus::Present),
        (5, AttendanceStatus::Absent),
        (8, AttendanceStatus::Present),
    ] {
        AttendanceService::mark(&store, &marking, date(2024, 1, day), "PHY", status).unwrap();
    }
    store
}

#[test]
fn semester_scenario_counts_conducted_and_attended() {
    let store = seeded_store();
    let stats = AnalyticsService::semester_stats(&store, &ctx(date(2024, 1, 9))).expect("stats");

    assert_eq!(stats.status, SemesterStatus::Active);
    let physics = stats.subject("PHY").expect("physics stats");
    assert_eq!(physics.conducted_classes, 3);
    assert_eq!(physics.attended_classes, 2);
    assert_eq!(physics.attendance_percentage, 66.67);
    assert_eq!(physics.required_classes_to_target, 1);
    assert_eq!(stats.overall.attendance_percentage, 66.67);
    assert!(stats.overall.risk);
}

#[test]
fn ended_semester_stops_counting_at_semester_end() {
    let store = seeded_store();
    let stats = AnalyticsService::semester_stats(&store, &ctx(date(2024, 2, 1))).unwrap();
    assert_eq!(stats.status, SemesterStatus::Ended);
    // Wed 10th is now conducted and unmarked.
    assert_eq!(stats.overall.conducted_classes, 4);
    assert_eq!(stats.overall.attended_classes, 2);
}

#[test]
fn not_started_semester_ignores_existing_records() {
    let store = seeded_store();
    let stats = AnalyticsService::semester_stats(&store, &ctx(date(2023, 12, 20))).unwrap();
    assert_eq!(stats.status, SemesterStatus::NotStarted);
    assert_eq!(stats.overall.conducted_classes, 0);
    assert!(stats
        .subjects
        .iter()
        .all(|s| s.conducted_classes == 0 && s.attended_classes == 0));
    assert!(!stats.overall.risk);
}

#[test]
fn missing_semester_reports_not_configured() {
    let store = MemoryStore::new();
    TimetableService::create(&store, "PHY", "Physics", vec![session(Weekday::Monday)]).unwrap();
    let stats = AnalyticsService::semester_stats(&store, &ctx(date(2024, 1, 9))).unwrap();
    assert_eq!(stats.status, SemesterStatus::NotConfigured);
    assert_eq!(stats.min_attendance, 75);
    assert_eq!(stats.subjects.len(), 1);
    assert!(stats.semester_start.is_none());
}

#[test]
fn stats_are_idempotent() {
    let store = seeded_store();
    let context = ctx(date(2024, 1, 9));
    let window = DateRange::new(date(2024, 1, 1), date(2024, 1, 9)).unwrap();
    let snapshot = Snapshot::load(&store, Some(window)).unwrap();
    let first = semester_stats(&snapshot, &context).unwrap();
    let second = semester_stats(&snapshot, &context).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.overall.attendance_percentage.to_bits(),
        second.overall.attendance_percentage.to_bits()
    );
}

#[test]
fn month_view_resolves_statuses() {
    let store = seeded_store();
    let view = AnalyticsService::month_view(&store, YearMonth::new(2024, 1).ok(), &ctx(date(2024, 1, 9)))
        .expect("month view");

    assert_eq!(view.days.len(), 42);
    assert_eq!(view.days.iter().filter(|day| day.in_month).count(), 31);
    assert_eq!(view.days[0].date, date(2023, 12, 31));
    assert_eq!(view.prev_month.to_string(), "2023-12");
    assert_eq!(view.next_month.to_string(), "2024-02");

    let status_on = |d: u32| {
        let day = view
            .days
            .iter()
            .find(|day| day.date == date(2024, 1, d))
            .expect("day in grid");
        day.subjects.first().map(|subject| subject.status)
    };
    assert_eq!(status_on(1), Some(CalendarStatus::Present));
    assert_eq!(status_on(3), Some(CalendarStatus::Holiday));
    assert_eq!(status_on(5), Some(CalendarStatus::Absent));
    assert_eq!(status_on(10), Some(CalendarStatus::Future));
    assert_eq!(status_on(2), None);
    assert!(view.days.iter().any(|day| day.is_today && day.date == date(2024, 1, 9)));
}

#[test]
fn unmarked_past_class_defaults_to_absent() {
    let snapshot = Snapshot::new(
        None,
        vec![attend_domain::TimetableEntry::new("PHY", "Physics", vec![session(Weekday::Tuesday)]).unwrap()],
        Vec::<Holiday>::new(),
        Vec::<AttendanceRecord>::new(),
    );
    let view = month_view(&snapshot, YearMonth::new(2024, 1).ok(), &ctx(date(2024, 1, 31))).unwrap();
    let tuesday = view.days.iter().find(|day| day.date == date(2024, 1, 2)).unwrap();
    assert_eq!(tuesday.subjects[0].status, CalendarStatus::Absent);
}

#[test]
fn holiday_overrides_recorded_attendance() {
    let store = seeded_store();
    // Written before the date became a holiday.
    store
        .write_attendance(&[
            AttendanceRecord::new(date(2024, 1, 3), "PHY", AttendanceStatus::Present).unwrap(),
        ])
        .unwrap();
    let view = AnalyticsService::month_view(&store, None, &ctx(date(2024, 1, 9))).unwrap();
    let holiday = view.days.iter().find(|day| day.date == date(2024, 1, 3)).unwrap();
    assert!(holiday.is_holiday);
    assert_eq!(holiday.subjects[0].status, CalendarStatus::Holiday);

    let stats = AnalyticsService::semester_stats(&store, &ctx(date(2024, 1, 9))).unwrap();
    assert_eq!(stats.overall.conducted_classes, 3);
}

#[test]
fn simulator_view_projects_today() {
    let store = seeded_store();
    // Monday the 8th has Physics.
    let view = AnalyticsService::simulator_view(&store, &ctx(date(2024, 1, 8))).unwrap();
    assert_eq!(view.today_subjects.len(), 1);

    let projection = view.project_subject("PHY", 1).unwrap();
    assert_eq!(projection.projected_percentage, 50.0);
    assert_eq!(projection.max_additional_misses, MissAllowance::Limited(0));

    let full_day = view.project_full_days(2);
    assert_eq!(full_day.extra_misses, 2);

    assert!(matches!(
        view.project_subject("MAT", 1),
        Err(CoreError::SubjectNotFound(id)) if id == "MAT"
    ));
    assert_eq!(view.miss_allowances().len(), 1);
}

#[test]
fn timetable_service_rejects_duplicates_and_missing() {
    let store = MemoryStore::new();
    TimetableService::create(&store, "PHY", "Physics", vec![session(Weekday::Monday)]).unwrap();
    assert!(matches!(
        TimetableService::create(&store, "PHY", "Physics II", vec![session(Weekday::Friday)]),
        Err(CoreError::SubjectExists(_))
    ));
    assert!(matches!(
        TimetableService::update(&store, "CHE", "Chemistry", vec![session(Weekday::Friday)]),
        Err(CoreError::SubjectNotFound(_))
    ));
    TimetableService::update(&store, "PHY", "Applied Physics", vec![session(Weekday::Friday)]).unwrap();
    let classes = TimetableService::classes_for_date(&store, date(2024, 1, 5), Tz::UTC).unwrap();
    assert_eq!(classes[0].subject_name, "Applied Physics");

    TimetableService::delete(&store, "PHY").unwrap();
    assert!(TimetableService::list(&store).unwrap().is_empty());
    assert!(matches!(
        TimetableService::delete(&store, "PHY"),
        Err(CoreError::SubjectNotFound(_))
    ));
}

#[test]
fn timetable_list_is_sorted_by_name() {
    let store = MemoryStore::new();
    TimetableService::create(&store, "ZZ", "Zoology", vec![session(Weekday::Monday)]).unwrap();
    TimetableService::create(&store, "AN", "Anatomy", vec![session(Weekday::Monday)]).unwrap();
    let names: Vec<_> = TimetableService::list(&store)
        .unwrap()
        .into_iter()
        .map(|entry| entry.subject_name)
        .collect();
    assert_eq!(names, ["Anatomy", "Zoology"]);
}

#[test]
fn holiday_service_lifecycle() {
    let store = MemoryStore::new();
    HolidayService::create(&store, date(2024, 1, 26), "Republic Day").unwrap();
    assert!(matches!(
        HolidayService::create(&store, date(2024, 1, 26), "Again"),
        Err(CoreError::HolidayExists(_))
    ));
    HolidayService::update(&store, date(2024, 1, 26), date(2024, 1, 26), "National holiday").unwrap();
    HolidayService::update(&store, date(2024, 1, 26), date(2024, 1, 27), "Moved").unwrap();
    assert!(!HolidayService::is_holiday(&store, date(2024, 1, 26)).unwrap());
    assert!(HolidayService::is_holiday(&store, date(2024, 1, 27)).unwrap());
    assert!(matches!(
        HolidayService::update(&store, date(2024, 1, 26), date(2024, 1, 26), "Gone"),
        Err(CoreError::HolidayNotFound(_))
    ));

    let written = HolidayService::add_range(&store, date(2024, 5, 1), date(2024, 5, 7), "Break").unwrap();
    assert_eq!(written, 7);
    assert_eq!(HolidayService::list(&store).unwrap().len(), 8);
    assert!(matches!(
        HolidayService::add_range(&store, date(2024, 5, 7), date(2024, 5, 1), "Break"),
        Err(CoreError::Domain(attend_domain::DomainError::InvalidDateRange { .. }))
    ));

    HolidayService::delete(&store, date(2024, 1, 27)).unwrap();
    assert!(matches!(
        HolidayService::delete(&store, date(2024, 1, 27)),
        Err(CoreError::HolidayNotFound(_))
    ));
}

/// Physics and Chemistry on Tuesdays, nothing else.
fn tuesday_store() -> MemoryStore {
    let store = MemoryStore::new();
    TimetableService::create(&store, "PHY", "Physics", vec![session(Weekday::Tuesday)]).unwrap();
    TimetableService::create(&store, "CHE", "Chemistry", vec![session(Weekday::Tuesday)]).unwrap();
    store
}

#[test]
fn mark_present_trims_and_dedupes() {
    let store = tuesday_store();
    let today = ctx(date(2024, 1, 9));
    let count = AttendanceService::mark_present(
        &store,
        &today,
        date(2024, 1, 2),
        [" PHY ", "PHY", "", "CHE"],
    )
    .unwrap();
    assert_eq!(count, 2);
    let statuses = AttendanceService::statuses_for_date(&store, date(2024, 1, 2)).unwrap();
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses.get("PHY"), Some(&AttendanceStatus::Present));

    AttendanceService::mark(&store, &today, date(2024, 1, 2), "PHY", AttendanceStatus::Absent).unwrap();
    let statuses = AttendanceService::statuses_for_date(&store, date(2024, 1, 2)).unwrap();
    assert_eq!(statuses.get("PHY"), Some(&AttendanceStatus::Absent));
}

#[test]
fn marking_rejects_future_holiday_and_unscheduled_classes() {
    let store = seeded_store();
    let today = ctx(date(2024, 1, 9));
    let mark = |d: u32, subject: &str| {
        AttendanceService::mark(&store, &today, date(2024, 1, d), subject, AttendanceStatus::Present)
    };

    assert!(matches!(mark(10, "PHY"), Err(CoreError::FutureDate(d)) if d == date(2024, 1, 10)));
    assert!(matches!(mark(3, "PHY"), Err(CoreError::MarkOnHoliday(d)) if d == date(2024, 1, 3)));
    assert!(matches!(
        mark(2, "PHY"),
        Err(CoreError::NotScheduled { subject_id, date: d }) if subject_id == "PHY" && d == date(2024, 1, 2)
    ));
    assert!(matches!(mark(8, "XYZ"), Err(CoreError::NotScheduled { .. })));

    // None of the rejected marks reached the log.
    let stats = AnalyticsService::semester_stats(&store, &ctx(date(2024, 1, 16))).unwrap();
    assert_eq!(stats.overall.attended_classes, 2);
    assert!(AttendanceService::statuses_for_date(&store, date(2024, 1, 10)).unwrap().is_empty());
}

#[test]
fn mark_present_is_all_or_nothing() {
    let store = tuesday_store();
    let today = ctx(date(2024, 1, 9));
    let result = AttendanceService::mark_present(&store, &today, date(2024, 1, 2), ["PHY", "MTH"]);
    assert!(matches!(result, Err(CoreError::NotScheduled { subject_id, .. }) if subject_id == "MTH"));
    assert!(AttendanceService::statuses_for_date(&store, date(2024, 1, 2)).unwrap().is_empty());
    assert!(matches!(
        AttendanceService::mark_present(&store, &today, date(2024, 1, 16), ["PHY"]),
        Err(CoreError::FutureDate(_))
    ));
}

#[test]
fn mark_all_present_today_covers_every_class() {
    let store = tuesday_store();
    let tuesday = ctx(date(2024, 1, 9));
    assert_eq!(AttendanceService::mark_all_present_today(&store, &tuesday).unwrap(), 2);
    let statuses = AttendanceService::statuses_for_date(&store, date(2024, 1, 9)).unwrap();
    assert!(statuses.values().all(|status| status.is_present()));

    let wednesday = ctx(date(2024, 1, 10));
    assert!(matches!(
        AttendanceService::mark_all_present_today(&store, &wednesday),
        Err(CoreError::NoClassesScheduled(d)) if d == date(2024, 1, 10)
    ));

    HolidayService::create(&store, date(2024, 1, 16), "Harvest").unwrap();
    assert!(matches!(
        AttendanceService::mark_all_present_today(&store, &ctx(date(2024, 1, 16))),
        Err(CoreError::MarkOnHoliday(_))
    ));
}

#[test]
fn semester_service_validates_window() {
    let store = MemoryStore::new();
    assert!(matches!(SemesterService::require(&store), Err(CoreError::SemesterNotConfigured)));
    assert!(SemesterService::configure(&store, date(2024, 2, 1), date(2024, 1, 1), 75).is_err());
    assert!(SemesterService::configure(&store, date(2024, 1, 1), date(2024, 5, 1), 0).is_err());
    let config = SemesterService::configure(&store, date(2024, 1, 1), date(2024, 5, 1), 80).unwrap();
    assert_eq!(SemesterService::current(&store).unwrap(), Some(config));
}

#[test]
fn views_serialize_with_wire_names() {
    let store = seeded_store();
    let stats = AnalyticsService::semester_stats(&store, &ctx(date(2023, 12, 1))).unwrap();
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["status"], "not_started");
    assert_eq!(json["semester_start"], "2024-01-01");

    let view = AnalyticsService::month_view(&store, None, &ctx(date(2024, 1, 9))).unwrap();
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["month"], "2024-01");
    assert_eq!(json["days"][0]["date"], "2023-12-31");
    let holiday = json["days"]
        .as_array()
        .unwrap()
        .iter()
        .find(|day| day["date"] == "2024-01-03")
        .expect("holiday in grid");
    assert_eq!(holiday["subjects"][0]["status"], "holiday");
    assert_eq!(holiday["subjects"][0]["start_time"], "09:00");
}
