use attend_core::{
    month_view::month_view, stats::semester_stats, EngineContext, Snapshot, Tz, YearMonth,
};
use attend_domain::{
    AttendanceRecord, AttendanceStatus, Holiday, SemesterConfig, Session, TimetableEntry, Weekday,
};
use chrono::{Duration, NaiveDate, NaiveTime};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn build_year_snapshot(subject_count: usize) -> Snapshot {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let semester = SemesterConfig::new(start, end, 75).unwrap();

    let timetable: Vec<TimetableEntry> = (0..subject_count)
        .map(|idx| {
            let sessions = Weekday::ALL
                .into_iter()
                .skip(idx % 3)
                .step_by(2)
                .map(|weekday| {
                    Session::new(
                        weekday,
                        NaiveTime::from_hms_opt(8 + (idx % 8) as u32, 0, 0).unwrap(),
                        NaiveTime::from_hms_opt(9 + (idx % 8) as u32, 0, 0).unwrap(),
                    )
                    .unwrap()
                })
                .collect();
            TimetableEntry::new(&format!("SUB{idx:02}"), &format!("Subject {idx}"), sessions).unwrap()
        })
        .collect();

    let holidays = (0..365)
        .step_by(17)
        .map(|offset| Holiday::new(start + Duration::days(offset), "Break").unwrap());

    let attendance = (0..365).flat_map(|offset| {
        let date = start + Duration::days(offset);
        timetable
            .iter()
            .enumerate()
            .filter(move |(idx, _)| (offset as usize + idx) % 4 != 0)
            .map(move |(_, entry)| {
                AttendanceRecord::new(date, &entry.subject_id, AttendanceStatus::Present).unwrap()
            })
            .collect::<Vec<_>>()
    });

    Snapshot::new(Some(semester), timetable.clone(), holidays, attendance)
}

fn bench_engine(c: &mut Criterion) {
    let snapshot = build_year_snapshot(black_box(12));
    let ctx = EngineContext::new(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(), Tz::Asia__Kolkata);

    c.bench_function("semester_stats_full_year_12_subjects", |b| {
        b.iter(|| {
            let stats = semester_stats(&snapshot, &ctx).expect("stats");
            black_box(stats);
        })
    });

    let month = YearMonth::new(2024, 7).unwrap();
    c.bench_function("month_view_grid", |b| {
        b.iter(|| {
            let view = month_view(&snapshot, Some(month), &ctx).expect("view");
            black_box(view);
        })
    });
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
