//! Six-week calendar grid with a resolved status for every scheduled class.

use attend_domain::{common::hhmm, common::ymd, DateRange, DomainError};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::Serialize;

use crate::{
    calendar::{weekday_of, YearMonth},
    schedule::WeeklySchedule,
    snapshot::{AttendanceLog, Snapshot},
    time::EngineContext,
};

/// Cells in the grid: six Sunday-first weeks.
pub const GRID_CELLS: usize = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarStatus {
    Present,
    Absent,
    Holiday,
    Future,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarSubject {
    pub subject_id: String,
    pub subject_name: String,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub status: CalendarStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    #[serde(with = "ymd")]
    pub date: NaiveDate,
    pub day_number: u32,
    pub in_month: bool,
    pub is_today: bool,
    pub is_holiday: bool,
    pub is_future: bool,
    pub subjects: Vec<CalendarSubject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarMonthView {
    pub month: YearMonth,
    pub prev_month: YearMonth,
    pub next_month: YearMonth,
    pub days: Vec<CalendarDay>,
}

/// The 42 dates shown for `month`, starting at the Sunday on or before the 1st.
pub fn grid_range(month: YearMonth, timezone: Tz) -> Result<DateRange, DomainError> {
    let first = month.first_day();
    let leading = weekday_of(first, timezone)?.days_from_sunday();
    let start = first - Duration::days(i64::from(leading));
    DateRange::new(start, start + Duration::days(GRID_CELLS as i64 - 1))
}

/// Holiday beats future, future beats the attendance log, and anything not
/// marked present is absent.
pub fn resolve_status(
    is_holiday: bool,
    is_future: bool,
    log: &AttendanceLog,
    date: NaiveDate,
    subject_id: &str,
) -> CalendarStatus {
    if is_holiday {
        CalendarStatus::Holiday
    } else if is_future {
        CalendarStatus::Future
    } else if log.is_present(date, subject_id) {
        CalendarStatus::Present
    } else {
        CalendarStatus::Absent
    }
}

/// Builds the grid for `month`, defaulting to the month containing today.
pub fn month_view(
    snapshot: &Snapshot,
    month: Option<YearMonth>,
    ctx: &EngineContext,
) -> Result<CalendarMonthView, DomainError> {
    let month = month.unwrap_or_else(|| YearMonth::of(ctx.today));
    let range = grid_range(month, ctx.timezone)?;
    let schedule = WeeklySchedule::from_timetable(&snapshot.timetable);

    let days = range
        .dates()
        .map(|date| -> Result<CalendarDay, DomainError> {
            let is_holiday = snapshot.is_holiday(date);
            let is_future = date > ctx.today;
            let subjects = schedule
                .for_date(date, ctx.timezone)?
                .iter()
                .map(|class| CalendarSubject {
                    subject_id: class.subject_id.clone(),
                    subject_name: class.subject_name.clone(),
                    start_time: class.start_time,
                    end_time: class.end_time,
                    status: resolve_status(
                        is_holiday,
                        is_future,
                        &snapshot.attendance,
                        date,
                        &class.subject_id,
                    ),
                })
                .collect();
            Ok(CalendarDay {
                date,
                day_number: date.day(),
                in_month: month.contains(date),
                is_today: date == ctx.today,
                is_holiday,
                is_future,
                subjects,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CalendarMonthView {
        month,
        prev_month: month.shift(-1)?,
        next_month: month.shift(1)?,
        days,
    })
}
