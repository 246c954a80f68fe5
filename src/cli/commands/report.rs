//! Read-only views: semester stats, the month calendar, and today's classes.

use attend_core::{
    AnalyticsService, AttendanceService, CalendarDay, CalendarStatus, SemesterStatus,
    TimetableService,
};
use attend_domain::{format_time, DateRange};

use super::{calendar_label, month_label, percent_against, status_label};
use crate::cli::args;
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output::{hint, info, section, success, warning};
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Alignment, Table};

const WEEKDAY_HEADER: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const CELL_WIDTH: usize = 6;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "stats",
            "Attendance per subject and overall for the semester so far",
            "stats [--json]",
            cmd_stats,
        ),
        CommandEntry::new(
            "calendar",
            "Month grid with the status of every scheduled class",
            "calendar [YYYY-MM] [--json]",
            cmd_calendar,
        ),
        CommandEntry::new(
            "today",
            "Classes scheduled today and how they were marked",
            "today",
            cmd_today,
        ),
    ]
}

fn cmd_stats(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (_, json) = args::json_flag(args);
    let stats = AnalyticsService::semester_stats(context.store(), &context.engine_context())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    section("Semester attendance");
    match (stats.semester_start, stats.semester_end) {
        (Some(start), Some(end)) => info(format!(
            "Semester {start} to {end} ({}), target {}%",
            status_label(stats.status),
            stats.min_attendance
        )),
        _ => {
            warning("Semester is not configured; nothing is counted yet.");
            hint("Try `semester set 2024-01-01 2024-05-31 75`.");
            return Ok(());
        }
    }
    if stats.status == SemesterStatus::NotStarted {
        info("The semester has not started yet.");
    }
    if stats.subjects.is_empty() {
        info("No subjects in the timetable. Add one with `subject add`.");
        return Ok(());
    }

    let mut table = Table::new(&[
        ("Subject", Alignment::Left),
        ("Name", Alignment::Left),
        ("Conducted", Alignment::Right),
        ("Attended", Alignment::Right),
        ("%", Alignment::Right),
        ("Needed", Alignment::Right),
    ]);
    for subject in &stats.subjects {
        table.push_row(vec![
            subject.subject_id.clone(),
            subject.subject_name.clone(),
            subject.conducted_classes.to_string(),
            subject.attended_classes.to_string(),
            percent_against(subject.attendance_percentage, stats.min_attendance),
            subject.required_classes_to_target.to_string(),
        ]);
    }
    info(table.render());

    let overall = &stats.overall;
    info(format!(
        "Overall: {}/{} attended ({})",
        overall.attended_classes,
        overall.conducted_classes,
        percent_against(overall.attendance_percentage, stats.min_attendance)
    ));
    if overall.risk {
        warning(format!(
            "Overall attendance is below the {}% target.",
            stats.min_attendance
        ));
    } else if overall.conducted_classes > 0 {
        success("On track.");
    }
    Ok(())
}

fn cmd_calendar(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (rest, json) = args::json_flag(args);
    let month = args::month(rest.first().copied())?;
    let view = AnalyticsService::month_view(context.store(), month, &context.engine_context())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    section(month_label(view.month));
    let header: String = WEEKDAY_HEADER
        .iter()
        .map(|day| format!("{day:>width$}", width = CELL_WIDTH))
        .collect();
    info(header);
    for week in view.days.chunks(7) {
        info(week.iter().map(render_cell).collect::<String>());
    }
    info("");
    info("P all present  A none present  ~ some present  H holiday  - upcoming  [n] today");
    info(format!("prev: {}  next: {}", view.prev_month, view.next_month));
    Ok(())
}

fn render_cell(day: &CalendarDay) -> String {
    if !day.in_month {
        return " ".repeat(CELL_WIDTH);
    }
    let number = if day.is_today {
        format!("[{}]", day.day_number)
    } else {
        day.day_number.to_string()
    };
    format!("{:>w$}{:<1}", number, day_marker(day), w = CELL_WIDTH - 1)
}

fn day_marker(day: &CalendarDay) -> &'static str {
    if day.is_holiday {
        return "H";
    }
    if day.subjects.is_empty() {
        return " ";
    }
    if day.is_future {
        return "-";
    }
    let present = day
        .subjects
        .iter()
        .filter(|subject| subject.status == CalendarStatus::Present)
        .count();
    match present {
        0 => "A",
        n if n == day.subjects.len() => "P",
        _ => "~",
    }
}

fn cmd_today(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let today = context.today();
    let store = context.store();
    section(format!("{} ({})", today, today.format("%A")));

    if let Some(holiday) = store.fetch_holidays(DateRange::single(today))?.first() {
        info(format!("Holiday: {}", holiday.reason));
        return Ok(());
    }

    let classes = TimetableService::classes_for_date(store, today, context.timezone())?;
    if classes.is_empty() {
        info("No classes scheduled.");
        return Ok(());
    }
    let statuses = AttendanceService::statuses_for_date(store, today)?;
    let mut table = Table::new(&[
        ("Time", Alignment::Left),
        ("Subject", Alignment::Left),
        ("Name", Alignment::Left),
        ("Status", Alignment::Left),
    ]);
    for class in &classes {
        let status = match statuses.get(&class.subject_id) {
            Some(status) if status.is_present() => calendar_label(CalendarStatus::Present),
            Some(_) => calendar_label(CalendarStatus::Absent),
            None => "unmarked",
        };
        table.push_row(vec![
            format!(
                "{}-{}",
                format_time(class.start_time),
                format_time(class.end_time)
            ),
            class.subject_id.clone(),
            class.subject_name.clone(),
            status.to_string(),
        ]);
    }
    info(table.render());
    let marked = classes
        .iter()
        .filter(|class| statuses.contains_key(&class.subject_id))
        .count();
    if marked < classes.len() {
        hint(format!(
            "Mark them with `present` or `mark today <subject> <status>` ({} of {} unmarked).",
            classes.len() - marked,
            classes.len()
        ));
    }
    Ok(())
}
