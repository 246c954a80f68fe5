pub mod attendance;
pub mod config;
pub mod holiday;
pub mod report;
pub mod semester;
pub mod simulate;
pub mod subject;
pub mod system;

use attend_core::{CalendarStatus, MissAllowance, SemesterStatus, YearMonth};
use colored::Colorize;

use super::registry::CommandEntry;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(report::definitions());
    commands.extend(attendance::definitions());
    commands.extend(simulate::definitions());
    commands.extend(holiday::definitions());
    commands.extend(semester::definitions());
    commands.extend(subject::definitions());
    commands.extend(config::definitions());
    commands
}

pub(crate) fn percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Percentage colored against the target: red below, green at or above.
pub(crate) fn percent_against(value: f64, target: u8) -> String {
    let text = percent(value);
    if value < f64::from(target) {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

pub(crate) fn month_label(month: YearMonth) -> String {
    month.first_day().format("%B %Y").to_string()
}

pub(crate) fn status_label(status: SemesterStatus) -> &'static str {
    match status {
        SemesterStatus::NotConfigured => "not configured",
        SemesterStatus::NotStarted => "not started",
        SemesterStatus::Active => "active",
        SemesterStatus::Ended => "ended",
    }
}

pub(crate) fn calendar_label(status: CalendarStatus) -> &'static str {
    match status {
        CalendarStatus::Present => "present",
        CalendarStatus::Absent => "absent",
        CalendarStatus::Holiday => "holiday",
        CalendarStatus::Future => "upcoming",
    }
}

pub(crate) fn allowance_label(allowance: MissAllowance) -> String {
    match allowance {
        MissAllowance::Limited(0) => "0 (attend everything)".to_string(),
        other => other.to_string(),
    }
}
