use attend_core::stats::{counting_window, DEFAULT_MIN_ATTENDANCE};
use attend_core::{SemesterService, SemesterStatus};
use attend_domain::validation::MIN_ATTENDANCE_CEILING;

use super::status_label;
use crate::cli::args;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output::{hint, info, section, success};
use crate::cli::registry::CommandEntry;

const USAGE: &str = "semester <show|set <start> <end> [min-attendance]>";
const SET_USAGE: &str = "semester set <start> <end> [min-attendance]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "semester",
        "Show or configure the semester window and attendance target",
        USAGE,
        cmd_semester,
    )]
}

fn cmd_semester(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return show(context);
    };
    match action.to_ascii_lowercase().as_str() {
        "show" => show(context),
        "set" => set(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "Unknown semester action `{other}`. Usage: {USAGE}"
        ))),
    }
}

fn set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let today = context.today();
    let start = args::date(args::required(args, 0, SET_USAGE)?, today)?;
    let end = args::date(args::required(args, 1, SET_USAGE)?, today)?;
    let min_attendance = match args.get(2) {
        Some(raw) => args::number::<u8>(raw.trim_end_matches('%'), "Minimum attendance")?,
        None => DEFAULT_MIN_ATTENDANCE,
    };
    let config = SemesterService::configure(context.store(), start, end, min_attendance)?;
    success(format!(
        "Semester set to {} .. {} with a {}% target.",
        config.semester_start, config.semester_end, config.min_attendance
    ));
    Ok(())
}

fn show(context: &mut ShellContext) -> CommandResult {
    section("Semester");
    let Some(config) = SemesterService::current(context.store())? else {
        info("Not configured.");
        hint(format!(
            "Use `{SET_USAGE}` (target 1-{MIN_ATTENDANCE_CEILING}, default {DEFAULT_MIN_ATTENDANCE})."
        ));
        return Ok(());
    };
    let today = context.today();
    let status = SemesterStatus::of(Some(&config), today);
    info(format!("Start      : {}", config.semester_start));
    info(format!("End        : {}", config.semester_end));
    info(format!("Target     : {}%", config.min_attendance));
    info(format!("Status     : {}", status_label(status)));
    if let Some(window) = counting_window(Some(&config), today) {
        info(format!(
            "Counting   : {} .. {} ({} day(s))",
            window.start(),
            window.end(),
            window.len()
        ));
    }
    Ok(())
}
