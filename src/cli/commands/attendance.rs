use attend_core::AttendanceService;
use attend_domain::AttendanceStatus;

use crate::cli::args;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output::{info, success};
use crate::cli::registry::CommandEntry;

const MARK_USAGE: &str = "mark <date|today> <subject> <present|absent>";
const PRESENT_USAGE: &str = "present [today] | present <date|today> <subject> [subject...]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "mark",
            "Record one class as present or absent",
            MARK_USAGE,
            cmd_mark,
        ),
        CommandEntry::new(
            "present",
            "Mark subjects present; with no subjects, every class today",
            PRESENT_USAGE,
            cmd_present,
        ),
    ]
}

fn cmd_mark(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let date = args::date(args::required(args, 0, MARK_USAGE)?, context.today())?;
    let subject = args::required(args, 1, MARK_USAGE)?;
    let status: AttendanceStatus = args::required(args, 2, MARK_USAGE)?.parse()?;
    let record =
        AttendanceService::mark(context.store(), &context.engine_context(), date, subject, status)?;
    success(format!(
        "Marked {} {} on {}.",
        record.subject_id, record.status, record.date
    ));
    Ok(())
}

fn cmd_present(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let engine = context.engine_context();
    if args.len() < 2 {
        let date = match args.first() {
            Some(raw) => args::date(raw, engine.today)?,
            None => engine.today,
        };
        if date != engine.today {
            return Err(CommandError::InvalidArguments(format!(
                "Only today can be marked without a subject list. Usage: {PRESENT_USAGE}"
            )));
        }
        let written = AttendanceService::mark_all_present_today(context.store(), &engine)?;
        success(format!("Marked {written} class(es) present for today."));
        return Ok(());
    }

    let date = args::date(args[0], engine.today)?;
    let written =
        AttendanceService::mark_present(context.store(), &engine, date, args[1..].iter().copied())?;
    if written == 0 {
        info("Nothing to mark.");
    } else {
        success(format!("Marked {written} subject(s) present on {date}."));
    }
    Ok(())
}
