use attend_core::TimetableService;
use attend_domain::{format_time, TimetableEntry};

use crate::cli::args;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output::{info, section, success};
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Alignment, Table};

const USAGE: &str = "subject <add|update <id> <name> <Day@HH:MM-HH:MM>...|remove <id>|list>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "subject",
        "Manage timetable subjects and their weekly sessions",
        USAGE,
        cmd_subject,
    )]
}

fn cmd_subject(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return list(context);
    };
    match action.to_ascii_lowercase().as_str() {
        "add" => save(context, rest, false),
        "update" | "edit" => save(context, rest, true),
        "remove" | "rm" | "delete" => remove(context, rest),
        "list" | "ls" => list(context),
        other => Err(CommandError::InvalidArguments(format!(
            "Unknown subject action `{other}`. Usage: {USAGE}"
        ))),
    }
}

/// Splits `<id> <name words...> <sessions...>`; session tokens contain `@`.
fn split_definition<'a>(args: &[&'a str]) -> Result<(&'a str, String, Vec<&'a str>), CommandError> {
    let usage = "subject add <id> <name> <Day@HH:MM-HH:MM>...";
    let id = args::required(args, 0, usage)?;
    let (sessions, name): (Vec<&str>, Vec<&str>) =
        args[1..].iter().copied().partition(|token| token.contains('@'));
    if name.is_empty() {
        return Err(CommandError::InvalidArguments(format!("Usage: {usage}")));
    }
    Ok((id, name.join(" "), sessions))
}

fn save(context: &mut ShellContext, args: &[&str], replace: bool) -> CommandResult {
    let (id, name, raw_sessions) = split_definition(args)?;
    let sessions = args::sessions(&raw_sessions)?;
    let entry = if replace {
        TimetableService::update(context.store(), id, &name, sessions)?
    } else {
        TimetableService::create(context.store(), id, &name, sessions)?
    };
    success(format!(
        "{} {} ({}) with {} session(s).",
        if replace { "Updated" } else { "Added" },
        entry.subject_name,
        entry.subject_id,
        entry.sessions.len()
    ));
    Ok(())
}

fn remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = args::required(args, 0, "subject remove <id>")?;
    TimetableService::delete(context.store(), id)?;
    success(format!("Removed {}.", id.trim()));
    Ok(())
}

fn list(context: &mut ShellContext) -> CommandResult {
    let entries = TimetableService::list(context.store())?;
    section("Timetable");
    if entries.is_empty() {
        info("No subjects yet. Add one with `subject add PHY Physics Monday@09:00-10:00`.");
        return Ok(());
    }
    let mut table = Table::new(&[
        ("Subject", Alignment::Left),
        ("Name", Alignment::Left),
        ("Sessions", Alignment::Left),
    ]);
    for entry in &entries {
        table.push_row(vec![
            entry.subject_id.clone(),
            entry.subject_name.clone(),
            describe_sessions(entry),
        ]);
    }
    info(table.render());
    Ok(())
}

fn describe_sessions(entry: &TimetableEntry) -> String {
    entry
        .sessions
        .iter()
        .map(|session| {
            format!(
                "{} {}-{}",
                &session.weekday.as_str()[..3],
                format_time(session.start_time),
                format_time(session.end_time)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}
