use attend_core::HolidayService;

use crate::cli::args;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output::{info, section, success};
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Alignment, Table};

const USAGE: &str = "holiday <add <date> <reason>|range <start> <end> <reason>|update <date> <new-date> <reason>|remove <date>|list>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "holiday",
        "Manage dates on which no classes are held",
        USAGE,
        cmd_holiday,
    )]
}

fn cmd_holiday(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return list(context);
    };
    match action.to_ascii_lowercase().as_str() {
        "add" => add(context, rest),
        "range" => add_range(context, rest),
        "update" | "edit" => update(context, rest),
        "remove" | "rm" | "delete" => remove(context, rest),
        "list" | "ls" => list(context),
        other => Err(CommandError::InvalidArguments(format!(
            "Unknown holiday action `{other}`. Usage: {USAGE}"
        ))),
    }
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "holiday add <date> <reason>";
    let date = args::date(args::required(args, 0, usage)?, context.today())?;
    let holiday = HolidayService::create(context.store(), date, &args::rest(args, 1))?;
    success(format!("Added holiday on {}: {}", holiday.date, holiday.reason));
    Ok(())
}

fn add_range(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "holiday range <start> <end> <reason>";
    let today = context.today();
    let start = args::date(args::required(args, 0, usage)?, today)?;
    let end = args::date(args::required(args, 1, usage)?, today)?;
    let written = HolidayService::add_range(context.store(), start, end, &args::rest(args, 2))?;
    success(format!("Marked {written} day(s) from {start} to {end} as holidays."));
    Ok(())
}

fn update(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "holiday update <date> <new-date> <reason>";
    let today = context.today();
    let old_date = args::date(args::required(args, 0, usage)?, today)?;
    let date = args::date(args::required(args, 1, usage)?, today)?;
    let holiday = HolidayService::update(context.store(), old_date, date, &args::rest(args, 2))?;
    success(format!("Updated holiday on {}: {}", holiday.date, holiday.reason));
    Ok(())
}

fn remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let date = args::date(args::required(args, 0, "holiday remove <date>")?, context.today())?;
    HolidayService::delete(context.store(), date)?;
    success(format!("Removed holiday on {date}."));
    Ok(())
}

fn list(context: &mut ShellContext) -> CommandResult {
    let holidays = HolidayService::list(context.store())?;
    section("Holidays");
    if holidays.is_empty() {
        info("No holidays recorded.");
        return Ok(());
    }
    let mut table = Table::new(&[
        ("Date", Alignment::Left),
        ("Day", Alignment::Left),
        ("Reason", Alignment::Left),
    ]);
    for holiday in holidays {
        table.push_row(vec![
            holiday.date.to_string(),
            holiday.date.format("%a").to_string(),
            holiday.reason,
        ]);
    }
    info(table.render());
    Ok(())
}
