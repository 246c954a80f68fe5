//! Argument parsing shared by the command handlers.

use std::str::FromStr;

use attend_core::YearMonth;
use attend_domain::{parse_date, Session};
use chrono::NaiveDate;

use super::core::CommandError;

pub const TODAY_KEYWORD: &str = "today";

pub fn required<'a>(args: &[&'a str], idx: usize, usage: &str) -> Result<&'a str, CommandError> {
    args.get(idx)
        .copied()
        .ok_or_else(|| CommandError::InvalidArguments(format!("Usage: {usage}")))
}

/// Parses `YYYY-MM-DD`, or the keyword `today`.
pub fn date(raw: &str, today: NaiveDate) -> Result<NaiveDate, CommandError> {
    if raw.eq_ignore_ascii_case(TODAY_KEYWORD) {
        return Ok(today);
    }
    Ok(parse_date(raw)?)
}

pub fn number<T: FromStr>(raw: &str, label: &str) -> Result<T, CommandError> {
    raw.trim().parse().map_err(|_| {
        CommandError::InvalidArguments(format!("{label} must be a whole number, got `{raw}`"))
    })
}

/// Parses `Day@HH:MM-HH:MM` tokens.
pub fn sessions(raw: &[&str]) -> Result<Vec<Session>, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::InvalidArguments(
            "Add at least one session, e.g. Monday@09:00-10:00".into(),
        ));
    }
    raw.iter()
        .map(|token| token.parse::<Session>().map_err(CommandError::from))
        .collect()
}

/// Joins the remaining words, e.g. a multi-word holiday reason.
pub fn rest(args: &[&str], from: usize) -> String {
    args.get(from..).map(|words| words.join(" ")).unwrap_or_default()
}

pub fn month(raw: Option<&str>) -> Result<Option<YearMonth>, CommandError> {
    raw.map(|value| value.parse::<YearMonth>().map_err(CommandError::from))
        .transpose()
}

pub fn on_off(raw: &str) -> Result<bool, CommandError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => Err(CommandError::InvalidArguments(format!(
            "Expected `on` or `off`, got `{other}`"
        ))),
    }
}

/// Splits out a trailing `--json` flag.
pub fn json_flag<'a>(args: &[&'a str]) -> (Vec<&'a str>, bool) {
    let json = args.iter().any(|arg| *arg == "--json");
    let rest = args.iter().copied().filter(|arg| *arg != "--json").collect();
    (rest, json)
}
