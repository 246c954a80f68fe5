//! What-if projections over the current semester counts.

use attend_core::{AnalyticsService, MissAllowance};

use super::{allowance_label, percent, percent_against};
use crate::cli::args;
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output::{info, section, warning};
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Alignment, Table};

const SIMULATE_USAGE: &str = "simulate <subject> <classes>";
const SIMULATE_DAY_USAGE: &str = "simulate-day <days>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "simulate",
            "Project a subject's percentage after missing more classes",
            SIMULATE_USAGE,
            cmd_simulate,
        ),
        CommandEntry::new(
            "simulate-day",
            "Project overall attendance after skipping whole days like today",
            SIMULATE_DAY_USAGE,
            cmd_simulate_day,
        ),
        CommandEntry::new(
            "max-bunks",
            "How many classes each subject can still miss",
            "max-bunks [--json]",
            cmd_max_bunks,
        ),
    ]
}

fn cmd_simulate(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let subject = args::required(args, 0, SIMULATE_USAGE)?;
    let extra: u32 = args::number(args::required(args, 1, SIMULATE_USAGE)?, "Classes")?;
    let view = AnalyticsService::simulator_view(context.store(), &context.engine_context())?;
    let projection = view.project_subject(subject, extra)?;
    let target = view.stats.min_attendance;

    section(format!(
        "{} ({})",
        projection.subject_name, projection.subject_id
    ));
    info(format!(
        "Now: {}  After missing {}: {}",
        percent_against(projection.current_percentage, target),
        projection.extra_misses,
        percent_against(projection.projected_percentage, target)
    ));
    info(format!(
        "Can still miss: {}",
        allowance_label(projection.max_additional_misses)
    ));
    if projection.projected_percentage < f64::from(target) {
        warning(format!("That would drop below the {target}% target."));
    }
    Ok(())
}

fn cmd_simulate_day(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let days: i64 = args::number(args::required(args, 0, SIMULATE_DAY_USAGE)?, "Days")?;
    let view = AnalyticsService::simulator_view(context.store(), &context.engine_context())?;
    let projection = view.project_full_days(days);

    section(format!("Skipping {} day(s) like {}", projection.days_skipped, view.today));
    if projection.subjects.is_empty() {
        info("No classes today, so skipping changes nothing.");
    } else {
        let names: Vec<_> = projection
            .subjects
            .iter()
            .map(|subject| subject.subject_id.as_str())
            .collect();
        info(format!("Subjects missed per day: {}", names.join(", ")));
    }
    let target = view.stats.min_attendance;
    info(format!(
        "Overall now: {}  after {} extra miss(es): {}",
        percent(projection.current_percentage),
        projection.extra_misses,
        percent_against(projection.projected_percentage, target)
    ));
    if projection.projected_percentage < f64::from(target) {
        warning(format!("That would drop below the {target}% target."));
    }
    Ok(())
}

fn cmd_max_bunks(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (_, json) = args::json_flag(args);
    let view = AnalyticsService::simulator_view(context.store(), &context.engine_context())?;
    let allowances = view.miss_allowances();
    let overall = view.overall_allowance();

    if json {
        let subjects: Vec<_> = allowances
            .iter()
            .map(|(subject, allowance)| {
                serde_json::json!({
                    "subject_id": subject.subject_id,
                    "subject_name": subject.subject_name,
                    "max_additional_misses": allowance,
                })
            })
            .collect();
        let body = serde_json::json!({
            "min_attendance": view.stats.min_attendance,
            "overall": overall,
            "subjects": subjects,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    section(format!(
        "Misses left at {}% target",
        view.stats.min_attendance
    ));
    if allowances.is_empty() {
        info("No subjects in the timetable.");
        return Ok(());
    }
    let mut table = Table::new(&[
        ("Subject", Alignment::Left),
        ("Name", Alignment::Left),
        ("Can miss", Alignment::Right),
    ]);
    for (subject, allowance) in &allowances {
        table.push_row(vec![
            subject.subject_id.clone(),
            subject.subject_name.clone(),
            allowance_label(*allowance),
        ]);
    }
    info(table.render());
    info(format!("Overall: {}", allowance_label(overall)));
    if overall == MissAllowance::Limited(0) && view.stats.overall.risk {
        warning("Already below target; attend every class.");
    }
    Ok(())
}
