mod common;

use std::fs;

use common::{run, sandbox, SETUP};
use predicates::prelude::*;
use predicates::str::contains;

#[test]
fn stats_reflect_marked_classes() {
    let home = sandbox();
    run(&home, &format!("{SETUP}stats\nexit\n"))
        .success()
        .stdout(contains("Semester 2024-01-01 to 2024-01-31 (active), target 75%"))
        .stdout(contains("66.67%"))
        .stdout(contains("Overall: 2/3 attended"))
        .stdout(contains("below the 75% target"));
}

#[test]
fn data_survives_between_runs() {
    let home = sandbox();
    run(&home, SETUP).success();

    let document = fs::read_to_string(home.join("attendance.json")).expect("data file written");
    assert!(document.contains("\"subject_id\": \"PHY\""));
    assert!(document.contains("\"min_attendance\": 75"));

    run(&home, "holiday add 2024-01-08 Pongal\nstats\n")
        .success()
        .stdout(contains("Overall: 2/2 attended"))
        .stdout(contains("On track."));
}

#[test]
fn stats_json_uses_wire_names() {
    let home = sandbox();
    run(&home, &format!("{SETUP}stats --json\n"))
        .success()
        .stdout(contains("\"status\": \"active\""))
        .stdout(contains("\"required_classes_to_target\": 1"))
        .stdout(contains("\"attendance_percentage\": 66.67"));
}

#[test]
fn calendar_marks_today_and_statuses() {
    let home = sandbox();
    run(&home, &format!("{SETUP}calendar 2024-01\n"))
        .success()
        .stdout(contains("=== January 2024 ==="))
        .stdout(contains("[9]"))
        .stdout(contains("1P"))
        .stdout(contains("8A"))
        .stdout(contains("10-"))
        .stdout(contains("prev: 2023-12  next: 2024-02"));
}

#[test]
fn simulator_commands_project_misses() {
    let home = sandbox();
    run(
        &home,
        &format!("{SETUP}simulate PHY 1\nmax-bunks\nsimulate-day 2\n"),
    )
    .success()
    .stdout(contains("After missing 1: 50.00%"))
    .stdout(contains("0 (attend everything)"))
    .stdout(contains("No classes today"));
}

#[test]
fn unknown_subject_is_reported_without_aborting() {
    let home = sandbox();
    run(&home, &format!("{SETUP}simulate CHE 2\nsubject list\n"))
        .success()
        .stderr(contains("Subject not found: CHE"))
        .stdout(contains("Mon 09:00-10:00, Wed 10:00-11:00"));
}

#[test]
fn marking_refuses_future_unscheduled_and_holiday_dates() {
    let home = sandbox();
    run(
        &home,
        &format!(
            "{SETUP}holiday add 2024-01-08 Pongal\n\
             mark 2024-01-10 PHY present\n\
             mark 2024-01-02 PHY present\n\
             mark 2024-01-08 PHY absent\n\
             present\n\
             present 2024-01-03\n\
             stats\n"
        ),
    )
    .success()
    .stderr(contains("Cannot mark attendance for future date 2024-01-10"))
    .stderr(contains("Subject 'PHY' is not scheduled on 2024-01-02"))
    .stderr(contains("Cannot mark attendance on holiday 2024-01-08"))
    .stderr(contains("No classes scheduled on 2024-01-09"))
    .stderr(contains("Only today can be marked without a subject list"))
    .stdout(contains("Overall: 2/2 attended"));
}

#[test]
fn present_without_subjects_marks_all_of_today() {
    let home = sandbox();
    run(
        &home,
        &format!(
            "{SETUP}subject add CHE Chemistry Tuesday@11:00-12:00\n\
             subject add BIO Biology Tuesday@13:00-14:00\n\
             present today\n\
             today\n"
        ),
    )
    .success()
    .stdout(contains("Marked 2 class(es) present for today."))
    .stdout(contains("unmarked").not());
}

#[test]
fn typos_get_a_suggestion() {
    let home = sandbox();
    run(&home, "stat\n")
        .success()
        .stdout(contains("Unknown command `stat`"))
        .stdout(contains("Did you mean `stats`?"));
}

#[test]
fn bad_arguments_print_usage_hint() {
    let home = sandbox();
    run(&home, "mark 2024-01-40 PHY present\nsemester set 2024-02-01\n")
        .success()
        .stderr(contains("[x]"))
        .stderr(contains("Usage: semester set <start> <end> [min-attendance]"));
}

#[test]
fn holidays_can_be_moved_and_listed() {
    let home = sandbox();
    run(
        &home,
        "holiday range 2024-01-15 2024-01-16 Harvest break\n\
         holiday update 2024-01-16 2024-01-17 Harvest break\n\
         holiday remove 2024-01-15\n\
         holiday list\n",
    )
    .success()
    .stdout(contains("Marked 2 day(s)"))
    .stdout(contains("2024-01-17  Wed  Harvest break"))
    .stdout(contains("2024-01-15").count(2));
}

#[test]
fn stats_without_semester_points_to_setup() {
    let home = sandbox();
    run(&home, "stats\nsemester show\n")
        .success()
        .stdout(contains("Semester is not configured"))
        .stdout(contains("Not configured."));
}

#[test]
fn config_changes_are_persisted() {
    let home = sandbox();
    run(&home, "config timezone America/New_York\nconfig show\n")
        .success()
        .stdout(contains("Timezone set to America/New_York."))
        .stdout(contains("Timezone    : America/New_York"));

    let saved = fs::read_to_string(home.join("config").join("config.json")).unwrap();
    assert!(saved.contains("America/New_York"));

    run(&home, "config timezone Mars/Olympus\n")
        .success()
        .stderr(contains("Mars/Olympus"));
}

#[test]
fn invalid_pinned_date_is_fatal() {
    let home = sandbox();
    common::cli(&home)
        .env("ATTENDANCE_TODAY", "tomorrow")
        .write_stdin("stats\n")
        .assert()
        .failure()
        .stderr(contains("Fatal"));
}
