use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::{assert::Assert, Command};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const TODAY: &str = "2024-01-09";

/// Creates an isolated `ATTENDANCE_HOME` with colors off and a UTC timezone.
pub fn sandbox() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let config_dir = base.join("config");
    fs::create_dir_all(&config_dir).expect("create config dir");
    fs::write(
        config_dir.join("config.json"),
        r#"{ "timezone": "UTC", "ui_color_enabled": false }"#,
    )
    .expect("write config");
    base
}

pub fn cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("attendance_cli").expect("binary builds");
    cmd.env("ATTENDANCE_CLI_SCRIPT", "1")
        .env("ATTENDANCE_HOME", home)
        .env("ATTENDANCE_TODAY", TODAY)
        .env_remove("APP_TIMEZONE")
        .env_remove("RUST_LOG");
    cmd
}

pub fn run(home: &Path, script: &str) -> Assert {
    cli(home).write_stdin(script.to_string()).assert()
}

/// Semester in January 2024 with Physics on Mondays and Wednesdays.
pub const SETUP: &str = "\
semester set 2024-01-01 2024-01-31 75
subject add PHY Physics Monday@09:00-10:00 Wednesday@10:00-11:00
present 2024-01-01 PHY
mark 2024-01-03 PHY present
";
