use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";

/// Overrides [`Config::timezone`] without touching the saved file.
pub const TIMEZONE_ENV: &str = "APP_TIMEZONE";

/// Stores user-configurable preferences for the attendance tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// IANA name of the zone that decides what "today" is.
    #[serde(default = "Config::default_timezone")]
    pub timezone: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for attendance data. Defaults to the base directory.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: Self::default_timezone(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_root: None,
        }
    }
}

impl Config {
    pub fn default_timezone() -> String {
        DEFAULT_TIMEZONE.into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn tz(&self) -> Result<Tz, ConfigError> {
        parse_timezone(&self.timezone)
    }

    /// Validates and stores a new timezone name.
    pub fn set_timezone(&mut self, name: &str) -> Result<Tz, ConfigError> {
        let tz = parse_timezone(name)?;
        self.timezone = tz.name().to_string();
        Ok(tz)
    }

    /// Applies environment overrides, looking variables up through `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(timezone) = lookup(TIMEZONE_ENV).filter(|value| !value.trim().is_empty()) {
            self.timezone = timezone.trim().to_string();
        }
        self
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn resolve_data_root(&self, base: &Path) -> PathBuf {
        match &self.data_root {
            Some(path) => path.clone(),
            None => base.to_path_buf(),
        }
    }
}

fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ConfigError::InvalidTimezone(name.trim().to_string()))
}
