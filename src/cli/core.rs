//! Shell context, dispatch, and command errors.

use std::io;

use attend_config::{Config, ConfigError, ConfigManager};
use attend_core::{AttendanceStore, Clock, CoreError, EngineContext, Tz};
use attend_domain::DomainError;
use attend_storage_json::JsonStore;
use chrono::NaiveDate;
use dialoguer::Confirm;
use strsim::levenshtein;
use thiserror::Error;

use super::clock::{clock_from_env, TODAY_ENV};
use super::commands;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};
use crate::errors::CliError;

const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("exit requested")]
    ExitRequested,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    store: JsonStore,
    clock: Box<dyn Clock>,
    config_manager: ConfigManager,
    config: Config,
    timezone: Tz,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Loads configuration from `ATTENDANCE_HOME` (or `~/.attendance`) and
    /// opens the data store under the configured data root.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::from_env()?;
        let clock = clock_from_env().map_err(|source| CliError::Environment {
            variable: TODAY_ENV,
            source,
        })?;
        Self::with_parts(mode, config_manager, clock)
    }

    pub fn with_parts(
        mode: CliMode,
        config_manager: ConfigManager,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled,
        });

        let effective = config.clone().with_env_overrides();
        let timezone = match effective.tz() {
            Ok(tz) => tz,
            Err(err) => {
                tracing::warn!(%err, "falling back to the default timezone");
                output::warning(format!("{err}; using {}", Config::default_timezone()));
                Config::default().tz()?
            }
        };

        let data_root = config_manager.data_root(&config);
        let store = JsonStore::open(&data_root)?;
        tracing::info!(
            data = %store.path().display(),
            timezone = timezone.name(),
            "shell context ready"
        );

        Ok(Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            store,
            clock,
            config_manager,
            config,
            timezone,
            last_command: None,
            running: true,
        })
    }

    pub fn store(&self) -> &dyn AttendanceStore {
        &self.store
    }

    pub fn store_path(&self) -> &std::path::Path {
        self.store.path()
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// "Today" resolved once per command in the configured timezone.
    pub fn engine_context(&self) -> EngineContext {
        EngineContext::from_clock(self.clock.as_ref(), self.timezone)
    }

    pub fn today(&self) -> NaiveDate {
        self.engine_context().today
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_path(&self) -> &std::path::Path {
        self.config_manager.config_path()
    }

    /// Applies `change` to the saved configuration and persists it.
    pub fn update_config<T>(
        &mut self,
        change: impl FnOnce(&mut Config) -> Result<T, ConfigError>,
    ) -> Result<T, CommandError> {
        let mut updated = self.config.clone();
        let value = change(&mut updated)?;
        self.config_manager.save(&updated)?;
        self.config = updated;
        Ok(value)
    }

    pub fn set_timezone(&mut self, timezone: Tz) {
        self.timezone = timezone;
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        format!("attendance [{}]> ", self.today())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        if let Some(best) = closest_match(self.registry.names(), input) {
            output::hint(format!("Did you mean `{best}`?"));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::new()
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Core(CoreError::SemesterNotConfigured) => {
                output::error("Semester is not configured.");
                output::hint("Try `semester set 2024-01-01 2024-05-31 75`.");
            }
            other => {
                tracing::debug!(error = ?other, "command failed");
                output::error(other);
            }
        }
    }
}

fn closest_match<'a>(names: impl Iterator<Item = &'a str>, input: &str) -> Option<&'a str> {
    let input = input.to_ascii_lowercase();
    names
        .map(|name| (levenshtein(name, &input), name))
        .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name)
}
