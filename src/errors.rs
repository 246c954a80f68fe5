use std::io;

use attend_config::ConfigError;
use attend_core::CoreError;
use attend_domain::DomainError;
use rustyline::error::ReadlineError;
use thiserror::Error;

/// Failures that stop the shell itself, as opposed to a single command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Invalid {variable}: {source}")]
    Environment {
        variable: &'static str,
        #[source]
        source: DomainError,
    },
}
