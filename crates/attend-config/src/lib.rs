//! attend-config
//!
//! Persistent user preferences: display timezone, colored output, data root.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{ConfigManager, HOME_ENV};
pub use model::{Config, DEFAULT_TIMEZONE, TIMEZONE_ENV};
