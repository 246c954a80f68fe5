//! attend-domain
//!
//! Pure domain models (timetable, holidays, attendance log, semester window).
//! No I/O, no CLI, no storage. Only data types, parsing, and validation rules.

pub mod attendance;
pub mod common;
pub mod error;
pub mod holiday;
pub mod range;
pub mod semester;
pub mod timetable;
pub mod validation;
pub mod weekday;

pub use attendance::*;
pub use common::{format_date, format_time, parse_date, parse_time};
pub use error::DomainError;
pub use holiday::*;
pub use range::*;
pub use semester::*;
pub use timetable::*;
pub use weekday::*;

// Re-export chrono so consumers can rely on the same date types.
pub use chrono;
