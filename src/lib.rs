#![doc(test(attr(deny(warnings))))]

//! Attendance Core tracks class attendance against a weekly timetable,
//! holidays, and a semester window, and ships the `attendance_cli` shell on
//! top of the `attend-*` crates.

pub mod cli;
pub mod errors;
pub mod utils;

pub use attend_config as config;
pub use attend_core as core;
pub use attend_domain as domain;
pub use attend_storage_json as storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Attendance Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
