//! attend-core
//!
//! Attendance analytics engine and the services around it.
//! Depends on attend-domain. No CLI, no terminal I/O, no direct file access:
//! persistence goes through the [`AttendanceStore`] trait.

pub mod analytics_service;
pub mod attendance_service;
pub mod calendar;
pub mod error;
pub mod holiday_service;
pub mod month_view;
pub mod schedule;
pub mod semester_service;
pub mod simulator;
pub mod snapshot;
pub mod stats;
pub mod storage;
pub mod time;
pub mod timetable_service;

pub use analytics_service::*;
pub use attendance_service::*;
pub use calendar::YearMonth;
pub use error::CoreError;
pub use holiday_service::*;
pub use month_view::{CalendarDay, CalendarMonthView, CalendarStatus, CalendarSubject};
pub use schedule::{ScheduledClass, SubjectRef, WeeklySchedule};
pub use semester_service::*;
pub use simulator::{FullDayProjection, MissAllowance, SubjectProjection};
pub use snapshot::{AttendanceLog, Snapshot};
pub use stats::{OverallStats, SemesterStats, SemesterStatus, SubjectStats};
pub use storage::{AttendanceStore, MemoryStore, RangeSelector, SnapshotParts, StoreState};
pub use time::{Clock, EngineContext, FixedClock};
pub use timetable_service::*;

pub use chrono_tz::Tz;

#[cfg(test)]
mod tests;
