use attend_core::{Clock, Tz};
use attend_domain::{parse_date, DomainError};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

/// Pins "today" to a fixed `YYYY-MM-DD` date for reproducible runs.
pub const TODAY_ENV: &str = "ATTENDANCE_TODAY";

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Reports the same calendar date in every timezone.
#[derive(Debug, Clone, Copy)]
pub struct PinnedDate(pub NaiveDate);

impl Clock for PinnedDate {
    fn now(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.0.and_time(NaiveTime::MIN))
    }

    fn today_in(&self, _timezone: Tz) -> NaiveDate {
        self.0
    }
}

/// Picks the clock from `ATTENDANCE_TODAY`, falling back to the wall clock.
pub fn clock_from_env() -> Result<Box<dyn Clock>, DomainError> {
    clock_from_value(std::env::var(TODAY_ENV).ok().as_deref())
}

pub(crate) fn clock_from_value(value: Option<&str>) -> Result<Box<dyn Clock>, DomainError> {
    match value.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => Ok(Box::new(PinnedDate(parse_date(raw)?))),
        None => Ok(Box::new(SystemClock)),
    }
}
