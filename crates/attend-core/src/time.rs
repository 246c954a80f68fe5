use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Clock abstracts access to the current timestamp so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current calendar date as observed in `timezone`.
    fn today_in(&self, timezone: Tz) -> NaiveDate {
        self.now().with_timezone(&timezone).date_naive()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The two inputs every engine computation is relative to.
///
/// "Today" is resolved once by the caller and threaded through explicitly, so
/// a computation is a pure function of its snapshot and this context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineContext {
    pub today: NaiveDate,
    pub timezone: Tz,
}

impl EngineContext {
    pub fn new(today: NaiveDate, timezone: Tz) -> Self {
        Self { today, timezone }
    }

    pub fn from_clock(clock: &dyn Clock, timezone: Tz) -> Self {
        Self::new(clock.today_in(timezone), timezone)
    }
}
