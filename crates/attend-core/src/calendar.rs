//! Date helpers shared by the statistics engine and the month view.

use std::{cmp::Ordering, fmt, str::FromStr};

use attend_domain::{DateRange, DomainError, Weekday};
use chrono::{Datelike, Months, NaiveDate, TimeZone};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};

use crate::time::Clock;

/// Every date from `start` to `end`, inclusive and ascending.
///
/// An inverted range yields an empty list instead of an error.
pub fn each_date_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    match DateRange::new(start, end) {
        Ok(range) => range.dates().collect(),
        Err(_) => Vec::new(),
    }
}

pub fn compare_dates(a: NaiveDate, b: NaiveDate) -> Ordering {
    a.cmp(&b)
}

pub fn min_date(a: NaiveDate, b: NaiveDate) -> NaiveDate {
    if compare_dates(a, b) == Ordering::Greater {
        b
    } else {
        a
    }
}

/// Resolves the weekday of `date` at local midnight in `timezone`.
///
/// When midnight falls inside a DST gap the calendar date's own weekday is used.
pub fn weekday_of(date: NaiveDate, timezone: Tz) -> Result<Weekday, DomainError> {
    let label = date
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| timezone.from_local_datetime(&midnight).earliest())
        .map(|local| local.format("%A").to_string())
        .unwrap_or_else(|| date.format("%A").to_string());
    label.parse()
}

/// The current date in `timezone`; the single source of "today".
pub fn today(clock: &dyn Clock, timezone: Tz) -> NaiveDate {
    clock.today_in(timezone)
}

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, DomainError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or_else(|| DomainError::InvalidMonth(format!("{year:04}-{month:02}")))
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            first: date - chrono::Duration::days(i64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn days_in_month(&self) -> u32 {
        match self.first.checked_add_months(Months::new(1)) {
            Some(next) => (next - self.first).num_days() as u32,
            None => 31,
        }
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first + chrono::Duration::days(i64::from(self.days_in_month()) - 1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Moves by `offset` months, rolling over year boundaries.
    pub fn shift(&self, offset: i32) -> Result<Self, DomainError> {
        let months = Months::new(offset.unsigned_abs());
        let shifted = if offset >= 0 {
            self.first.checked_add_months(months)
        } else {
            self.first.checked_sub_months(months)
        };
        shifted
            .map(|first| Self { first })
            .ok_or_else(|| DomainError::InvalidMonth(format!("{self} shifted by {offset}")))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidMonth(value.to_string());
        let trimmed = value.trim();
        let (year, month) = trimmed.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        YearMonth::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
