use attend_domain::{DateRange, Holiday};
use chrono::NaiveDate;

use crate::{storage::AttendanceStore, CoreError};

pub struct HolidayService;

impl HolidayService {
    pub fn create(
        store: &dyn AttendanceStore,
        date: NaiveDate,
        reason: &str,
    ) -> Result<Holiday, CoreError> {
        let holiday = Holiday::new(date, reason)?;
        store.insert_holiday(holiday.clone())?;
        tracing::info!(%date, "created holiday");
        Ok(holiday)
    }

    /// Rewrites the holiday at `old_date`. A different `date` moves it, which
    /// requires the target date to be free.
    pub fn update(
        store: &dyn AttendanceStore,
        old_date: NaiveDate,
        date: NaiveDate,
        reason: &str,
    ) -> Result<Holiday, CoreError> {
        let holiday = Holiday::new(date, reason)?;
        store.replace_holiday(old_date, holiday.clone())?;
        tracing::info!(%old_date, %date, "updated holiday");
        Ok(holiday)
    }

    pub fn delete(store: &dyn AttendanceStore, date: NaiveDate) -> Result<(), CoreError> {
        if !store.delete_holiday(date)? {
            return Err(CoreError::HolidayNotFound(date));
        }
        tracing::info!(%date, "deleted holiday");
        Ok(())
    }

    /// All holidays in date order.
    pub fn list(store: &dyn AttendanceStore) -> Result<Vec<Holiday>, CoreError> {
        store.fetch_all_holidays()
    }

    pub fn is_holiday(store: &dyn AttendanceStore, date: NaiveDate) -> Result<bool, CoreError> {
        Ok(!store.fetch_holidays(DateRange::single(date))?.is_empty())
    }

    /// Marks every date from `start` to `end` as a holiday, overwriting any
    /// existing reason. Returns how many dates were written.
    pub fn add_range(
        store: &dyn AttendanceStore,
        start: NaiveDate,
        end: NaiveDate,
        reason: &str,
    ) -> Result<usize, CoreError> {
        let range = DateRange::new(start, end)?;
        let mut written = 0;
        for date in range.dates() {
            store.upsert_holiday(Holiday::new(date, reason)?)?;
            written += 1;
        }
        tracing::info!(%start, %end, count = written, "added holiday range");
        Ok(written)
    }
}
