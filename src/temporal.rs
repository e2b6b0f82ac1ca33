//! Calendar-driven advancement shared by everything that evolves month by month.

use chrono::{Months, NaiveDate};

use crate::error::{Error, Result};
use crate::money::Money;

/// The date exactly one calendar month after `date`.
///
/// The day of month is kept where possible and clamped to the end of shorter
/// months, so January 31st is followed by the last day of February.
pub fn one_month_after(date: NaiveDate) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(1))
        .ok_or(Error::DateOutOfRange { date })
}

/// An asset that can be advanced one calendar month at a time.
///
/// Implementors provide the state change for a completed month; the date
/// arithmetic is shared through [`TemporalAsset::after_one_month`]. Every
/// step returns a new value and leaves `self` untouched.
pub trait TemporalAsset: Sized {
    /// The date the asset's state is valid for.
    fn as_of_date(&self) -> NaiveDate;

    /// Total value of the asset on [`TemporalAsset::as_of_date`].
    fn total_value(&self) -> Money;

    /// The asset after a month has elapsed, dated `new_date`.
    fn after_month_completed(&self, new_date: NaiveDate) -> Result<Self>;

    fn after_one_month(&self) -> Result<Self> {
        let new_date = one_month_after(self.as_of_date())?;
        self.after_month_completed(new_date)
    }
}
