//! Monthly time series of an asset's accumulated value, used to compare
//! alternatives side by side.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::money::Money;
use crate::temporal::{TemporalAsset, one_month_after};

/// A finished, labelled series of monthly points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccumTimeSeries {
    pub label: String,
    pub time_points: Vec<NaiveDate>,
    pub value_points: Vec<Money>,
}

impl AccumTimeSeries {
    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (NaiveDate, Money)> + '_ {
        self.time_points
            .iter()
            .copied()
            .zip(self.value_points.iter().copied())
    }
}

/// Collects points that must each fall exactly one month after the last.
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesAccumulator {
    time_points: Vec<NaiveDate>,
    value_points: Vec<Money>,
}

impl TimeSeriesAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an accumulator with existing points, checking them as if they
    /// were added one by one.
    pub fn from_points(time_points: Vec<NaiveDate>, value_points: Vec<Money>) -> Result<Self> {
        if time_points.len() != value_points.len() {
            return Err(Error::MismatchedSeries {
                time_points: time_points.len(),
                value_points: value_points.len(),
            });
        }
        let mut accumulator = Self::new();
        for (time_point, value_point) in time_points.into_iter().zip(value_points) {
            accumulator.add_point(time_point, value_point)?;
        }
        Ok(accumulator)
    }

    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    /// Appends a point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Sequence`] unless `time_point` is exactly one calendar
    /// month after the last recorded point.
    pub fn add_point(&mut self, time_point: NaiveDate, value_point: Money) -> Result<()> {
        if let Some(&previous) = self.time_points.last() {
            if one_month_after(previous)? != time_point {
                return Err(Error::Sequence {
                    next: time_point,
                    previous,
                });
            }
        }
        self.time_points.push(time_point);
        self.value_points.push(value_point);
        Ok(())
    }

    pub fn collect(self, label: impl Into<String>) -> AccumTimeSeries {
        AccumTimeSeries {
            label: label.into(),
            time_points: self.time_points,
            value_points: self.value_points,
        }
    }
}

/// Value gained by `asset` over `num_months` months, starting at zero on the
/// asset's own date. The series holds `num_months + 1` points.
///
/// The label defaults to the asset's `Display` rendering.
pub fn make_temporal_asset_time_series<A>(
    asset: &A,
    num_months: u32,
    label: Option<&str>,
) -> Result<AccumTimeSeries>
where
    A: TemporalAsset + Clone + std::fmt::Display,
{
    let label = label.map_or_else(|| asset.to_string(), str::to_string);
    let original_value = asset.total_value();
    let mut accumulator = TimeSeriesAccumulator::new();
    let mut current = asset.clone();

    accumulator.add_point(current.as_of_date(), current.total_value() - original_value)?;
    for _ in 0..num_months {
        current = current.after_one_month()?;
        accumulator.add_point(current.as_of_date(), current.total_value() - original_value)?;
    }
    Ok(accumulator.collect(label))
}

/// A flat series holding `value` at each of `time_points`.
pub fn make_const_series(
    time_points: &[NaiveDate],
    value: Money,
    label: impl Into<String>,
) -> AccumTimeSeries {
    AccumTimeSeries {
        label: label.into(),
        time_points: time_points.to_vec(),
        value_points: vec![value; time_points.len()],
    }
}
