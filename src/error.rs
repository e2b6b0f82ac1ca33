//! Error type shared by every stage of the simulation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while building or advancing loans, accounts and time series.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// A value could not be interpreted as a monetary decimal.
    #[error("converting to Decimal for dollar to nearest cent failed for value: {value}")]
    Conversion { value: String },

    /// A time point did not follow the previous one by exactly one month.
    #[error("next time point {next} is not valid, must be exactly one month after {previous}")]
    Sequence { next: NaiveDate, previous: NaiveDate },

    /// The monthly payment never reduces the outstanding balance, so the loan
    /// can not be paid off.
    #[error(
        "loan from {vendor} does not amortize: balance {current_amount} did not decrease in month {month}"
    )]
    NonAmortizingLoan {
        vendor: String,
        month: u32,
        current_amount: Decimal,
    },

    #[error("invalid loan: {reason}")]
    InvalidLoan { reason: String },

    #[error("invalid savings account: {reason}")]
    InvalidAccount { reason: String },

    /// Advancing a date by one month left chrono's supported range.
    #[error("date {date} can not be advanced by one month")]
    DateOutOfRange { date: NaiveDate },

    #[error("the length of time points ({time_points}) and value points ({value_points}) do not match")]
    MismatchedSeries {
        time_points: usize,
        value_points: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
