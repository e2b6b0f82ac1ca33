//! Cent-quantized money and rate helpers.
//!
//! Every dollar amount that leaves an arithmetic step goes through [`cents`]
//! (or [`round_dollar_to_nearest_cent`] for loosely typed input), so stored
//! state never carries fractions of a cent.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::{Error, Result};

/// A dollar amount scaled to exactly two fractional digits.
pub type Money = Decimal;

/// A rate as a decimal fraction (0.06 = 6%), never a percentage.
pub type Rate = Decimal;

/// Number of fractional digits carried by [`Money`].
pub const DOLLAR_DECIMAL_SCALE: u32 = 2;

pub const MONTHS_IN_YEAR: Decimal = dec!(12);

pub const ZERO_DOLLARS: Money = dec!(0.00);

/// Largest balance a loan or account may hold, one quadrillion dollars.
///
/// Together with [`MAX_ANNUAL_RATE`] this keeps every monthly product far
/// inside `Decimal`'s range.
pub const MAX_DOLLARS: Money = dec!(1000000000000000.00);

/// Largest accepted annual rate, 100 (10,000%).
pub const MAX_ANNUAL_RATE: Rate = dec!(100);

/// Values that can be read as a decimal number before rounding to cents.
///
/// Floats are read through their shortest decimal rendering, so `0.125_f64`
/// is the decimal `0.125` and not its binary expansion.
pub trait MoneyInput {
    fn to_decimal(&self) -> Result<Decimal>;
}

impl MoneyInput for Decimal {
    fn to_decimal(&self) -> Result<Decimal> {
        Ok(*self)
    }
}

macro_rules! integer_money_input {
    ($($t:ty),*) => {
        $(
            impl MoneyInput for $t {
                fn to_decimal(&self) -> Result<Decimal> {
                    Ok(Decimal::from(*self))
                }
            }
        )*
    };
}

integer_money_input!(i32, i64, u32, u64, usize);

impl MoneyInput for f64 {
    fn to_decimal(&self) -> Result<Decimal> {
        if !self.is_finite() {
            return Err(conversion_error(self));
        }
        parse_decimal(&self.to_string())
    }
}

impl MoneyInput for f32 {
    fn to_decimal(&self) -> Result<Decimal> {
        if !self.is_finite() {
            return Err(conversion_error(self));
        }
        parse_decimal(&self.to_string())
    }
}

impl MoneyInput for str {
    fn to_decimal(&self) -> Result<Decimal> {
        parse_decimal(self)
    }
}

impl MoneyInput for &str {
    fn to_decimal(&self) -> Result<Decimal> {
        parse_decimal(self)
    }
}

impl MoneyInput for String {
    fn to_decimal(&self) -> Result<Decimal> {
        parse_decimal(self)
    }
}

fn conversion_error(value: impl ToString) -> Error {
    Error::Conversion {
        value: value.to_string(),
    }
}

fn parse_decimal(raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| conversion_error(raw))
}

/// Rounds an exact decimal to cents, ties away from zero.
///
/// The result always has a scale of two, so `dec!(100)` becomes `100.00`.
pub fn cents(value: Decimal) -> Money {
    let mut rounded =
        value.round_dp_with_strategy(DOLLAR_DECIMAL_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DOLLAR_DECIMAL_SCALE);
    rounded
}

/// Interprets `value` as a decimal number and rounds it half-up to cents.
///
/// # Errors
///
/// Returns [`Error::Conversion`] when `value` is a malformed string or a
/// non-finite float.
pub fn round_dollar_to_nearest_cent<V: MoneyInput + ?Sized>(value: &V) -> Result<Money> {
    value.to_decimal().map(cents)
}

/// Converts an annual rate to a monthly one by plain division.
///
/// Rates are not money, so the result keeps full decimal precision.
pub fn monthly_rate(annual_rate: Rate) -> Rate {
    annual_rate / MONTHS_IN_YEAR
}

/// One month of simple interest on `amount`, rounded to cents.
///
/// The product is taken before dividing by twelve so that an exact
/// half-cent stays a tie: `6.00 * 0.07 / 12` is exactly `0.035` and rounds
/// to `0.04`, where `6.00 * (0.07 / 12)` would land just below it.
pub fn monthly_accrual(amount: Money, annual_rate: Rate) -> Money {
    cents(amount * annual_rate / MONTHS_IN_YEAR)
}
