//! High-yield savings account with monthly crediting.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::money::{
    MAX_ANNUAL_RATE, MAX_DOLLARS, Money, Rate, ZERO_DOLLARS, cents, monthly_accrual, monthly_rate,
};
use crate::temporal::TemporalAsset;

/// Savings balance that earns `apy / 12` of itself each month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighYieldSavingsAccount {
    as_of_date: NaiveDate,
    vendor: String,
    apy: Rate,
    balance: Money,
}

impl HighYieldSavingsAccount {
    /// Opens an account holding `balance`, rounded to cents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAccount`] for an empty vendor, or an APY or
    /// balance that is negative or above [`MAX_ANNUAL_RATE`] / [`MAX_DOLLARS`].
    pub fn new(
        as_of_date: NaiveDate,
        vendor: impl Into<String>,
        apy: Rate,
        balance: Money,
    ) -> Result<Self> {
        let vendor = vendor.into();
        if vendor.is_empty() {
            return Err(invalid("vendor must not be empty"));
        }
        if apy < Rate::ZERO {
            return Err(invalid(format!("apy can not be negative, got {apy}")));
        }
        if apy > MAX_ANNUAL_RATE {
            return Err(invalid(format!(
                "apy can not exceed {MAX_ANNUAL_RATE}, got {apy}"
            )));
        }
        let balance = cents(balance);
        if balance < ZERO_DOLLARS {
            return Err(invalid(format!("balance can not be negative, got {balance}")));
        }
        if balance > MAX_DOLLARS {
            return Err(invalid(format!(
                "balance can not exceed {MAX_DOLLARS}, got {balance}"
            )));
        }
        Ok(Self {
            as_of_date,
            vendor,
            apy,
            balance,
        })
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn apy(&self) -> Rate {
        self.apy
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn average_monthly_yield(&self) -> Rate {
        monthly_rate(self.apy)
    }
}

impl TemporalAsset for HighYieldSavingsAccount {
    fn as_of_date(&self) -> NaiveDate {
        self.as_of_date
    }

    fn total_value(&self) -> Money {
        self.balance
    }

    fn after_month_completed(&self, new_date: NaiveDate) -> Result<Self> {
        let balance = self.balance + monthly_accrual(self.balance, self.apy);
        if balance > MAX_DOLLARS {
            return Err(invalid(format!(
                "balance grew past {MAX_DOLLARS} by {new_date}, got {balance}"
            )));
        }
        Ok(Self {
            as_of_date: new_date,
            balance,
            ..self.clone()
        })
    }
}

impl fmt::Display for HighYieldSavingsAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} savings ({} APY)", self.vendor, self.apy)
    }
}

fn invalid(reason: impl Into<String>) -> Error {
    Error::InvalidAccount {
        reason: reason.into(),
    }
}
