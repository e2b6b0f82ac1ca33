//! Compares putting spare capital against a loan with depositing it in a
//! high-yield savings account.

use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::loan::FixedRateLoan;
use crate::mitigation::{LiabilityMitigationAction, simulate_savings_from_additional_payment};
use crate::money::{Money, Rate, ZERO_DOLLARS};
use crate::savings::HighYieldSavingsAccount;
use crate::series::{AccumTimeSeries, make_const_series, make_temporal_asset_time_series};

pub const LOAN_SAVINGS_LABEL: &str = "Loan Savings";

fn default_months() -> u32 {
    180
}

/// Loan terms as read from configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanConfig {
    pub vendor: String,
    pub current_amount: Money,
    pub principal: Money,
    /// Decimal fraction, 0.08 for 8%.
    pub annual_interest_rate: Rate,
    pub monthly_payment: Money,
    #[serde(default)]
    pub lifetime_payments: Money,
}

impl LoanConfig {
    pub fn build(&self) -> Result<FixedRateLoan> {
        FixedRateLoan::new(
            self.vendor.clone(),
            self.current_amount,
            self.principal,
            self.annual_interest_rate,
            self.monthly_payment,
        )?
        .with_lifetime_payments(self.lifetime_payments)
    }
}

/// The savings account the capital would otherwise go into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsConfig {
    pub as_of_date: NaiveDate,
    pub vendor: String,
    pub apy: Rate,
}

/// Inputs for [`run_comparison`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Lump sum available to allocate.
    pub capital_available: Money,
    pub loan: LoanConfig,
    pub savings: SavingsConfig,
    /// Length of the savings projection.
    #[serde(default = "default_months")]
    pub months: u32,
}

impl ComparisonConfig {
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse comparison config")
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read comparison config {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid comparison config {}", path.display()))
    }
}

/// Outcome of both allocations over the same months.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub loan_mitigation: LiabilityMitigationAction,
    /// Interest earned by the savings account, month by month.
    pub savings_series: AccumTimeSeries,
    /// Lifetime loan savings, repeated at each savings time point.
    pub loan_savings_series: AccumTimeSeries,
}

impl Comparison {
    /// Savings earnings at the end of the projection minus the loan savings.
    /// Positive means the savings account came out ahead.
    pub fn savings_advantage(&self) -> Money {
        let earned = self
            .savings_series
            .value_points
            .last()
            .copied()
            .unwrap_or(ZERO_DOLLARS);
        earned - self.loan_mitigation.lifetime_amount_saved
    }
}

pub fn run_comparison(config: &ComparisonConfig) -> Result<Comparison> {
    let loan = config.loan.build()?;
    let loan_mitigation = simulate_savings_from_additional_payment(&loan, config.capital_available)?;

    let account = HighYieldSavingsAccount::new(
        config.savings.as_of_date,
        config.savings.vendor.clone(),
        config.savings.apy,
        config.capital_available,
    )?;
    let savings_series = make_temporal_asset_time_series(&account, config.months, None)?;
    let loan_savings_series = make_const_series(
        &savings_series.time_points,
        loan_mitigation.lifetime_amount_saved,
        LOAN_SAVINGS_LABEL,
    );

    let comparison = Comparison {
        loan_mitigation,
        savings_series,
        loan_savings_series,
    };
    debug!(
        "Allocating {} over {} months: savings advantage {}",
        config.capital_available,
        config.months,
        comparison.savings_advantage()
    );
    Ok(comparison)
}
