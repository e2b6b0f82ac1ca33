//! `loans_sim` simulates fixed-rate loans and savings accounts month by month
//! and measures what an extra lump-sum loan payment saves.
//!
//! All dollar amounts are [`rust_decimal::Decimal`] values rounded half-up to
//! cents after every step, so payment plans match a lender's statements to the
//! cent:
//! - **Loans** accrue simple monthly interest on principal; each payment
//!   settles the accrued interest first and then reduces principal.
//! - **Payment plans** replay the contractual monthly payment until payoff,
//!   from any point in the loan's life.
//! - **Mitigation** compares the total still owed with and without an extra
//!   payment made now.
//! - **Savings accounts** credit `apy / 12` of their balance every month and can
//!   be projected as a time series for comparison.
//!
//! ## Usage
//!
//! ```rust
//! use loans_sim::{FixedRateLoan, simulate_savings_from_additional_payment};
//! use rust_decimal_macros::dec;
//!
//! fn main() -> Result<(), loans_sim::Error> {
//!     let loan = FixedRateLoan::new(
//!         "TestBank",
//!         dec!(130.00),
//!         dec!(100.00),
//!         dec!(0.12),
//!         dec!(50.00),
//!     )?;
//!
//!     let plan = loan.compute_payment_plan()?;
//!     for record in &plan {
//!         println!(
//!             "Month {}: {:.2} remaining, {:.2} paid",
//!             record.month, record.total_remaining, record.cum_total_paid
//!         );
//!     }
//!     assert_eq!(loan.remaining_total_payment_required()?, dec!(132.13));
//!
//!     let action = simulate_savings_from_additional_payment(&loan, dec!(49.00))?;
//!     assert_eq!(action.lifetime_amount_saved, dec!(1.00));
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loan;
pub mod mitigation;
pub mod money;
pub mod plan;
pub mod savings;
pub mod series;
pub mod simulation;
pub mod temporal;

pub use error::{Error, Result};
pub use loan::{FixedRateLoan, PaymentInfo, PaymentResult};
pub use mitigation::{
    LiabilityMitigationAction, MAKE_ADDITIONAL_PAYMENT_ACTION,
    simulate_savings_from_additional_payment,
};
pub use money::{
    MAX_ANNUAL_RATE, MAX_DOLLARS, Money, MoneyInput, Rate, ZERO_DOLLARS, cents, monthly_accrual,
    monthly_rate, round_dollar_to_nearest_cent,
};
pub use plan::{PaymentPlan, PaymentPlanRecord};
pub use savings::HighYieldSavingsAccount;
pub use series::{
    AccumTimeSeries, TimeSeriesAccumulator, make_const_series, make_temporal_asset_time_series,
};
pub use simulation::{Comparison, ComparisonConfig, run_comparison};
pub use temporal::{TemporalAsset, one_month_after};
