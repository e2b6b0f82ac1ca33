//! Lifetime savings from putting a lump sum against a loan.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::loan::FixedRateLoan;
use crate::money::{MAX_DOLLARS, Money, cents};

pub const MAKE_ADDITIONAL_PAYMENT_ACTION: &str = "Make additional loan payment";

/// A hypothetical action taken on a liability and what it saves over the
/// liability's remaining life.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiabilityMitigationAction {
    pub action: String,
    /// Negative when the action costs more than it saves.
    pub lifetime_amount_saved: Money,
}

/// Compares paying the loan off on schedule with making an extra `payment`
/// now and then following the schedule.
///
/// The extra payment lands at the start of a billing period, before any
/// interest accrues on it. The saving is net of the extra payment itself.
///
/// # Errors
///
/// Returns [`Error::InvalidLoan`] for an extra payment whose size exceeds
/// [`MAX_DOLLARS`], and propagates [`Error::NonAmortizingLoan`] from either
/// payment plan.
pub fn simulate_savings_from_additional_payment(
    loan: &FixedRateLoan,
    payment: Money,
) -> Result<LiabilityMitigationAction> {
    let payment = cents(payment);
    if payment.abs() > MAX_DOLLARS {
        return Err(Error::InvalidLoan {
            reason: format!("additional payment can not exceed {MAX_DOLLARS}, got {payment}"),
        });
    }

    let no_action_total = loan.remaining_total_payment_required()?;
    let after_payment = loan.make_payment(payment).loan;
    let with_action_total = after_payment.remaining_total_payment_required()? + payment;
    let lifetime_amount_saved = no_action_total - with_action_total;

    debug!(
        "Extra payment of {} on {} loan: {} on schedule, {} with payment, {} saved",
        payment,
        loan.vendor(),
        no_action_total,
        with_action_total,
        lifetime_amount_saved
    );

    Ok(LiabilityMitigationAction {
        action: MAKE_ADDITIONAL_PAYMENT_ACTION.to_string(),
        lifetime_amount_saved,
    })
}
