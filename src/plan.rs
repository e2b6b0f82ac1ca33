//! Month-by-month payment plans and the total still owed on a loan.
//!
//! Plans are produced by replaying [`FixedRateLoan::make_monthly_payment`]
//! until payoff instead of using a closed-form amortization formula, which
//! keeps the per-month cent rounding exact and works from any mid-life state.

use log::{debug, trace, warn};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::loan::{FixedRateLoan, PaymentInfo};
use crate::money::{Money, ZERO_DOLLARS};

/// Loan position after one month's payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentPlanRecord {
    /// Month number, starting at 1.
    pub month: u32,
    /// Outstanding balance after the payment.
    pub total_remaining: Money,
    pub principal_remaining: Money,
    pub interest_remaining: Money,
    /// Lifetime payments on the loan, including this month's.
    pub cum_total_paid: Money,
    pub monthly_principal_paid: Money,
    pub monthly_interest_paid: Money,
}

impl PaymentPlanRecord {
    fn new(month: u32, loan: &FixedRateLoan, payment: &PaymentInfo) -> Self {
        Self {
            month,
            total_remaining: loan.current_amount(),
            principal_remaining: loan.principal(),
            interest_remaining: loan.interest(),
            cum_total_paid: loan.lifetime_payments(),
            monthly_principal_paid: payment.principal_paid,
            monthly_interest_paid: payment.interest_paid,
        }
    }

    pub fn monthly_total_paid(&self) -> Money {
        self.monthly_principal_paid + self.monthly_interest_paid
    }
}

/// Chronological payment records, ending with the month the loan is paid off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PaymentPlan {
    records: Vec<PaymentPlanRecord>,
}

impl PaymentPlan {
    pub fn records(&self) -> &[PaymentPlanRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&PaymentPlanRecord> {
        self.records.last()
    }

    /// Lifetime payments on the loan once the plan completes.
    pub fn final_lifetime_payments(&self) -> Option<Money> {
        self.last().map(|record| record.cum_total_paid)
    }

    /// Sum of the payments made over the plan.
    pub fn total_paid(&self) -> Money {
        self.records
            .iter()
            .map(PaymentPlanRecord::monthly_total_paid)
            .sum()
    }

    pub fn total_interest_paid(&self) -> Money {
        self.records
            .iter()
            .map(|record| record.monthly_interest_paid)
            .sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PaymentPlanRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a PaymentPlan {
    type Item = &'a PaymentPlanRecord;
    type IntoIter = std::slice::Iter<'a, PaymentPlanRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FixedRateLoan {
    /// Replays monthly payments until the loan is paid off.
    ///
    /// The plan strictly follows the stated monthly payment; the last month
    /// only pays what is left. A loan that is already paid off yields an empty
    /// plan.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonAmortizingLoan`] as soon as a month fails to reduce
    /// the balance. Principal is untouched in such a month and the payment does
    /// not exceed the interest it accrues, so every later month repeats it.
    pub fn compute_payment_plan(&self) -> Result<PaymentPlan> {
        let mut loan = self.clone();
        let mut records = Vec::new();
        let mut month = 1;

        while !loan.is_paid_off() {
            let result = loan.make_monthly_payment();
            if !result.loan.is_paid_off()
                && result.loan.current_amount() >= loan.current_amount()
            {
                warn!(
                    "Loan from {} stops amortizing in month {}: balance {} -> {} with payment {}",
                    loan.vendor(),
                    month,
                    loan.current_amount(),
                    result.loan.current_amount(),
                    loan.monthly_payment()
                );
                return Err(Error::NonAmortizingLoan {
                    vendor: loan.vendor().to_string(),
                    month,
                    current_amount: result.loan.current_amount(),
                });
            }

            let record = PaymentPlanRecord::new(month, &result.loan, &result.payment);
            trace!("{:?}", record);
            records.push(record);

            loan = result.loan;
            month += 1;
        }

        debug!(
            "Payment plan for {} pays off in {} months",
            self.vendor(),
            records.len()
        );
        Ok(PaymentPlan { records })
    }

    /// Total of all future payments needed to pay the loan off from its
    /// current state, regardless of what was paid before.
    pub fn remaining_total_payment_required(&self) -> Result<Money> {
        let plan = self.compute_payment_plan()?;
        Ok(plan
            .final_lifetime_payments()
            .map_or(ZERO_DOLLARS, |last_total| last_total - self.lifetime_payments()))
    }
}
