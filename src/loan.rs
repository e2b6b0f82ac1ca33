//! Fixed-rate loan state and the monthly payment waterfall.
//!
//! Interest is simple: each month accrues `principal * annual_rate / 12`,
//! rounded to cents, on top of the outstanding balance. A payment settles the
//! outstanding interest first and puts any remainder towards principal.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::money::{
    MAX_ANNUAL_RATE, MAX_DOLLARS, Money, Rate, ZERO_DOLLARS, cents, monthly_accrual, monthly_rate,
};

/// How a single payment was split between interest and principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentInfo {
    /// Portion of the payment that settled outstanding interest.
    pub interest_paid: Money,
    /// Portion of the payment that reduced principal.
    pub principal_paid: Money,
}

impl PaymentInfo {
    pub fn total_paid(&self) -> Money {
        self.interest_paid + self.principal_paid
    }
}

/// The loan after a payment, together with the split that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentResult {
    pub loan: FixedRateLoan,
    pub payment: PaymentInfo,
}

/// A simple-interest loan with a fixed contractual monthly payment.
///
/// Values are immutable: every transition returns a new loan and leaves the
/// receiver as it was.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixedRateLoan {
    vendor: String,
    current_amount: Money,
    principal: Money,
    annual_interest_rate: Rate,
    monthly_payment: Money,
    lifetime_payments: Money,
}

impl FixedRateLoan {
    /// Builds a loan with no payment history.
    ///
    /// Dollar amounts are rounded to cents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLoan`] if the vendor is empty, any amount or the
    /// rate is negative, an amount is above [`MAX_DOLLARS`] or the rate above
    /// [`MAX_ANNUAL_RATE`], or the principal exceeds the outstanding balance.
    pub fn new(
        vendor: impl Into<String>,
        current_amount: Money,
        principal: Money,
        annual_interest_rate: Rate,
        monthly_payment: Money,
    ) -> Result<Self> {
        let loan = Self {
            vendor: vendor.into(),
            current_amount: cents(current_amount),
            principal: cents(principal),
            annual_interest_rate,
            monthly_payment: cents(monthly_payment),
            lifetime_payments: ZERO_DOLLARS,
        };
        loan.validate()?;
        Ok(loan)
    }

    /// The same loan with `lifetime_payments` already made against it.
    pub fn with_lifetime_payments(self, lifetime_payments: Money) -> Result<Self> {
        let lifetime_payments = cents(lifetime_payments);
        if lifetime_payments < ZERO_DOLLARS {
            return Err(invalid("lifetime payments can not be negative"));
        }
        if lifetime_payments > MAX_DOLLARS {
            return Err(invalid(format!(
                "lifetime payments can not exceed {MAX_DOLLARS}, got {lifetime_payments}"
            )));
        }
        Ok(Self {
            lifetime_payments,
            ..self
        })
    }

    fn validate(&self) -> Result<()> {
        if self.vendor.is_empty() {
            return Err(invalid("vendor must not be empty"));
        }
        for (name, amount) in [
            ("current amount", self.current_amount),
            ("principal", self.principal),
            ("monthly payment", self.monthly_payment),
            ("annual interest rate", self.annual_interest_rate),
        ] {
            if amount < ZERO_DOLLARS {
                return Err(invalid(format!("{name} can not be negative, got {amount}")));
            }
        }
        for (name, amount) in [
            ("current amount", self.current_amount),
            ("monthly payment", self.monthly_payment),
        ] {
            if amount > MAX_DOLLARS {
                return Err(invalid(format!(
                    "{name} can not exceed {MAX_DOLLARS}, got {amount}"
                )));
            }
        }
        if self.annual_interest_rate > MAX_ANNUAL_RATE {
            return Err(invalid(format!(
                "annual interest rate can not exceed {MAX_ANNUAL_RATE}, got {}",
                self.annual_interest_rate
            )));
        }
        if self.principal > self.current_amount {
            return Err(invalid(format!(
                "principal {} exceeds current amount {}",
                self.principal, self.current_amount
            )));
        }
        Ok(())
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Outstanding balance: principal plus accrued, unpaid interest.
    pub fn current_amount(&self) -> Money {
        self.current_amount
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn annual_interest_rate(&self) -> Rate {
        self.annual_interest_rate
    }

    pub fn monthly_payment(&self) -> Money {
        self.monthly_payment
    }

    /// Sum of every payment ever applied to this loan.
    pub fn lifetime_payments(&self) -> Money {
        self.lifetime_payments
    }

    /// Accrued interest not yet paid.
    pub fn interest(&self) -> Money {
        self.current_amount - self.principal
    }

    pub fn monthly_interest_rate(&self) -> Rate {
        monthly_rate(self.annual_interest_rate)
    }

    pub fn is_paid_off(&self) -> bool {
        self.current_amount.is_zero()
    }

    /// Interest one month adds to the balance.
    pub fn monthly_accrued_interest(&self) -> Money {
        monthly_accrual(self.principal, self.annual_interest_rate)
    }

    /// The loan after one month of interest has been added to its balance.
    pub fn after_monthly_interest_accum(&self) -> Self {
        Self {
            current_amount: self.current_amount + self.monthly_accrued_interest(),
            ..self.clone()
        }
    }

    /// Applies `payment` to the loan as it stands, without accruing interest.
    ///
    /// Outstanding interest is paid first. What is left reduces principal, up
    /// to the principal outstanding; anything beyond payoff is not consumed.
    /// A payment that does not cover the interest goes entirely to interest.
    /// Negative payments are treated as zero.
    pub fn make_payment(&self, payment: Money) -> PaymentResult {
        let payment = cents(payment).max(ZERO_DOLLARS);
        let interest = self.interest();
        let possible_principal_debit = payment - interest;

        let payment_info = if possible_principal_debit > ZERO_DOLLARS {
            PaymentInfo {
                interest_paid: interest,
                principal_paid: possible_principal_debit.min(self.principal),
            }
        } else {
            PaymentInfo {
                interest_paid: payment,
                principal_paid: ZERO_DOLLARS,
            }
        };

        let total_paid = payment_info.total_paid();
        let loan = Self {
            current_amount: self.current_amount - total_paid,
            principal: self.principal - payment_info.principal_paid,
            lifetime_payments: self.lifetime_payments + total_paid,
            ..self.clone()
        };

        PaymentResult {
            loan,
            payment: payment_info,
        }
    }

    /// One billing cycle: accrue the month's interest, then apply the
    /// contractual monthly payment to the accrued balance.
    pub fn make_monthly_payment(&self) -> PaymentResult {
        self.after_monthly_interest_accum()
            .make_payment(self.monthly_payment)
    }
}

fn invalid(reason: impl Into<String>) -> Error {
    Error::InvalidLoan {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn loan_130_100(monthly_payment: Money, lifetime_payments: Money) -> FixedRateLoan {
        FixedRateLoan::new("TestBank", dec!(130.00), dec!(100.00), dec!(0.12), monthly_payment)
            .unwrap()
            .with_lifetime_payments(lifetime_payments)
            .unwrap()
    }

    #[test]
    fn test_interest_computed_correctly() {
        let loan =
            FixedRateLoan::new("TestBank", dec!(10500), dec!(10000), dec!(0.06), dec!(500)).unwrap();
        assert_eq!(loan.interest(), dec!(500.00));
        assert_eq!(loan.current_amount().to_string(), "10500.00");
    }

    #[test]
    fn test_monthly_interest_rate_computed_correctly() {
        let loan = FixedRateLoan::new(
            "TestBank",
            dec!(10000.00),
            dec!(10000.00),
            dec!(0.06),
            dec!(111.02),
        )
        .unwrap();
        assert_eq!(loan.monthly_interest_rate(), dec!(0.005));
    }

    #[rstest]
    #[case(dec!(200.00), dec!(100.00), false)]
    #[case(dec!(0.00), dec!(0.00), true)]
    fn test_is_paid_off(#[case] current: Money, #[case] principal: Money, #[case] expected: bool) {
        let loan = FixedRateLoan::new("TestBank", current, principal, dec!(6.0), dec!(50.00)).unwrap();
        assert_eq!(loan.is_paid_off(), expected);
    }

    #[test]
    fn test_new_rejects_invalid_terms() {
        let empty_vendor = FixedRateLoan::new("", dec!(1), dec!(1), dec!(0.1), dec!(1));
        assert!(matches!(empty_vendor, Err(Error::InvalidLoan { .. })));

        let principal_too_large =
            FixedRateLoan::new("TestBank", dec!(100), dec!(101), dec!(0.1), dec!(1));
        assert!(matches!(principal_too_large, Err(Error::InvalidLoan { .. })));

        let negative_payment =
            FixedRateLoan::new("TestBank", dec!(100), dec!(100), dec!(0.1), dec!(-1));
        assert!(matches!(negative_payment, Err(Error::InvalidLoan { .. })));

        let negative_rate =
            FixedRateLoan::new("TestBank", dec!(100), dec!(100), dec!(-0.1), dec!(1));
        assert!(matches!(negative_rate, Err(Error::InvalidLoan { .. })));

        let negative_history = FixedRateLoan::new("TestBank", dec!(1), dec!(1), dec!(0.1), dec!(1))
            .unwrap()
            .with_lifetime_payments(dec!(-5));
        assert!(matches!(negative_history, Err(Error::InvalidLoan { .. })));
    }

    #[test]
    fn test_interest_accumulation_only_touches_balance() {
        let loan = loan_130_100(dec!(50), dec!(10));
        let accrued = loan.after_monthly_interest_accum();

        assert_eq!(accrued.current_amount(), dec!(131.00));
        assert_eq!(accrued.principal(), dec!(100.00));
        assert_eq!(accrued.lifetime_payments(), dec!(10.00));
        assert_eq!(loan.current_amount(), dec!(130.00));
    }

    #[rstest]
    // 0.125% of 4.00 is exactly half a cent.
    #[case(dec!(4.00), dec!(0.015), dec!(0.01))]
    // 130.00 * 0.03 / 12 = 0.325
    #[case(dec!(130.00), dec!(0.03), dec!(0.33))]
    // 6.00 * 0.07 / 12 = 0.035, a tie even though 0.07 / 12 does not terminate
    #[case(dec!(6.00), dec!(0.07), dec!(0.04))]
    // 1506.00 * 0.07 / 12 = 8.785
    #[case(dec!(1506.00), dec!(0.07), dec!(8.79))]
    fn test_accrual_rounds_half_up(
        #[case] principal: Money,
        #[case] annual_interest_rate: Rate,
        #[case] expected: Money,
    ) {
        let loan =
            FixedRateLoan::new("TestBank", principal, principal, annual_interest_rate, dec!(1))
                .unwrap();

        assert_eq!(loan.monthly_accrued_interest(), expected);
        assert_eq!(
            loan.after_monthly_interest_accum().current_amount(),
            principal + expected
        );
    }

    #[test]
    fn test_new_rejects_out_of_range_terms() {
        let huge_balance =
            FixedRateLoan::new("TestBank", Decimal::MAX, dec!(1), dec!(0.1), dec!(1));
        assert!(matches!(huge_balance, Err(Error::InvalidLoan { .. })));

        let huge_payment =
            FixedRateLoan::new("TestBank", dec!(100), dec!(100), dec!(0.1), Decimal::MAX);
        assert!(matches!(huge_payment, Err(Error::InvalidLoan { .. })));

        let huge_rate =
            FixedRateLoan::new("TestBank", dec!(100), dec!(100), Decimal::MAX, dec!(1));
        assert!(matches!(huge_rate, Err(Error::InvalidLoan { .. })));

        let huge_history = FixedRateLoan::new("TestBank", dec!(1), dec!(1), dec!(0.1), dec!(1))
            .unwrap()
            .with_lifetime_payments(Decimal::MAX);
        assert!(matches!(huge_history, Err(Error::InvalidLoan { .. })));
    }

    #[test]
    fn test_accrual_at_largest_terms_does_not_overflow() {
        let loan =
            FixedRateLoan::new("TestBank", MAX_DOLLARS, MAX_DOLLARS, MAX_ANNUAL_RATE, MAX_DOLLARS)
                .unwrap();

        let PaymentResult { loan: after, payment } = loan.make_monthly_payment();

        // The payment covers only part of the 8333333333333333.33 accrued.
        assert_eq!(payment.interest_paid, MAX_DOLLARS);
        assert_eq!(payment.principal_paid, ZERO_DOLLARS);
        assert_eq!(after.current_amount(), dec!(8333333333333333.33));
        assert_eq!(after.principal(), MAX_DOLLARS);
        assert_eq!(after.lifetime_payments(), MAX_DOLLARS);
    }

    #[rstest]
    #[case::first_payment(dec!(0))]
    #[case::subsequent_payment(dec!(200))]
    fn test_monthly_payment_pays_off_when_payment_exceeds_balance(#[case] total_paid: Money) {
        let loan = loan_130_100(dec!(150.00), total_paid);
        let original = loan.clone();

        let PaymentResult { loan: after, payment } = loan.make_monthly_payment();

        assert_eq!(loan, original);
        assert_eq!(after.current_amount(), ZERO_DOLLARS);
        assert_eq!(after.principal(), ZERO_DOLLARS);
        // 130 balance + 1% of 100 principal
        assert_eq!(after.lifetime_payments(), total_paid + dec!(131.00));
        assert!(after.is_paid_off());
        assert_eq!(payment.interest_paid, dec!(31));
        assert_eq!(payment.principal_paid, dec!(100));
        assert_eq!(payment.total_paid(), dec!(131.00));
    }

    #[rstest]
    #[case::first_payment(dec!(0))]
    #[case::subsequent_payment(dec!(200))]
    fn test_monthly_payment_covers_only_part_of_interest(#[case] total_paid: Money) {
        let loan = loan_130_100(dec!(30.99), total_paid);

        let PaymentResult { loan: after, payment } = loan.make_monthly_payment();

        assert_eq!(after.current_amount(), dec!(100.01));
        assert_eq!(after.principal(), dec!(100.00));
        assert_eq!(after.interest(), dec!(0.01));
        assert_eq!(after.lifetime_payments(), total_paid + dec!(30.99));
        assert!(!after.is_paid_off());
        assert_eq!(payment.interest_paid, dec!(30.99));
        assert_eq!(payment.principal_paid, ZERO_DOLLARS);
    }

    #[rstest]
    #[case::first_payment(dec!(0))]
    #[case::subsequent_payment(dec!(200))]
    fn test_monthly_payment_exactly_equal_to_interest(#[case] total_paid: Money) {
        let loan = loan_130_100(dec!(31), total_paid);

        let PaymentResult { loan: after, payment } = loan.make_monthly_payment();

        assert_eq!(after.current_amount(), dec!(100.00));
        assert_eq!(after.principal(), dec!(100.00));
        assert_eq!(after.interest(), ZERO_DOLLARS);
        assert_eq!(after.lifetime_payments(), total_paid + dec!(31));
        assert!(!after.is_paid_off());
        assert_eq!(payment.interest_paid, dec!(31));
        assert_eq!(payment.principal_paid, ZERO_DOLLARS);
    }

    #[rstest]
    #[case::first_payment(dec!(0))]
    #[case::subsequent_payment(dec!(200))]
    fn test_monthly_payment_reduces_principal(#[case] total_paid: Money) {
        let loan = loan_130_100(dec!(50), total_paid);

        let PaymentResult { loan: after, payment } = loan.make_monthly_payment();

        // 31 in interest paid off => 19 left over for principal
        assert_eq!(after.current_amount(), dec!(81.00));
        assert_eq!(after.principal(), dec!(81.00));
        assert_eq!(after.interest(), ZERO_DOLLARS);
        assert_eq!(after.lifetime_payments(), total_paid + dec!(50));
        assert!(!after.is_paid_off());
        assert_eq!(payment.interest_paid, dec!(31));
        assert_eq!(payment.principal_paid, dec!(19));
    }

    #[test]
    fn test_make_payment_skips_accrual() {
        let loan = loan_130_100(dec!(50), dec!(0));

        let PaymentResult { loan: after, payment } = loan.make_payment(dec!(49.00));

        assert_eq!(payment.interest_paid, dec!(30.00));
        assert_eq!(payment.principal_paid, dec!(19.00));
        assert_eq!(after.current_amount(), dec!(81.00));
        assert_eq!(after.lifetime_payments(), dec!(49.00));
    }

    #[test]
    fn test_make_payment_overpayment_is_not_consumed() {
        let loan = loan_130_100(dec!(50), dec!(0));

        let PaymentResult { loan: after, payment } = loan.make_payment(dec!(500.00));

        assert_eq!(payment.total_paid(), dec!(130.00));
        assert!(after.is_paid_off());
        assert_eq!(after.lifetime_payments(), dec!(130.00));
    }

    #[test]
    fn test_make_payment_rounds_and_floors_amount() {
        let loan = loan_130_100(dec!(50), dec!(0));

        let rounded = loan.make_payment(dec!(10.005));
        assert_eq!(rounded.payment.interest_paid, dec!(10.01));

        let negative = loan.make_payment(dec!(-5));
        assert_eq!(negative.payment.total_paid(), ZERO_DOLLARS);
        assert_eq!(negative.loan, loan);
    }

    #[test]
    fn test_monthly_payment_conserves_balance() {
        let loan = FixedRateLoan::new(
            "TestBank",
            dec!(20000.00),
            dec!(18000.00),
            dec!(0.08),
            dec!(600.00),
        )
        .unwrap();
        let accrued = loan.monthly_accrued_interest();

        let PaymentResult { loan: after, payment } = loan.make_monthly_payment();

        assert_eq!(accrued, dec!(120.00));
        assert_eq!(
            payment.interest_paid + payment.principal_paid,
            payment.total_paid()
        );
        assert_eq!(
            after.current_amount(),
            loan.current_amount() + accrued - payment.total_paid()
        );
        assert_eq!(payment.interest_paid, dec!(600.00));
        assert_eq!(after.current_amount(), dec!(19520.00));
    }
}
