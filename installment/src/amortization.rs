//! Ordinary-annuity payment arithmetic

use common::decimal::{precision, Money, Rate};
use rust_decimal::MathematicalOps;

/// Fixed periodic payment that retires `principal` over `term_months`
/// equal payments at `monthly_rate` per period. Unrounded.
///
/// Returns zero for a non-positive principal or term. A zero rate falls
/// back to straight-line division.
pub fn amortized_payment(principal: Money, monthly_rate: Rate, term_months: i64) -> Money {
    if principal <= Money::ZERO || term_months <= 0 {
        return Money::ZERO;
    }

    // Past the representable range the payment has converged to the interest-only amount
    let Some(growth) = (Rate::ONE + monthly_rate).checked_powi(term_months) else {
        return principal * monthly_rate;
    };
    let denominator = growth - Rate::ONE;
    if denominator.is_zero() {
        return principal / Money::from(term_months);
    }

    principal * (monthly_rate * growth / denominator)
}

/// [`amortized_payment`] rounded to the nearest whole currency unit
pub fn monthly_payment(principal: Money, monthly_rate: Rate, term_months: i64) -> Money {
    precision::round_currency(amortized_payment(principal, monthly_rate, term_months))
}
