//! Installment quote computation and calculator state

use common::decimal::{format_percent, parse_price, precision, CurrencyFormat, Money, Rate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::amortization::monthly_payment;
use crate::policy::FinancingPolicy;
#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

/// Financing quote for a single price and term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Property price the quote is based on
    pub price: Money,
    /// Upfront payment, rounded to whole units
    pub down_payment: Money,
    /// Financed amount, always `price - down_payment`
    pub loan_amount: Money,
    /// Loan term after clamping to the policy range
    pub term_months: i64,
    /// Nominal annual rate
    pub annual_rate: Rate,
    /// Annual rate divided by twelve
    pub monthly_rate: Rate,
    /// Monthly installment, rounded to whole units
    pub monthly_payment: Money,
}

/// Display-ready rendering of a [`Quote`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub price: String,
    pub down_payment: String,
    pub loan_amount: String,
    pub monthly_payment: String,
    pub term_months: i64,
    /// Annual rate as a percentage, e.g. "5.5%"
    pub rate: String,
}

/// Compute a quote for `price` over `term_months` under `policy`.
///
/// Pure and total: negative prices count as zero and the term is clamped
/// into the policy's range.
pub fn compute_quote(price: Money, term_months: i64, policy: &FinancingPolicy) -> Quote {
    let price = price.max(Money::ZERO);
    let term_months = policy.clamp_term(term_months);

    let down_payment = precision::round_currency(price * policy.down_payment_ratio);
    let loan_amount = price - down_payment;
    let monthly_rate = policy.monthly_rate();

    Quote {
        price,
        down_payment,
        loan_amount,
        term_months,
        annual_rate: policy.annual_rate,
        monthly_rate,
        monthly_payment: monthly_payment(loan_amount, monthly_rate, term_months),
    }
}

impl Quote {
    /// Format the money fields with `currency`
    pub fn summary(&self, currency: &CurrencyFormat) -> QuoteSummary {
        QuoteSummary {
            price: currency.format(self.price),
            down_payment: currency.format(self.down_payment),
            loan_amount: currency.format(self.loan_amount),
            monthly_payment: currency.format(self.monthly_payment),
            term_months: self.term_months,
            rate: format_percent(self.annual_rate),
        }
    }
}

/// Calculator state behind a listing's "Installment Calculator" panel.
///
/// The user may edit the price and the term. Every edit recomputes the
/// whole quote before returning, so readers never observe a down payment
/// that disagrees with the price or a payment that disagrees with the term.
#[derive(Debug, Clone)]
pub struct InstallmentCalculator {
    policy: FinancingPolicy,
    price: Money,
    term_months: i64,
    quote: Quote,
}

impl InstallmentCalculator {
    /// Start from a numeric price with the policy's default term
    pub fn new(price: Money, policy: FinancingPolicy) -> Self {
        let term_months = policy.default_term_months;
        Self {
            policy,
            price,
            term_months,
            quote: compute_quote(price, term_months, &policy),
        }
    }

    /// Start from a listing's display price, e.g. "₦45,000,000"
    pub fn from_listing_price(price: &str, policy: FinancingPolicy) -> Self {
        Self::new(parse_price(price), policy)
    }

    /// Override the price with a user-entered amount
    pub fn set_price(&mut self, price: Money) -> &Quote {
        self.price = price.max(Money::ZERO);
        self.recompute()
    }

    /// Re-enter the price as text; unparseable input counts as zero
    pub fn set_price_text(&mut self, price: &str) -> &Quote {
        self.set_price(parse_price(price))
    }

    /// Choose a term; values outside the policy range are clamped
    pub fn set_term(&mut self, term_months: i64) -> &Quote {
        self.term_months = self.policy.clamp_term(term_months);
        self.recompute()
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn term_months(&self) -> i64 {
        self.term_months
    }

    pub fn policy(&self) -> &FinancingPolicy {
        &self.policy
    }

    /// Current quote
    pub fn quote(&self) -> &Quote {
        &self.quote
    }

    fn recompute(&mut self) -> &Quote {
        self.quote = compute_quote(self.price, self.term_months, &self.policy);
        debug!(
            price = %self.quote.price,
            term_months = self.quote.term_months,
            monthly_payment = %self.quote.monthly_payment,
            "Recomputed installment quote"
        );
        &self.quote
    }
}

impl Default for InstallmentCalculator {
    fn default() -> Self {
        Self::new(Money::ZERO, FinancingPolicy::STANDARD)
    }
}
