//! Financing policy constants

use common::decimal::{dec, Rate};

/// Terms offered by the brokerage's in-house financing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinancingPolicy {
    /// Fraction of the price paid upfront
    pub down_payment_ratio: Rate,
    /// Nominal annual interest rate
    pub annual_rate: Rate,
    /// Shortest term on offer, in months
    pub min_term_months: i64,
    /// Longest term on offer, in months
    pub max_term_months: i64,
    /// Term preselected for a new quote
    pub default_term_months: i64,
}

impl FinancingPolicy {
    /// 30% down, 5.5% a year, 6 to 12 months
    pub const STANDARD: FinancingPolicy = FinancingPolicy {
        down_payment_ratio: dec!(0.30),
        annual_rate: dec!(0.055),
        min_term_months: 6,
        max_term_months: 12,
        default_term_months: 12,
    };

    /// Periodic rate applied each month
    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate / Rate::from(12)
    }

    /// Force a requested term into the offered range
    pub fn clamp_term(&self, term_months: i64) -> i64 {
        term_months.clamp(self.min_term_months, self.max_term_months)
    }
}

impl Default for FinancingPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}
