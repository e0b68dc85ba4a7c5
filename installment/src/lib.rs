//! Installment calculator for property financing
//!
//! Turns a listing price into a financing quote: a fixed down payment, the
//! remaining loan amount and the monthly payment of a fully amortizing loan.

pub mod amortization;
pub mod calculator;
pub mod policy;

pub use amortization::{amortized_payment, monthly_payment};
pub use calculator::{compute_quote, InstallmentCalculator, Quote, QuoteSummary};
pub use policy::FinancingPolicy;
