//! Decimal type utilities for precise money calculations

use std::str::FromStr;

use rust_decimal::RoundingStrategy;
pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;

/// Money amount with high precision
pub type Money = Decimal;

/// Interest rate expressed as a fraction (0.055 for 5.5%)
pub type Rate = Decimal;

/// Precision helpers for common operations
pub mod precision {
    use super::*;

    /// Round to the nearest whole currency unit, halves away from zero
    pub fn round_currency(amount: Money) -> Money {
        amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Convert a currency-formatted price string into a money amount.
///
/// Everything except ASCII digits, `.` and `-` is stripped and the longest
/// numeric prefix of the rest is parsed. The function is total: no numeric
/// content, overflow or a negative result all yield zero.
pub fn parse_price(input: &str) -> Money {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let Some(literal) = numeric_prefix(&cleaned) else {
        return Money::ZERO;
    };

    match Money::from_str(&literal) {
        Ok(value) if value > Money::ZERO => value,
        _ => Money::ZERO,
    }
}

/// Longest `-?digits(.digits)?` prefix, normalised so the integer part is
/// never empty. `None` when the prefix carries no digit at all.
fn numeric_prefix(cleaned: &str) -> Option<String> {
    let bytes = cleaned.as_bytes();
    let mut pos = 0;

    let negative = bytes.first() == Some(&b'-');
    if negative {
        pos += 1;
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_part = &cleaned[int_start..pos];

    let mut frac_part = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        frac_part = &cleaned[frac_start..frac_end];
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut literal = String::with_capacity(int_part.len() + frac_part.len() + 3);
    if negative {
        literal.push('-');
    }
    literal.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        literal.push('.');
        literal.push_str(frac_part);
    }
    Some(literal)
}

/// Display convention for money: symbol-prefixed, thousands-grouped,
/// rounded to whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    /// ISO 4217 code
    pub code: &'static str,
    /// Symbol printed in front of the amount
    pub symbol: &'static str,
}

impl CurrencyFormat {
    /// Nigerian naira
    pub const NAIRA: CurrencyFormat = CurrencyFormat { code: "NGN", symbol: "₦" };

    /// US dollar
    pub const DOLLAR: CurrencyFormat = CurrencyFormat { code: "USD", symbol: "$" };

    /// Look up a supported currency by its ISO code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        [Self::NAIRA, Self::DOLLAR]
            .into_iter()
            .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
    }

    /// Format an amount, e.g. `₦1,250,000`
    pub fn format(&self, amount: Money) -> String {
        let rounded = precision::round_currency(amount);
        let digits = rounded.abs().trunc().normalize().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        if rounded < Money::ZERO {
            format!("-{}{}", self.symbol, grouped)
        } else {
            format!("{}{}", self.symbol, grouped)
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::NAIRA
    }
}

/// Render a rate fraction as a percentage, e.g. `0.055` -> `5.5%`
pub fn format_percent(rate: Rate) -> String {
    format!("{}%", (rate * dec!(100)).normalize())
}
