//! Amount parsing and money formatting helpers

use super::quote::Currency;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Error: please enter a valid number.")]
    Invalid,

    #[error("Error: the amount cannot be negative.")]
    Negative,
}

/// Parses a user supplied amount. A comma is accepted as decimal separator.
pub fn parse_amount(input: &str) -> Result<f64, AmountError> {
    let amount: f64 = input
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| AmountError::Invalid)?;

    if !amount.is_finite() {
        return Err(AmountError::Invalid);
    }
    if amount < 0.0 {
        return Err(AmountError::Negative);
    }
    Ok(amount)
}

/// Formats `amount` with two decimals and `,` as thousands separator.
pub fn group_thousands(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // "-0.00" would read as a debt
    let sign = if amount.is_sign_negative() && fixed != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

/// Renders an amount with the symbol of `code`, e.g. `USD $1,500.50`.
/// Unknown codes fall back to `"{code} "` as prefix.
pub fn format_money(amount: f64, code: &str) -> String {
    let prefix = [Currency::Usd, Currency::Eur, Currency::Brl, Currency::Ars]
        .iter()
        .find(|c| c.code() == code)
        .map_or_else(|| format!("{code} "), |c| c.symbol().to_string());
    format!("{prefix}{}", group_thousands(amount))
}
