//! Money parsing

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::iso::{Currency, EUR, GBP, INR, USD};
use thiserror::Error;

/// Errors raised while turning text into money.
#[derive(Debug, Error, PartialEq)]
pub enum MoneyParseError {
    /// The value was not a decimal amount, or did not fit in minor units.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// The price string was not in `AMOUNT CURRENCY` form.
    #[error("Expected format 'AMOUNT CURRENCY', got: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Look up a supported ISO currency by its alpha code.
///
/// # Errors
///
/// Returns [`MoneyParseError::UnknownCurrency`] for codes outside GBP, USD, EUR and INR.
pub fn currency_from_code(code: &str) -> Result<&'static Currency, MoneyParseError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        "INR" => Ok(INR),
        other => Err(MoneyParseError::UnknownCurrency(other.to_string())),
    }
}

/// Convert a decimal amount in major units (e.g. `12.50`) into minor units (`1250`).
///
/// Amounts with more than two decimal places are rounded half away from zero.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Parse a bare decimal amount (e.g. `"60000.00"`) into minor units.
///
/// # Errors
///
/// Returns [`MoneyParseError::InvalidAmount`] if the text is not a decimal or overflows.
pub fn parse_amount(s: &str) -> Result<i64, MoneyParseError> {
    let amount = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| MoneyParseError::InvalidAmount(s.to_string()))?;

    to_minor_units(amount).ok_or_else(|| MoneyParseError::InvalidAmount(s.to_string()))
}

/// Parse price string (e.g., "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), MoneyParseError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(MoneyParseError::InvalidPrice(s.to_string()));
    };

    Ok((parse_amount(amount)?, currency_from_code(code)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_price_reads_amount_and_currency() -> Result<(), MoneyParseError> {
        let (minor, currency) = parse_price("2.99 GBP")?;

        assert_eq!(minor, 299);
        assert_eq!(currency, GBP);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("2.99GBP");

        assert!(matches!(result, Err(MoneyParseError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_trailing_tokens() {
        let result = parse_price("2.99 GBP extra");

        assert!(matches!(result, Err(MoneyParseError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(MoneyParseError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_amount_rounds_sub_minor_digits() -> Result<(), MoneyParseError> {
        assert_eq!(parse_amount("0.125")?, 13);
        assert_eq!(parse_amount("60000")?, 6_000_000);

        Ok(())
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        assert!(matches!(
            parse_amount("ten"),
            Err(MoneyParseError::InvalidAmount(_))
        ));
    }

    #[test]
    fn currency_codes_are_case_insensitive() -> Result<(), MoneyParseError> {
        assert_eq!(currency_from_code("inr")?, INR);
        assert_eq!(currency_from_code(" usd ")?, USD);

        Ok(())
    }
}
