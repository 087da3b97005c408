//! Currency amount parsing.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` end to end; these helpers turn the
//! textual or loosely typed values found in forms and stored rows into decimals.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;
use thiserror::Error;

/// Reasons an amount string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Input was empty or whitespace.
    #[error("Amount is required")]
    Empty,

    /// Input is not a decimal number.
    #[error("Amount is not a number: {0}")]
    NotANumber(String),

    /// Input parsed but is zero or negative.
    #[error("Amount must be greater than zero, got {0}")]
    NotPositive(Decimal),
}

/// Parses a decimal amount, accepting plain (`12.50`) and scientific (`1.2e3`) notation.
///
/// Surrounding whitespace is ignored.
pub fn parse_amount(input: &str) -> Result<Decimal, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| AmountError::NotANumber(trimmed.to_string()))
}

/// Parses an amount that must be strictly positive.
pub fn parse_positive_amount(input: &str) -> Result<Decimal, AmountError> {
    let amount = parse_amount(input)?;
    if amount <= Decimal::ZERO {
        return Err(AmountError::NotPositive(amount));
    }
    Ok(amount)
}

/// Reads an amount out of a loosely typed JSON value.
///
/// Numbers and numeric strings yield a decimal. `null`, empty or non-numeric
/// strings and any other JSON type yield `None`; callers decide the fallback.
#[must_use]
pub fn amount_from_json(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => parse_amount(&number.to_string()).ok(),
        Value::String(text) => parse_amount(text).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[rstest]
    #[case("120", dec!(120))]
    #[case("120.50", dec!(120.50))]
    #[case("  42.1 ", dec!(42.1))]
    #[case("-5", dec!(-5))]
    #[case("1.5e3", dec!(1500))]
    fn test_parse_amount_accepts_numbers(#[case] input: &str, #[case] expected: Decimal) {
        assert_eq!(parse_amount(input).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_parse_amount_rejects_empty(#[case] input: &str) {
        assert_eq!(parse_amount(input), Err(AmountError::Empty));
    }

    #[rstest]
    #[case("abc")]
    #[case("12abc")]
    #[case("$10")]
    fn test_parse_amount_rejects_garbage(#[case] input: &str) {
        assert!(matches!(parse_amount(input), Err(AmountError::NotANumber(_))));
    }

    #[test]
    fn test_parse_positive_amount() {
        assert_eq!(parse_positive_amount("0.01").unwrap(), dec!(0.01));
        assert_eq!(
            parse_positive_amount("0"),
            Err(AmountError::NotPositive(Decimal::ZERO))
        );
        assert_eq!(
            parse_positive_amount("-3"),
            Err(AmountError::NotPositive(dec!(-3)))
        );
        assert_eq!(parse_positive_amount(""), Err(AmountError::Empty));
    }

    #[test]
    fn test_amount_from_json() {
        assert_eq!(amount_from_json(&json!(120)), Some(dec!(120)));
        assert_eq!(amount_from_json(&json!(19.99)), Some(dec!(19.99)));
        assert_eq!(amount_from_json(&json!("75.25")), Some(dec!(75.25)));
        assert_eq!(amount_from_json(&json!("")), None);
        assert_eq!(amount_from_json(&json!("n/a")), None);
        assert_eq!(amount_from_json(&Value::Null), None);
        assert_eq!(amount_from_json(&json!(true)), None);
        assert_eq!(amount_from_json(&json!({"amount": 1})), None);
    }
}
