//! Input validators.
//!
//! Pure functions run before any exchange call, so an invalid request never
//! causes partial network action.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::shared::{Symbol, ValidationError};

use super::value_objects::OrderKind;

/// Validate a trading pair symbol.
///
/// # Errors
///
/// Returns `ValidationError::InvalidSymbol` for empty, non-uppercase,
/// non-alphanumeric or non-pair symbols.
pub fn validate_symbol(symbol: &str) -> Result<Symbol, ValidationError> {
    Symbol::parse(symbol)
}

/// Validate an order quantity.
///
/// # Errors
///
/// Returns `ValidationError::NonPositive` if `quantity <= 0`.
pub fn validate_quantity(quantity: Decimal) -> Result<Decimal, ValidationError> {
    validate_positive("quantity", quantity)
}

/// Validate a price field (limit, stop, take-profit).
///
/// # Errors
///
/// Returns `ValidationError::NonPositive` if `price <= 0`.
pub fn validate_price(field: &'static str, price: Decimal) -> Result<Decimal, ValidationError> {
    validate_positive(field, price)
}

/// Parse a decimal from caller-supplied text.
///
/// # Errors
///
/// Returns `ValidationError::NotADecimal` if the text is not a decimal.
pub fn parse_decimal(field: &'static str, input: &str) -> Result<Decimal, ValidationError> {
    Decimal::from_str(input.trim()).map_err(|_| ValidationError::NotADecimal {
        field,
        input: input.to_string(),
    })
}

/// Unwrap a field the order kind requires.
///
/// # Errors
///
/// Returns `ValidationError::MissingField` if the value is absent.
pub fn require<T>(value: Option<T>, field: &'static str, kind: OrderKind) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::MissingField {
        field,
        kind: kind.to_string(),
    })
}

fn validate_positive(field: &'static str, value: Decimal) -> Result<Decimal, ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::NonPositive { field, value });
    }
    Ok(value)
}
