//! Validation errors raised before any exchange call.

use rust_decimal::Decimal;
use thiserror::Error;

/// Malformed input detected locally.
///
/// Always recoverable by the caller correcting the input. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Symbol is empty, not uppercase alphanumeric, or not a trading pair.
    #[error("Invalid symbol '{symbol}': {reason}")]
    InvalidSymbol {
        /// The rejected symbol.
        symbol: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Quantity or price is zero or negative.
    #[error("Invalid {field}: {value} must be greater than zero")]
    NonPositive {
        /// Field name.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },

    /// Text could not be parsed as a decimal number.
    #[error("Invalid {field}: '{input}' is not a decimal number")]
    NotADecimal {
        /// Field name.
        field: &'static str,
        /// The rejected text.
        input: String,
    },

    /// Order side is neither buy nor sell.
    #[error("Invalid side '{0}': expected BUY or SELL")]
    InvalidSide(String),

    /// Time in force is not one the exchange accepts.
    #[error("Invalid time in force '{0}': expected GTC, IOC, FOK or GTX")]
    InvalidTimeInForce(String),

    /// A field required by the order kind is absent.
    #[error("Missing required field '{field}' for {kind} order")]
    MissingField {
        /// Field name.
        field: &'static str,
        /// Order kind that requires it.
        kind: String,
    },
}

impl ValidationError {
    /// Name of the offending field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidSymbol { .. } => "symbol",
            Self::InvalidSide(_) => "side",
            Self::InvalidTimeInForce(_) => "time_in_force",
            Self::NonPositive { field, .. }
            | Self::NotADecimal { field, .. }
            | Self::MissingField { field, .. } => field,
        }
    }
}
