//! Error taxonomy surfaced to callers of the trading bot.
//!
//! Every public operation fails with exactly one [`TradingBotError`]. The
//! original exchange failure is kept as the error source so diagnostics can
//! walk the chain.
//!
//! | Kind | Raised when | Retried |
//! |------|-------------|---------|
//! | `Validation` | Malformed input, before any network call | Never |
//! | `InvalidOrder` | Unknown order type or symbol missing from metadata | Never |
//! | `InsufficientBalance` | Exchange reports missing funds or margin | Never |
//! | `Api` | Any other failure of a read-only, status or cancel call | Read-only queries only |
//! | `OrderExecution` | Any other failure while placing an order | Never |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::ports::ExchangeError;
use crate::domain::order_execution::UnknownOrderKind;
use crate::domain::shared::ValidationError;

/// Stable error codes for the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed input.
    Validation,
    /// Unknown order type or symbol.
    InvalidOrder,
    /// Account lacks funds or margin.
    InsufficientBalance,
    /// Read-only or account operation failed.
    ApiError,
    /// Order placement failed.
    OrderExecution,
}

impl ErrorCode {
    /// Get the error reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::InvalidOrder => "INVALID_ORDER",
            Self::InsufficientBalance => "INSUFFICIENT_BALANCE",
            Self::ApiError => "API_ERROR",
            Self::OrderExecution => "ORDER_EXECUTION_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reason())
    }
}

/// Root error of the trading bot.
#[derive(Debug, Error)]
pub enum TradingBotError {
    /// Malformed input caught before any network call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Unknown order-type tag or unresolvable symbol.
    #[error("Invalid order: {message}")]
    InvalidOrder {
        /// Human-readable message.
        message: String,
    },

    /// Account lacks funds or margin.
    #[error("Insufficient balance: {message}")]
    InsufficientBalance {
        /// Human-readable message.
        message: String,
        /// Triggering exchange failure.
        #[source]
        source: ExchangeError,
    },

    /// Exchange failure on a read-only, status or cancel operation.
    #[error("{message}")]
    Api {
        /// Human-readable message.
        message: String,
        /// Triggering exchange failure.
        #[source]
        source: ExchangeError,
    },

    /// Exchange failure while placing an order.
    #[error("{message}")]
    OrderExecution {
        /// Human-readable message.
        message: String,
        /// Triggering exchange failure.
        #[source]
        source: ExchangeError,
    },
}

impl TradingBotError {
    /// Unknown order type or symbol.
    #[must_use]
    pub fn invalid_order(message: impl Into<String>) -> Self {
        Self::InvalidOrder {
            message: message.into(),
        }
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::Validation,
            Self::InvalidOrder { .. } => ErrorCode::InvalidOrder,
            Self::InsufficientBalance { .. } => ErrorCode::InsufficientBalance,
            Self::Api { .. } => ErrorCode::ApiError,
            Self::OrderExecution { .. } => ErrorCode::OrderExecution,
        }
    }

    /// The exchange failure behind this error, if any.
    #[must_use]
    pub const fn exchange_error(&self) -> Option<&ExchangeError> {
        match self {
            Self::InsufficientBalance { source, .. }
            | Self::Api { source, .. }
            | Self::OrderExecution { source, .. } => Some(source),
            Self::Validation(_) | Self::InvalidOrder { .. } => None,
        }
    }
}

impl From<UnknownOrderKind> for TradingBotError {
    fn from(err: UnknownOrderKind) -> Self {
        Self::invalid_order(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn code_reasons() {
        assert_eq!(ErrorCode::Validation.reason(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::InsufficientBalance.to_string(), "INSUFFICIENT_BALANCE");
        assert_eq!(
            serde_json::to_string(&ErrorCode::OrderExecution).unwrap(),
            "\"ORDER_EXECUTION\""
        );
    }

    #[test]
    fn unknown_kind_becomes_invalid_order() {
        let err: TradingBotError = UnknownOrderKind("trailing".to_string()).into();
        assert_eq!(err.code(), ErrorCode::InvalidOrder);
        assert_eq!(err.to_string(), "Invalid order: Unsupported order type: trailing");
    }

    #[test]
    fn validation_is_transparent() {
        let err: TradingBotError = ValidationError::InvalidSide("HOLD".to_string()).into();
        assert_eq!(err.code(), ErrorCode::Validation);
        assert_eq!(err.to_string(), "Invalid side 'HOLD': expected BUY or SELL");
        assert!(err.exchange_error().is_none());
    }

    #[test]
    fn exchange_cause_is_preserved() {
        let cause = ExchangeError::api("Margin is insufficient.");
        let err = TradingBotError::InsufficientBalance {
            message: cause.message().to_string(),
            source: cause.clone(),
        };

        assert_eq!(err.exchange_error(), Some(&cause));
        let source = err.source().unwrap();
        assert!(source.to_string().contains("Margin is insufficient."));
    }
}
