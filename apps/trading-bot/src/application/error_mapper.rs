//! Exchange failure classification.
//!
//! The only place that turns an [`ExchangeError`] into a [`TradingBotError`].
//! Balance failures are recognised by a dedicated exchange code, or by the
//! message when the code is absent or generic (spot rejections arrive as
//! -2010 with the reason only in the message).

use crate::application::ports::ExchangeError;
use crate::error::TradingBotError;

/// Exchange codes reporting missing funds or margin.
///
/// -2018: balance is insufficient. -2019: margin is insufficient.
const INSUFFICIENT_BALANCE_CODES: &[i64] = &[-2018, -2019];

/// Lowercase message fragments reporting missing funds or margin.
const INSUFFICIENT_BALANCE_PHRASES: &[&str] = &[
    "insufficient balance",
    "balance is insufficient",
    "margin is insufficient",
];

/// Operation during which an exchange failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Placing an order of any kind.
    PlaceOrder,
    /// Querying the account.
    AccountQuery,
    /// Querying symbol metadata.
    SymbolQuery,
    /// Querying an order's status.
    OrderStatus,
    /// Cancelling an order.
    CancelOrder,
}

impl Operation {
    /// Message attached to a mapped failure of this operation.
    #[must_use]
    pub const fn failure_message(&self) -> &'static str {
        match self {
            Self::PlaceOrder => "Order execution failed",
            Self::AccountQuery => "Failed to get account info",
            Self::SymbolQuery => "Failed to get symbol info",
            Self::OrderStatus => "Failed to get order status",
            Self::CancelOrder => "Failed to cancel order",
        }
    }

    /// Whether a balance shortfall is a meaningful outcome of this operation.
    const fn can_report_balance(&self) -> bool {
        matches!(self, Self::PlaceOrder | Self::AccountQuery)
    }
}

/// Whether `error` reports insufficient balance or margin.
#[must_use]
pub fn is_insufficient_balance(error: &ExchangeError) -> bool {
    if error
        .code()
        .is_some_and(|code| INSUFFICIENT_BALANCE_CODES.contains(&code))
    {
        return true;
    }

    let message = error.message().to_lowercase();
    INSUFFICIENT_BALANCE_PHRASES
        .iter()
        .any(|phrase| message.contains(phrase))
}

/// Classify an exchange failure raised during `operation`.
#[must_use]
pub fn map_exchange_error(operation: Operation, error: ExchangeError) -> TradingBotError {
    if operation.can_report_balance() && is_insufficient_balance(&error) {
        return TradingBotError::InsufficientBalance {
            message: error.message().to_string(),
            source: error,
        };
    }

    let message = format!("{}: {}", operation.failure_message(), error.message());
    match operation {
        Operation::PlaceOrder => TradingBotError::OrderExecution {
            message,
            source: error,
        },
        Operation::AccountQuery
        | Operation::SymbolQuery
        | Operation::OrderStatus
        | Operation::CancelOrder => TradingBotError::Api {
            message,
            source: error,
        },
    }
}
