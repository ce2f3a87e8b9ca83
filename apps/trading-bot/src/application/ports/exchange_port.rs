//! Exchange Port (Driven Port)
//!
//! Interface to the remote trading exchange. Every operation fails with the
//! single [`ExchangeError`] type; classifying that failure into the domain
//! taxonomy is the error mapper's job, not the port's.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::order_execution::{OrderSide, TimeInForce};
use crate::domain::shared::{OrderId, Symbol};

// ============================================================================
// Order Requests (validated)
// ============================================================================

/// Validated market order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOrderRequest {
    /// Symbol to trade.
    pub symbol: Symbol,
    /// Order side.
    pub side: OrderSide,
    /// Quantity.
    pub quantity: Decimal,
}

/// Validated limit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrderRequest {
    /// Symbol to trade.
    pub symbol: Symbol,
    /// Order side.
    pub side: OrderSide,
    /// Quantity.
    pub quantity: Decimal,
    /// Limit price.
    pub price: Decimal,
    /// Time in force.
    pub time_in_force: TimeInForce,
}

/// Validated stop-limit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopLimitOrderRequest {
    /// Symbol to trade.
    pub symbol: Symbol,
    /// Order side.
    pub side: OrderSide,
    /// Quantity.
    pub quantity: Decimal,
    /// Limit price once triggered.
    pub price: Decimal,
    /// Trigger price.
    pub stop_price: Decimal,
    /// Time in force.
    pub time_in_force: TimeInForce,
}

/// Validated one-cancels-other order.
///
/// The exchange links both legs; filling one cancels the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcoOrderRequest {
    /// Symbol to trade.
    pub symbol: Symbol,
    /// Order side.
    pub side: OrderSide,
    /// Quantity.
    pub quantity: Decimal,
    /// Limit price of the take-profit leg.
    pub take_profit_price: Decimal,
    /// Trigger price of the stop-loss leg.
    pub stop_price: Decimal,
    /// Limit price of the stop-loss leg once triggered, if any.
    pub stop_limit_price: Option<Decimal>,
}

// ============================================================================
// Passthrough Payloads
// ============================================================================

macro_rules! define_payload {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Value);

        impl $name {
            /// Wrap a raw exchange payload.
            #[must_use]
            pub const fn new(value: Value) -> Self {
                Self(value)
            }

            /// Borrow the raw payload.
            #[must_use]
            pub const fn as_value(&self) -> &Value {
                &self.0
            }

            /// Consume and return the raw payload.
            #[must_use]
            pub fn into_inner(self) -> Value {
                self.0
            }
        }

        impl From<Value> for $name {
            fn from(value: Value) -> Self {
                Self(value)
            }
        }
    };
}

define_payload!(
    OrderResult,
    "Order placement, status or cancel response, returned unmodified."
);
define_payload!(AccountSnapshot, "Account query response, returned unmodified.");
define_payload!(SymbolInfo, "One symbol's exchange metadata, returned unmodified.");
define_payload!(ExchangeInfo, "Exchange metadata listing every symbol.");

impl OrderResult {
    /// Exchange order id (or order-list id for OCO), for logging.
    #[must_use]
    pub fn order_id(&self) -> Option<String> {
        ["orderId", "orderListId"]
            .iter()
            .find_map(|key| self.0.get(key))
            .map(|id| match id {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
    }

    /// Reported order status (or list status for OCO), for logging.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        ["status", "listOrderStatus"]
            .iter()
            .find_map(|key| self.0.get(key))
            .and_then(Value::as_str)
    }
}

impl SymbolInfo {
    /// The `symbol` field of the metadata entry.
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        self.0.get("symbol").and_then(Value::as_str)
    }
}

impl ExchangeInfo {
    /// All symbol entries, or `None` if the payload has no `symbols` list.
    #[must_use]
    pub fn symbols(&self) -> Option<&[Value]> {
        self.0.get("symbols").and_then(Value::as_array).map(Vec::as_slice)
    }

    /// Find the entry whose `symbol` field equals `symbol`.
    #[must_use]
    pub fn find_symbol(&self, symbol: &Symbol) -> Option<SymbolInfo> {
        self.symbols()?
            .iter()
            .find(|entry| entry.get("symbol").and_then(Value::as_str) == Some(symbol.as_str()))
            .cloned()
            .map(SymbolInfo)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Failure of any remote call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeError {
    /// Request never produced an HTTP response (DNS, TLS, timeout, reset).
    #[error("Exchange transport error: {message}")]
    Transport {
        /// Error details.
        message: String,
    },

    /// Exchange answered with an error.
    #[error("Exchange API error (status {status:?}, code {code:?}): {message}")]
    Api {
        /// HTTP status, when known.
        status: Option<u16>,
        /// Structured exchange error code, when provided.
        code: Option<i64>,
        /// Exchange-supplied message.
        message: String,
    },

    /// Response body could not be decoded.
    #[error("Failed to decode exchange response: {message}")]
    Decode {
        /// Error details.
        message: String,
    },

    /// Request could not be built locally (bad client setup, signing).
    #[error("Invalid exchange request: {message}")]
    Request {
        /// Error details.
        message: String,
    },
}

impl ExchangeError {
    /// Create an API error with only a message.
    #[must_use]
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            status: None,
            code: None,
            message: message.into(),
        }
    }

    /// Create a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Structured exchange error code, if any.
    #[must_use]
    pub const fn code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => *code,
            Self::Transport { .. } | Self::Decode { .. } | Self::Request { .. } => None,
        }
    }

    /// HTTP status, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            Self::Transport { .. } | Self::Decode { .. } | Self::Request { .. } => None,
        }
    }

    /// The failure message without the variant prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message }
            | Self::Api { message, .. }
            | Self::Decode { message }
            | Self::Request { message } => message,
        }
    }

    /// Whether repeating an idempotent request could succeed.
    ///
    /// Transport failures, HTTP 408/429/5xx and status-less API errors are
    /// transient; other client errors, undecodable bodies and requests that
    /// could not be built are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Api { status: None, .. } => true,
            Self::Api {
                status: Some(status),
                ..
            } => matches!(status, 408 | 429 | 500..=599),
            Self::Decode { .. } | Self::Request { .. } => false,
        }
    }
}

// ============================================================================
// Port
// ============================================================================

/// Port for exchange interactions.
#[async_trait]
pub trait ExchangePort: Send + Sync {
    /// Query the futures account.
    async fn account(&self) -> Result<AccountSnapshot, ExchangeError>;

    /// Query exchange metadata for every symbol.
    async fn exchange_info(&self) -> Result<ExchangeInfo, ExchangeError>;

    /// Place a market order.
    async fn place_market_order(
        &self,
        request: &MarketOrderRequest,
    ) -> Result<OrderResult, ExchangeError>;

    /// Place a limit order.
    async fn place_limit_order(
        &self,
        request: &LimitOrderRequest,
    ) -> Result<OrderResult, ExchangeError>;

    /// Place a stop-limit order.
    async fn place_stop_limit_order(
        &self,
        request: &StopLimitOrderRequest,
    ) -> Result<OrderResult, ExchangeError>;

    /// Place a one-cancels-other order pair.
    async fn place_oco_order(&self, request: &OcoOrderRequest)
    -> Result<OrderResult, ExchangeError>;

    /// Query an order's status.
    async fn get_order(&self, symbol: &Symbol, order_id: &OrderId)
    -> Result<OrderResult, ExchangeError>;

    /// Cancel an open order.
    async fn cancel_order(
        &self,
        symbol: &Symbol,
        order_id: &OrderId,
    ) -> Result<OrderResult, ExchangeError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn order_result_accessors() {
        let result = OrderResult::new(json!({"orderId": 283_194_212, "status": "NEW"}));
        assert_eq!(result.order_id().as_deref(), Some("283194212"));
        assert_eq!(result.status(), Some("NEW"));
    }

    #[test]
    fn order_result_accessors_for_order_list() {
        let result = OrderResult::new(json!({"orderListId": 7, "listOrderStatus": "EXECUTING"}));
        assert_eq!(result.order_id().as_deref(), Some("7"));
        assert_eq!(result.status(), Some("EXECUTING"));
    }

    #[test]
    fn order_result_is_passthrough() {
        let raw = json!({"orderId": 1, "fills": [{"price": "1.0"}], "extra": null});
        let result = OrderResult::from(raw.clone());
        assert_eq!(result.as_value(), &raw);
        assert_eq!(result.into_inner(), raw);
    }

    #[test]
    fn exchange_info_find_symbol() {
        let info = ExchangeInfo::new(json!({
            "symbols": [
                {"symbol": "BTCUSDT", "status": "TRADING"},
                {"symbol": "ETHUSDT", "status": "TRADING"}
            ]
        }));

        let eth = Symbol::parse("ETHUSDT").unwrap();
        let found = info.find_symbol(&eth).unwrap();
        assert_eq!(found.symbol(), Some("ETHUSDT"));

        let sol = Symbol::parse("SOLUSDT").unwrap();
        assert!(info.find_symbol(&sol).is_none());
    }

    #[test]
    fn exchange_info_without_symbols() {
        let info = ExchangeInfo::new(json!({"timezone": "UTC"}));
        assert!(info.symbols().is_none());
    }

    #[test]
    fn exchange_error_retryability() {
        assert!(ExchangeError::transport("connection reset").is_retryable());
        assert!(ExchangeError::api("temporary").is_retryable());

        let rate_limited = ExchangeError::Api {
            status: Some(429),
            code: Some(-1003),
            message: "Too many requests".to_string(),
        };
        assert!(rate_limited.is_retryable());

        let server = ExchangeError::Api {
            status: Some(503),
            code: None,
            message: "unavailable".to_string(),
        };
        assert!(server.is_retryable());

        let rejected = ExchangeError::Api {
            status: Some(400),
            code: Some(-2019),
            message: "Margin is insufficient.".to_string(),
        };
        assert!(!rejected.is_retryable());

        let decode = ExchangeError::Decode {
            message: "eof".to_string(),
        };
        assert!(!decode.is_retryable());

        let unsigned = ExchangeError::Request {
            message: "bad key".to_string(),
        };
        assert!(!unsigned.is_retryable());
    }

    #[test]
    fn exchange_error_accessors() {
        let err = ExchangeError::Api {
            status: Some(400),
            code: Some(-1121),
            message: "Invalid symbol.".to_string(),
        };
        assert_eq!(err.code(), Some(-1121));
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.message(), "Invalid symbol.");
        assert_eq!(ExchangeError::transport("x").code(), None);
    }
}
