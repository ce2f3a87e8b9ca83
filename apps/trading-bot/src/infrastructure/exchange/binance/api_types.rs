//! Binance REST wire types.
//!
//! Success bodies are passed through as JSON; only the error body and the
//! request parameter encodings are modelled here.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::order_execution::OrderSide;

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct BinanceErrorResponse {
    /// Binance error code (negative).
    pub code: i64,
    /// Error message.
    pub msg: String,
}

/// Futures order type wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuturesOrderType {
    /// Fills immediately at the best available price.
    Market,
    /// Rests at `price`.
    Limit,
    /// Stop-limit: becomes a limit order at `price` once `stopPrice` trades.
    Stop,
}

impl FuturesOrderType {
    /// Value of the `type` query parameter.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Market => "MARKET",
            Self::Limit => "LIMIT",
            Self::Stop => "STOP",
        }
    }
}

/// Query parameters of one request, in send order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(&'static str, String)>);

impl Params {
    /// Empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    #[must_use]
    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.0.push((key, value.into()));
        self
    }

    /// Append a decimal in its shortest exact form.
    #[must_use]
    pub fn with_decimal(self, key: &'static str, value: Decimal) -> Self {
        self.with(key, format_decimal(value))
    }

    /// Append an order side.
    #[must_use]
    pub fn with_side(self, side: OrderSide) -> Self {
        self.with("side", side.as_str())
    }

    /// Parameters in send order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(key, value)| (*key, value.as_str()))
    }
}

/// `1.500` becomes `1.5`; Binance rejects some trailing-zero forms.
pub fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}
