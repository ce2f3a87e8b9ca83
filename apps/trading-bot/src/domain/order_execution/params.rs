//! Caller-supplied order parameters.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::value_objects::{OrderSide, TimeInForce};

/// Unvalidated order parameters shared by every order kind.
///
/// Each strategy picks the fields its kind requires and ignores the rest.
/// Nothing here is checked until the strategy validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderParams {
    /// Trading pair as typed by the caller.
    pub symbol: String,
    /// Order side.
    pub side: OrderSide,
    /// Order quantity in base asset units.
    pub quantity: Decimal,
    /// Limit price (limit and stop-limit).
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Stop trigger price (stop-limit and OCO stop-loss leg).
    #[serde(default)]
    pub stop_price: Option<Decimal>,
    /// Take-profit price (OCO limit leg).
    #[serde(default)]
    pub take_profit_price: Option<Decimal>,
    /// Limit price of the OCO stop-loss leg once triggered.
    #[serde(default)]
    pub stop_limit_price: Option<Decimal>,
    /// Time in force for resting orders; exchange default when absent.
    #[serde(default)]
    pub time_in_force: Option<TimeInForce>,
}

impl OrderParams {
    /// Create parameters with the fields every kind requires.
    #[must_use]
    pub fn new(symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            quantity,
            price: None,
            stop_price: None,
            take_profit_price: None,
            stop_limit_price: None,
            time_in_force: None,
        }
    }

    /// Set the limit price.
    #[must_use]
    pub const fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the stop trigger price.
    #[must_use]
    pub const fn with_stop_price(mut self, stop_price: Decimal) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    /// Set the take-profit price.
    #[must_use]
    pub const fn with_take_profit_price(mut self, take_profit_price: Decimal) -> Self {
        self.take_profit_price = Some(take_profit_price);
        self
    }

    /// Set the OCO stop-limit price.
    #[must_use]
    pub const fn with_stop_limit_price(mut self, stop_limit_price: Decimal) -> Self {
        self.stop_limit_price = Some(stop_limit_price);
        self
    }

    /// Set time in force.
    #[must_use]
    pub const fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }
}
