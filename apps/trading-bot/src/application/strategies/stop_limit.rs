//! Stop-limit order strategy.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{Instrument, Span, info_span};

use super::{OrderStrategy, StrategyError};
use crate::application::ports::{ExchangePort, OrderResult, StopLimitOrderRequest};
use crate::domain::order_execution::{
    OrderKind, OrderParams, require, validate_price, validate_quantity, validate_symbol,
};

/// Places stop-limit orders.
///
/// The relation between stop price, limit price and side is not checked
/// here; the exchange rejects inconsistent combinations.
pub struct StopLimitOrderStrategy {
    exchange: Arc<dyn ExchangePort>,
    span: Span,
}

impl StopLimitOrderStrategy {
    /// Create a strategy logging under `span`.
    pub fn new(exchange: Arc<dyn ExchangePort>, span: Span) -> Self {
        Self { exchange, span }
    }

    fn build_request(params: &OrderParams) -> Result<StopLimitOrderRequest, StrategyError> {
        const KIND: OrderKind = OrderKind::StopLimit;

        let symbol = validate_symbol(&params.symbol)?;
        let quantity = validate_quantity(params.quantity)?;
        let price = validate_price("price", require(params.price, "price", KIND)?)?;
        let stop_price =
            validate_price("stop_price", require(params.stop_price, "stop_price", KIND)?)?;

        Ok(StopLimitOrderRequest {
            symbol,
            side: params.side,
            quantity,
            price,
            stop_price,
            time_in_force: params.time_in_force.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl OrderStrategy for StopLimitOrderStrategy {
    fn kind(&self) -> OrderKind {
        OrderKind::StopLimit
    }

    async fn execute(&self, params: &OrderParams) -> Result<OrderResult, StrategyError> {
        let request = Self::build_request(params)?;
        let span = info_span!(parent: &self.span, "stop_limit_order", symbol = %request.symbol);

        async {
            tracing::info!(
                side = %request.side,
                quantity = %request.quantity,
                price = %request.price,
                stop_price = %request.stop_price,
                "Placing stop-limit order"
            );

            let result = self.exchange.place_stop_limit_order(&request).await?;

            tracing::info!(
                order_id = result.order_id().as_deref().unwrap_or("unknown"),
                status = result.status().unwrap_or("unknown"),
                "Stop-limit order placed"
            );
            Ok(result)
        }
        .instrument(span)
        .await
    }
}
