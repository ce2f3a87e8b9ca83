//! Limit order strategy.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{Instrument, Span, info_span};

use super::{OrderStrategy, StrategyError};
use crate::application::ports::{ExchangePort, LimitOrderRequest, OrderResult};
use crate::domain::order_execution::{
    OrderKind, OrderParams, require, validate_price, validate_quantity, validate_symbol,
};

/// Places limit orders, good-til-canceled unless told otherwise.
pub struct LimitOrderStrategy {
    exchange: Arc<dyn ExchangePort>,
    span: Span,
}

impl LimitOrderStrategy {
    /// Create a strategy logging under `span`.
    pub fn new(exchange: Arc<dyn ExchangePort>, span: Span) -> Self {
        Self { exchange, span }
    }

    fn build_request(params: &OrderParams) -> Result<LimitOrderRequest, StrategyError> {
        let symbol = validate_symbol(&params.symbol)?;
        let quantity = validate_quantity(params.quantity)?;
        let price = validate_price("price", require(params.price, "price", OrderKind::Limit)?)?;

        Ok(LimitOrderRequest {
            symbol,
            side: params.side,
            quantity,
            price,
            time_in_force: params.time_in_force.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl OrderStrategy for LimitOrderStrategy {
    fn kind(&self) -> OrderKind {
        OrderKind::Limit
    }

    async fn execute(&self, params: &OrderParams) -> Result<OrderResult, StrategyError> {
        let request = Self::build_request(params)?;
        let span = info_span!(parent: &self.span, "limit_order", symbol = %request.symbol);

        async {
            tracing::info!(
                side = %request.side,
                quantity = %request.quantity,
                price = %request.price,
                time_in_force = %request.time_in_force,
                "Placing limit order"
            );

            let result = self.exchange.place_limit_order(&request).await?;

            tracing::info!(
                order_id = result.order_id().as_deref().unwrap_or("unknown"),
                status = result.status().unwrap_or("unknown"),
                "Limit order placed"
            );
            Ok(result)
        }
        .instrument(span)
        .await
    }
}
