//! One-cancels-other order strategy.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{Instrument, Span, info_span};

use super::{OrderStrategy, StrategyError};
use crate::application::ports::{ExchangePort, OcoOrderRequest, OrderResult};
use crate::domain::order_execution::{
    OrderKind, OrderParams, require, validate_price, validate_quantity, validate_symbol,
};

/// Places a take-profit limit leg and a stop-loss leg as one linked pair.
pub struct OcoOrderStrategy {
    exchange: Arc<dyn ExchangePort>,
    span: Span,
}

impl OcoOrderStrategy {
    /// Create a strategy logging under `span`.
    pub fn new(exchange: Arc<dyn ExchangePort>, span: Span) -> Self {
        Self { exchange, span }
    }

    fn build_request(params: &OrderParams) -> Result<OcoOrderRequest, StrategyError> {
        const KIND: OrderKind = OrderKind::Oco;

        let symbol = validate_symbol(&params.symbol)?;
        let quantity = validate_quantity(params.quantity)?;
        let take_profit_price = validate_price(
            "take_profit_price",
            require(params.take_profit_price, "take_profit_price", KIND)?,
        )?;
        let stop_price =
            validate_price("stop_price", require(params.stop_price, "stop_price", KIND)?)?;
        let stop_limit_price = params
            .stop_limit_price
            .map(|price| validate_price("stop_limit_price", price))
            .transpose()?;

        Ok(OcoOrderRequest {
            symbol,
            side: params.side,
            quantity,
            take_profit_price,
            stop_price,
            stop_limit_price,
        })
    }
}

#[async_trait]
impl OrderStrategy for OcoOrderStrategy {
    fn kind(&self) -> OrderKind {
        OrderKind::Oco
    }

    async fn execute(&self, params: &OrderParams) -> Result<OrderResult, StrategyError> {
        let request = Self::build_request(params)?;
        let span = info_span!(parent: &self.span, "oco_order", symbol = %request.symbol);

        async {
            tracing::info!(
                side = %request.side,
                quantity = %request.quantity,
                take_profit_price = %request.take_profit_price,
                stop_price = %request.stop_price,
                stop_limit_price = ?request.stop_limit_price,
                "Placing OCO order"
            );

            let result = self.exchange.place_oco_order(&request).await?;

            tracing::info!(
                order_list_id = result.order_id().as_deref().unwrap_or("unknown"),
                status = result.status().unwrap_or("unknown"),
                "OCO order placed"
            );
            Ok(result)
        }
        .instrument(span)
        .await
    }
}
