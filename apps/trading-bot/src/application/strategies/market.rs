//! Market order strategy.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{Instrument, Span, info_span};

use super::{OrderStrategy, StrategyError};
use crate::application::ports::{ExchangePort, MarketOrderRequest, OrderResult};
use crate::domain::order_execution::{OrderKind, OrderParams, validate_quantity, validate_symbol};

/// Places market orders: symbol, side and quantity only.
pub struct MarketOrderStrategy {
    exchange: Arc<dyn ExchangePort>,
    span: Span,
}

impl MarketOrderStrategy {
    /// Create a strategy logging under `span`.
    pub fn new(exchange: Arc<dyn ExchangePort>, span: Span) -> Self {
        Self { exchange, span }
    }

    fn build_request(params: &OrderParams) -> Result<MarketOrderRequest, StrategyError> {
        Ok(MarketOrderRequest {
            symbol: validate_symbol(&params.symbol)?,
            side: params.side,
            quantity: validate_quantity(params.quantity)?,
        })
    }
}

#[async_trait]
impl OrderStrategy for MarketOrderStrategy {
    fn kind(&self) -> OrderKind {
        OrderKind::Market
    }

    async fn execute(&self, params: &OrderParams) -> Result<OrderResult, StrategyError> {
        let request = Self::build_request(params)?;
        let span = info_span!(parent: &self.span, "market_order", symbol = %request.symbol);

        async {
            tracing::info!(
                side = %request.side,
                quantity = %request.quantity,
                "Placing market order"
            );

            let result = self.exchange.place_market_order(&request).await?;

            tracing::info!(
                order_id = result.order_id().as_deref().unwrap_or("unknown"),
                status = result.status().unwrap_or("unknown"),
                "Market order placed"
            );
            Ok(result)
        }
        .instrument(span)
        .await
    }
}
