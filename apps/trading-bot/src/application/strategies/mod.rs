//! Order Strategies
//!
//! One strategy per [`OrderKind`]. A strategy validates the fields its kind
//! requires, builds the exchange request and performs exactly one exchange
//! call. Strategies neither retry nor classify failures; both concerns
//! belong to the dispatcher.

mod limit;
mod market;
mod oco;
mod stop_limit;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::Span;

use crate::application::ports::{ExchangeError, ExchangePort, OrderResult};
use crate::domain::order_execution::{OrderKind, OrderParams};
use crate::domain::shared::ValidationError;

pub use limit::LimitOrderStrategy;
pub use market::MarketOrderStrategy;
pub use oco::OcoOrderStrategy;
pub use stop_limit::StopLimitOrderStrategy;

/// Failure of a single strategy execution.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// Input rejected before the exchange was called.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Exchange call failed; left unclassified.
    #[error(transparent)]
    Exchange(#[from] ExchangeError),
}

/// Places one kind of order.
#[async_trait]
pub trait OrderStrategy: Send + Sync {
    /// The order kind this strategy handles.
    fn kind(&self) -> OrderKind;

    /// Validate `params` and place the order.
    ///
    /// Validation completes before any exchange call, so a rejected input
    /// never reaches the network.
    async fn execute(&self, params: &OrderParams) -> Result<OrderResult, StrategyError>;
}

/// Immutable mapping from order kind to strategy.
pub struct StrategyTable {
    strategies: [Arc<dyn OrderStrategy>; OrderKind::COUNT],
}

impl StrategyTable {
    /// Build one strategy per kind, all sharing `exchange` and logging
    /// under `span`.
    pub fn new(exchange: &Arc<dyn ExchangePort>, span: &Span) -> Self {
        Self {
            strategies: [
                Arc::new(MarketOrderStrategy::new(Arc::clone(exchange), span.clone())),
                Arc::new(LimitOrderStrategy::new(Arc::clone(exchange), span.clone())),
                Arc::new(StopLimitOrderStrategy::new(Arc::clone(exchange), span.clone())),
                Arc::new(OcoOrderStrategy::new(Arc::clone(exchange), span.clone())),
            ],
        }
    }

    /// Strategy for `kind`.
    #[must_use]
    pub fn get(&self, kind: OrderKind) -> &Arc<dyn OrderStrategy> {
        &self.strategies[kind.index()]
    }
}

impl std::fmt::Debug for StrategyTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.strategies.iter().map(|strategy| strategy.kind()))
            .finish()
    }
}
