//! Order dispatcher: the public entry point of the bot.
//!
//! Validates input, routes each order to the strategy for its kind, maps
//! exchange failures into [`TradingBotError`] and returns exchange payloads
//! unmodified. Only the read-only account and symbol queries are retried.

use std::sync::Arc;

use tracing::{Instrument, Span, info_span};

use crate::application::error_mapper::{Operation, is_insufficient_balance, map_exchange_error};
use crate::application::ports::{AccountSnapshot, ExchangeError, ExchangePort, OrderResult, SymbolInfo};
use crate::application::retry::{RetryPolicy, retry_read_only};
use crate::application::strategies::{StrategyError, StrategyTable};
use crate::domain::order_execution::{OrderKind, OrderParams, validate_symbol};
use crate::domain::shared::OrderId;
use crate::error::TradingBotError;

/// Routes orders and queries to the exchange.
///
/// Built once; the strategy table and exchange handle are never modified
/// afterwards, so a dispatcher can be shared across tasks.
pub struct Dispatcher {
    exchange: Arc<dyn ExchangePort>,
    strategies: StrategyTable,
    retry_policy: RetryPolicy,
    span: Span,
}

impl Dispatcher {
    /// Create a dispatcher over `exchange`.
    pub fn new(exchange: Arc<dyn ExchangePort>, retry_policy: RetryPolicy) -> Self {
        let span = info_span!("dispatcher");
        let strategies = StrategyTable::new(&exchange, &span);

        Self {
            exchange,
            strategies,
            retry_policy,
            span,
        }
    }

    /// Place an order of the kind named by `tag`.
    ///
    /// Never retried.
    ///
    /// # Errors
    ///
    /// - `InvalidOrder` if `tag` is not a known order kind
    /// - `Validation` if any required field is missing or malformed; the
    ///   exchange is not called
    /// - `InsufficientBalance` if the exchange reports missing funds
    /// - `OrderExecution` for any other exchange failure
    pub async fn execute_order(
        &self,
        tag: &str,
        params: &OrderParams,
    ) -> Result<OrderResult, TradingBotError> {
        let kind: OrderKind = tag.parse().inspect_err(|_| {
            tracing::warn!(parent: &self.span, order_type = tag, "Unsupported order type");
        })?;
        self.execute(kind, params).await
    }

    /// Place an order of a known `kind`.
    ///
    /// # Errors
    ///
    /// Same as [`Dispatcher::execute_order`], minus the unknown-tag case.
    pub async fn execute(
        &self,
        kind: OrderKind,
        params: &OrderParams,
    ) -> Result<OrderResult, TradingBotError> {
        let strategy = self.strategies.get(kind);

        strategy.execute(params).await.map_err(|err| match err {
            StrategyError::Validation(err) => {
                tracing::warn!(
                    parent: &self.span,
                    order_type = %kind,
                    field = err.field(),
                    error = %err,
                    "Order rejected by validation"
                );
                TradingBotError::Validation(err)
            }
            StrategyError::Exchange(err) => {
                let mapped = map_exchange_error(Operation::PlaceOrder, err);
                tracing::error!(
                    parent: &self.span,
                    order_type = %kind,
                    code = %mapped.code(),
                    error = %mapped,
                    "Order placement failed"
                );
                mapped
            }
        })
    }

    /// Query the account, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - `InsufficientBalance` if the exchange reports missing funds
    /// - `Api` once retries are exhausted or the failure is not transient
    pub async fn get_account_info(&self) -> Result<AccountSnapshot, TradingBotError> {
        async {
            retry_read_only(&self.retry_policy, "account", should_retry, || {
                self.exchange.account()
            })
            .await
            .map_err(|err| self.log_mapped(Operation::AccountQuery, err))
        }
        .instrument(info_span!(parent: &self.span, "get_account_info"))
        .await
    }

    /// Look up one symbol's metadata, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - `Validation` if `symbol` is malformed; the exchange is not called
    /// - `InvalidOrder` if the exchange does not list `symbol`
    /// - `Api` once retries are exhausted or the failure is not transient
    pub async fn get_symbol_info(&self, symbol: &str) -> Result<SymbolInfo, TradingBotError> {
        let symbol = validate_symbol(symbol)?;

        async {
            let info = retry_read_only(&self.retry_policy, "exchange_info", should_retry, || {
                self.exchange.exchange_info()
            })
            .await
            .map_err(|err| self.log_mapped(Operation::SymbolQuery, err))?;

            if info.symbols().is_none() {
                let err = ExchangeError::Decode {
                    message: "exchange info has no symbols list".to_string(),
                };
                return Err(self.log_mapped(Operation::SymbolQuery, err));
            }

            info.find_symbol(&symbol).ok_or_else(|| {
                tracing::warn!("Symbol not listed by exchange");
                TradingBotError::invalid_order(format!("Symbol {symbol} not found"))
            })
        }
        .instrument(info_span!(parent: &self.span, "get_symbol_info", symbol = %symbol))
        .await
    }

    /// Query an order's status. Not retried.
    ///
    /// `order_id` is passed to the exchange unmodified.
    ///
    /// # Errors
    ///
    /// - `Validation` if `symbol` is malformed; the exchange is not called
    /// - `Api` for any exchange failure
    pub async fn get_order_status(
        &self,
        symbol: &str,
        order_id: &OrderId,
    ) -> Result<OrderResult, TradingBotError> {
        let symbol = validate_symbol(symbol)?;

        async {
            self.exchange
                .get_order(&symbol, order_id)
                .await
                .map_err(|err| self.log_mapped(Operation::OrderStatus, err))
        }
        .instrument(info_span!(
            parent: &self.span,
            "get_order_status",
            symbol = %symbol,
            order_id = %order_id
        ))
        .await
    }

    /// Cancel an open order. Never retried.
    ///
    /// # Errors
    ///
    /// - `Validation` if `symbol` is malformed; the exchange is not called
    /// - `Api` for any exchange failure
    pub async fn cancel_order(
        &self,
        symbol: &str,
        order_id: &OrderId,
    ) -> Result<OrderResult, TradingBotError> {
        let symbol = validate_symbol(symbol)?;

        async {
            tracing::info!("Cancelling order");
            let result = self
                .exchange
                .cancel_order(&symbol, order_id)
                .await
                .map_err(|err| self.log_mapped(Operation::CancelOrder, err))?;
            tracing::info!(status = result.status().unwrap_or("unknown"), "Order cancelled");
            Ok(result)
        }
        .instrument(info_span!(
            parent: &self.span,
            "cancel_order",
            symbol = %symbol,
            order_id = %order_id
        ))
        .await
    }

    fn log_mapped(&self, operation: Operation, err: ExchangeError) -> TradingBotError {
        let mapped = map_exchange_error(operation, err);
        tracing::error!(
            parent: &self.span,
            operation = ?operation,
            code = %mapped.code(),
            error = %mapped,
            "Exchange request failed"
        );
        mapped
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("strategies", &self.strategies)
            .field("retry_policy", &self.retry_policy)
            .finish_non_exhaustive()
    }
}

/// Transient failures are retried; balance failures never are.
fn should_retry(err: &ExchangeError) -> bool {
    err.is_retryable() && !is_insufficient_balance(err)
}
