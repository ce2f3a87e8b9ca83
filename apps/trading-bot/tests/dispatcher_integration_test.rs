//! Dispatcher Integration Tests
//!
//! Drives the public `Dispatcher` API against a scripted exchange that counts
//! every call, covering validation short-circuits, error classification,
//! read-only retries and order id passthrough.

// Allow unwrap in tests - tests should panic on unexpected errors
#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use proptest::prelude::*;
use rust_decimal_macros::dec;
use serde_json::json;

use trading_bot::application::ports::{
    AccountSnapshot, ExchangeError, ExchangeInfo, ExchangePort, LimitOrderRequest,
    MarketOrderRequest, OcoOrderRequest, OrderResult, StopLimitOrderRequest,
};
use trading_bot::{
    Dispatcher, ErrorCode, OrderId, OrderParams, OrderSide, RetryPolicy, Symbol, TradingBotError,
};

// =============================================================================
// Scripted exchange
// =============================================================================

#[derive(Default)]
struct ScriptedExchange {
    calls: AtomicUsize,
    account_calls: AtomicUsize,
    /// Account queries that fail before one succeeds.
    account_failures: usize,
    /// Error returned by every order placement, if set.
    order_error: Option<ExchangeError>,
    /// Symbols listed by exchange info.
    symbols: Vec<&'static str>,
    /// `(symbol, order_id)` pairs seen by status and cancel calls.
    order_lookups: Mutex<Vec<(String, String)>>,
}

impl ScriptedExchange {
    fn new() -> Self {
        Self {
            symbols: vec!["BTCUSDT", "ETHUSDT"],
            ..Self::default()
        }
    }

    fn failing_orders(error: ExchangeError) -> Self {
        Self {
            order_error: Some(error),
            ..Self::new()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn place(&self, symbol: &Symbol) -> Result<OrderResult, ExchangeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.order_error {
            Some(err) => Err(err.clone()),
            None => Ok(OrderResult::new(
                json!({"orderId": 7, "symbol": symbol.as_str(), "status": "NEW"}),
            )),
        }
    }

    fn lookup(&self, symbol: &Symbol, order_id: &OrderId, status: &str) -> OrderResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.order_lookups
            .lock()
            .unwrap()
            .push((symbol.as_str().to_string(), order_id.as_str().to_string()));
        OrderResult::new(json!({"orderId": order_id.as_str(), "status": status}))
    }
}

#[async_trait]
impl ExchangePort for ScriptedExchange {
    async fn account(&self) -> Result<AccountSnapshot, ExchangeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let attempt = self.account_calls.fetch_add(1, Ordering::SeqCst);
        if attempt < self.account_failures {
            return Err(ExchangeError::transport("connection reset by peer"));
        }
        Ok(AccountSnapshot::new(json!({"totalWalletBalance": "250.00"})))
    }

    async fn exchange_info(&self) -> Result<ExchangeInfo, ExchangeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let symbols: Vec<_> = self
            .symbols
            .iter()
            .map(|s| json!({"symbol": s, "status": "TRADING"}))
            .collect();
        Ok(ExchangeInfo::new(json!({"symbols": symbols})))
    }

    async fn place_market_order(
        &self,
        request: &MarketOrderRequest,
    ) -> Result<OrderResult, ExchangeError> {
        self.place(&request.symbol)
    }

    async fn place_limit_order(
        &self,
        request: &LimitOrderRequest,
    ) -> Result<OrderResult, ExchangeError> {
        self.place(&request.symbol)
    }

    async fn place_stop_limit_order(
        &self,
        request: &StopLimitOrderRequest,
    ) -> Result<OrderResult, ExchangeError> {
        self.place(&request.symbol)
    }

    async fn place_oco_order(
        &self,
        request: &OcoOrderRequest,
    ) -> Result<OrderResult, ExchangeError> {
        self.place(&request.symbol)
    }

    async fn get_order(
        &self,
        symbol: &Symbol,
        order_id: &OrderId,
    ) -> Result<OrderResult, ExchangeError> {
        Ok(self.lookup(symbol, order_id, "FILLED"))
    }

    async fn cancel_order(
        &self,
        symbol: &Symbol,
        order_id: &OrderId,
    ) -> Result<OrderResult, ExchangeError> {
        Ok(self.lookup(symbol, order_id, "CANCELED"))
    }
}

fn dispatcher(exchange: &Arc<ScriptedExchange>) -> Dispatcher {
    let port: Arc<dyn ExchangePort> = exchange.clone();
    Dispatcher::new(port, RetryPolicy::immediate(3))
}

fn market(symbol: &str) -> OrderParams {
    OrderParams::new(symbol, OrderSide::Buy, dec!(0.01))
}

// =============================================================================
// Order placement
// =============================================================================

#[tokio::test]
async fn places_each_order_kind() {
    let exchange = Arc::new(ScriptedExchange::new());
    let dispatcher = dispatcher(&exchange);

    let base = OrderParams::new("BTCUSDT", OrderSide::Sell, dec!(0.5));
    let cases = [
        ("market", base.clone()),
        ("limit", base.clone().with_price(dec!(30000))),
        (
            "stop_limit",
            base.clone().with_price(dec!(29000)).with_stop_price(dec!(29100)),
        ),
        (
            "oco",
            base.clone()
                .with_take_profit_price(dec!(32000))
                .with_stop_price(dec!(29000)),
        ),
    ];

    for (tag, params) in &cases {
        let result = dispatcher.execute_order(tag, params).await.unwrap();
        assert_eq!(result.status(), Some("NEW"), "{tag}");
    }
    assert_eq!(exchange.calls(), cases.len());
}

#[tokio::test]
async fn unknown_order_type_is_invalid_order() {
    let exchange = Arc::new(ScriptedExchange::new());
    let dispatcher = dispatcher(&exchange);

    for tag in ["trailing_stop", "MARKET", "", "stop-limit"] {
        let err = dispatcher.execute_order(tag, &market("BTCUSDT")).await.unwrap_err();
        assert!(matches!(err, TradingBotError::InvalidOrder { .. }), "{tag}: {err}");
        assert_eq!(err.code(), ErrorCode::InvalidOrder);
    }
    assert_eq!(exchange.calls(), 0);
}

#[tokio::test]
async fn missing_limit_price_never_reaches_exchange() {
    let exchange = Arc::new(ScriptedExchange::new());
    let dispatcher = dispatcher(&exchange);

    let err = dispatcher.execute_order("limit", &market("BTCUSDT")).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::Validation);
    assert_eq!(exchange.calls(), 0);
}

#[tokio::test]
async fn insufficient_balance_message_is_classified() {
    let exchange = Arc::new(ScriptedExchange::failing_orders(ExchangeError::api(
        "Account has insufficient balance for requested action.",
    )));
    let dispatcher = dispatcher(&exchange);

    let err = dispatcher.execute_order("market", &market("BTCUSDT")).await.unwrap_err();

    assert!(matches!(err, TradingBotError::InsufficientBalance { .. }));
    assert_eq!(exchange.calls(), 1);
}

#[tokio::test]
async fn insufficient_margin_code_is_classified() {
    let exchange = Arc::new(ScriptedExchange::failing_orders(ExchangeError::Api {
        status: Some(400),
        code: Some(-2019),
        message: "Margin is insufficient.".to_string(),
    }));
    let dispatcher = dispatcher(&exchange);

    let err = dispatcher.execute_order("market", &market("BTCUSDT")).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::InsufficientBalance);
}

#[tokio::test]
async fn other_placement_failures_are_order_execution_errors() {
    let exchange = Arc::new(ScriptedExchange::failing_orders(ExchangeError::Api {
        status: Some(400),
        code: Some(-1013),
        message: "Filter failure: LOT_SIZE".to_string(),
    }));
    let dispatcher = dispatcher(&exchange);

    let err = dispatcher.execute_order("market", &market("BTCUSDT")).await.unwrap_err();

    assert!(matches!(err, TradingBotError::OrderExecution { .. }));
    assert!(err.to_string().contains("LOT_SIZE"));
    // Orders are never retried, even for transient-looking failures.
    assert_eq!(exchange.calls(), 1);
}

#[tokio::test]
async fn transport_failure_on_order_is_not_retried() {
    let exchange = Arc::new(ScriptedExchange::failing_orders(ExchangeError::transport(
        "timed out",
    )));
    let dispatcher = dispatcher(&exchange);

    let err = dispatcher.execute_order("market", &market("BTCUSDT")).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::OrderExecution);
    assert_eq!(exchange.calls(), 1);
}

// =============================================================================
// Read-only queries
// =============================================================================

#[tokio::test]
async fn account_query_recovers_from_transient_failures() {
    let exchange = Arc::new(ScriptedExchange {
        account_failures: 2,
        ..ScriptedExchange::new()
    });
    let dispatcher = dispatcher(&exchange);

    let account = dispatcher.get_account_info().await.unwrap();

    assert_eq!(account.as_value()["totalWalletBalance"], "250.00");
    assert_eq!(exchange.calls(), 3);
}

#[tokio::test]
async fn account_query_gives_up_after_retry_bound() {
    let exchange = Arc::new(ScriptedExchange {
        account_failures: 10,
        ..ScriptedExchange::new()
    });
    let dispatcher = dispatcher(&exchange);

    let err = dispatcher.get_account_info().await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::ApiError);
    assert_eq!(exchange.calls(), 3);
}

#[tokio::test]
async fn symbol_info_returns_listed_symbol() {
    let exchange = Arc::new(ScriptedExchange::new());
    let dispatcher = dispatcher(&exchange);

    let info = dispatcher.get_symbol_info("ETHUSDT").await.unwrap();

    assert_eq!(info.symbol(), Some("ETHUSDT"));
}

#[tokio::test]
async fn unlisted_symbol_is_invalid_order() {
    let exchange = Arc::new(ScriptedExchange::new());
    let dispatcher = dispatcher(&exchange);

    let err = dispatcher.get_symbol_info("SOLUSDT").await.unwrap_err();

    assert!(matches!(err, TradingBotError::InvalidOrder { .. }));
    assert!(err.to_string().contains("SOLUSDT"));
    assert_eq!(exchange.calls(), 1);
}

// =============================================================================
// Status and cancel
// =============================================================================

#[tokio::test]
async fn status_and_cancel_pass_order_id_through() {
    let exchange = Arc::new(ScriptedExchange::new());
    let dispatcher = dispatcher(&exchange);

    // Not numeric, padded, and not an id this exchange ever issued.
    let odd_id = OrderId::new(" 00x-client-42 ");

    let status = dispatcher.get_order_status("BTCUSDT", &odd_id).await.unwrap();
    let cancelled = dispatcher.cancel_order("BTCUSDT", &odd_id).await.unwrap();

    assert_eq!(status.status(), Some("FILLED"));
    assert_eq!(cancelled.status(), Some("CANCELED"));

    let lookups = exchange.order_lookups.lock().unwrap().clone();
    assert_eq!(
        lookups,
        vec![
            ("BTCUSDT".to_string(), " 00x-client-42 ".to_string()),
            ("BTCUSDT".to_string(), " 00x-client-42 ".to_string()),
        ]
    );
}

#[tokio::test]
async fn status_and_cancel_still_validate_symbol() {
    let exchange = Arc::new(ScriptedExchange::new());
    let dispatcher = dispatcher(&exchange);
    let order_id = OrderId::new("1");

    let status = dispatcher.get_order_status("btcusdt", &order_id).await.unwrap_err();
    let cancel = dispatcher.cancel_order("BTC-USDT", &order_id).await.unwrap_err();

    assert_eq!(status.code(), ErrorCode::Validation);
    assert_eq!(cancel.code(), ErrorCode::Validation);
    assert_eq!(exchange.calls(), 0);
}

// =============================================================================
// Property: malformed symbols never reach the exchange
// =============================================================================

fn malformed_symbol() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z]{3,8}usdt",
        "[A-Z]{2,5}[-_/ ][A-Z]{3,4}",
        "[A-Z]{1,4}[a-z][A-Z]{0,4}USDT",
        "[A-Z]{3}[!@#$%^&*.]{1,3}USDT",
    ]
}

proptest! {
    #[test]
    fn malformed_symbols_fail_validation_without_exchange_calls(
        symbol in malformed_symbol(),
        tag in prop_oneof![Just("market"), Just("limit"), Just("stop_limit"), Just("oco")],
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let exchange = Arc::new(ScriptedExchange::new());
        let dispatcher = dispatcher(&exchange);
        let params = OrderParams::new(symbol.clone(), OrderSide::Buy, dec!(1))
            .with_price(dec!(100))
            .with_stop_price(dec!(99))
            .with_take_profit_price(dec!(110));

        let result = runtime.block_on(dispatcher.execute_order(tag, &params));

        prop_assert!(
            matches!(result, Err(TradingBotError::Validation(_))),
            "symbol {:?} via {} gave {:?}", symbol, tag, result
        );
        prop_assert_eq!(exchange.calls(), 0);
    }
}
