//! Scriptable in-memory exchange for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};

use crate::application::ports::{
    AccountSnapshot, ExchangeError, ExchangeInfo, ExchangePort, LimitOrderRequest,
    MarketOrderRequest, OcoOrderRequest, OrderResult, StopLimitOrderRequest,
};
use crate::domain::shared::{OrderId, Symbol};

/// Exchange double that records every call and replays scripted responses.
///
/// Each method pops the next scripted response for its name; once the
/// script runs dry it returns a canned success payload.
#[derive(Default)]
pub struct MockExchange {
    scripts: Mutex<HashMap<&'static str, VecDeque<Result<Value, ExchangeError>>>>,
    calls: Mutex<Vec<(&'static str, Value)>>,
}

impl MockExchange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `method`.
    pub fn respond(self, method: &'static str, response: Result<Value, ExchangeError>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(method)
            .or_default()
            .push_back(response);
        self
    }

    /// Queue the same failure `times` times.
    pub fn fail(mut self, method: &'static str, error: &ExchangeError, times: usize) -> Self {
        for _ in 0..times {
            self = self.respond(method, Err(error.clone()));
        }
        self
    }

    /// Number of calls made to `method`.
    pub fn calls(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| *name == method)
            .count()
    }

    /// Number of calls made to any method.
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Arguments of the most recent call to `method`.
    pub fn last_request(&self, method: &str) -> Option<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(name, _)| *name == method)
            .map(|(_, args)| args.clone())
    }

    fn record(&self, method: &'static str, args: &impl Serialize) -> Result<Value, ExchangeError> {
        self.calls
            .lock()
            .unwrap()
            .push((method, serde_json::to_value(args).unwrap()));

        self.scripts
            .lock()
            .unwrap()
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(default_response(method)))
    }
}

fn default_response(method: &str) -> Value {
    match method {
        "account" => json!({"totalWalletBalance": "1000.00", "assets": []}),
        "exchange_info" => json!({
            "symbols": [
                {"symbol": "BTCUSDT", "status": "TRADING"},
                {"symbol": "ETHUSDT", "status": "TRADING"}
            ]
        }),
        "place_oco_order" => json!({"orderListId": 1, "listOrderStatus": "EXECUTING"}),
        _ => json!({"orderId": 1, "status": "NEW"}),
    }
}

#[async_trait]
impl ExchangePort for MockExchange {
    async fn account(&self) -> Result<AccountSnapshot, ExchangeError> {
        self.record("account", &()).map(AccountSnapshot::new)
    }

    async fn exchange_info(&self) -> Result<ExchangeInfo, ExchangeError> {
        self.record("exchange_info", &()).map(ExchangeInfo::new)
    }

    async fn place_market_order(
        &self,
        request: &MarketOrderRequest,
    ) -> Result<OrderResult, ExchangeError> {
        self.record("place_market_order", request).map(OrderResult::new)
    }

    async fn place_limit_order(
        &self,
        request: &LimitOrderRequest,
    ) -> Result<OrderResult, ExchangeError> {
        self.record("place_limit_order", request).map(OrderResult::new)
    }

    async fn place_stop_limit_order(
        &self,
        request: &StopLimitOrderRequest,
    ) -> Result<OrderResult, ExchangeError> {
        self.record("place_stop_limit_order", request).map(OrderResult::new)
    }

    async fn place_oco_order(&self, request: &OcoOrderRequest) -> Result<OrderResult, ExchangeError> {
        self.record("place_oco_order", request).map(OrderResult::new)
    }

    async fn get_order(&self, symbol: &Symbol, order_id: &OrderId) -> Result<OrderResult, ExchangeError> {
        self.record("get_order", &(symbol, order_id)).map(OrderResult::new)
    }

    async fn cancel_order(
        &self,
        symbol: &Symbol,
        order_id: &OrderId,
    ) -> Result<OrderResult, ExchangeError> {
        self.record("cancel_order", &(symbol, order_id)).map(OrderResult::new)
    }
}
