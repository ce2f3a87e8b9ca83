//! Binance adapter implementing ExchangePort.

use async_trait::async_trait;
use reqwest::Method;

use crate::application::ports::{
    AccountSnapshot, ExchangeError, ExchangeInfo, ExchangePort, LimitOrderRequest,
    MarketOrderRequest, OcoOrderRequest, OrderResult, StopLimitOrderRequest,
};
use crate::domain::shared::{OrderId, Symbol};

use super::api_types::{FuturesOrderType, Params};
use super::config::{BinanceConfig, BinanceEnvironment};
use super::error::BinanceError;
use super::http_client::{ApiBase, BinanceHttpClient};

const ACCOUNT_PATH: &str = "/fapi/v2/account";
const EXCHANGE_INFO_PATH: &str = "/fapi/v1/exchangeInfo";
const ORDER_PATH: &str = "/fapi/v1/order";
const OCO_PATH: &str = "/api/v3/order/oco";

/// Binance USDⓈ-M futures adapter.
///
/// OCO order lists are not offered by the futures API and go to the spot
/// API instead.
#[derive(Debug, Clone)]
pub struct BinanceExchangeAdapter {
    client: BinanceHttpClient,
    environment: BinanceEnvironment,
}

impl BinanceExchangeAdapter {
    /// Create a new Binance adapter.
    pub fn new(config: &BinanceConfig) -> Result<Self, BinanceError> {
        let client = BinanceHttpClient::new(config)?;
        Ok(Self {
            client,
            environment: config.environment,
        })
    }

    /// Check if we're in live trading mode.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.environment.is_live()
    }

    fn warn_if_live(&self, symbol: &Symbol) {
        if self.is_live() {
            tracing::warn!(%symbol, "Submitting LIVE order - this will execute real trades");
        }
    }

    async fn place_futures_order(&self, params: Params) -> Result<OrderResult, ExchangeError> {
        self.client
            .signed(Method::POST, ApiBase::Futures, ORDER_PATH, &params)
            .await
            .map(OrderResult::new)
            .map_err(ExchangeError::from)
    }

    fn order_params(symbol: &Symbol, order_id: &OrderId) -> Params {
        Params::new()
            .with("symbol", symbol.as_str())
            .with("orderId", order_id.as_str())
    }

    fn market_params(request: &MarketOrderRequest) -> Params {
        Params::new()
            .with("symbol", request.symbol.as_str())
            .with_side(request.side)
            .with("type", FuturesOrderType::Market.as_str())
            .with_decimal("quantity", request.quantity)
    }

    fn limit_params(request: &LimitOrderRequest) -> Params {
        Params::new()
            .with("symbol", request.symbol.as_str())
            .with_side(request.side)
            .with("type", FuturesOrderType::Limit.as_str())
            .with("timeInForce", request.time_in_force.as_str())
            .with_decimal("quantity", request.quantity)
            .with_decimal("price", request.price)
    }

    fn stop_limit_params(request: &StopLimitOrderRequest) -> Params {
        Params::new()
            .with("symbol", request.symbol.as_str())
            .with_side(request.side)
            .with("type", FuturesOrderType::Stop.as_str())
            .with("timeInForce", request.time_in_force.as_str())
            .with_decimal("quantity", request.quantity)
            .with_decimal("price", request.price)
            .with_decimal("stopPrice", request.stop_price)
    }

    fn oco_params(request: &OcoOrderRequest) -> Params {
        let params = Params::new()
            .with("symbol", request.symbol.as_str())
            .with_side(request.side)
            .with_decimal("quantity", request.quantity)
            .with_decimal("price", request.take_profit_price)
            .with_decimal("stopPrice", request.stop_price);

        match request.stop_limit_price {
            Some(stop_limit_price) => params
                .with_decimal("stopLimitPrice", stop_limit_price)
                .with("stopLimitTimeInForce", "GTC"),
            None => params,
        }
    }
}

#[async_trait]
impl ExchangePort for BinanceExchangeAdapter {
    async fn account(&self) -> Result<AccountSnapshot, ExchangeError> {
        tracing::debug!("Fetching futures account");
        self.client
            .signed(Method::GET, ApiBase::Futures, ACCOUNT_PATH, &Params::new())
            .await
            .map(AccountSnapshot::new)
            .map_err(ExchangeError::from)
    }

    async fn exchange_info(&self) -> Result<ExchangeInfo, ExchangeError> {
        tracing::debug!("Fetching exchange info");
        self.client
            .get_public(ApiBase::Futures, EXCHANGE_INFO_PATH)
            .await
            .map(ExchangeInfo::new)
            .map_err(ExchangeError::from)
    }

    async fn place_market_order(
        &self,
        request: &MarketOrderRequest,
    ) -> Result<OrderResult, ExchangeError> {
        self.warn_if_live(&request.symbol);
        self.place_futures_order(Self::market_params(request)).await
    }

    async fn place_limit_order(
        &self,
        request: &LimitOrderRequest,
    ) -> Result<OrderResult, ExchangeError> {
        self.warn_if_live(&request.symbol);
        self.place_futures_order(Self::limit_params(request)).await
    }

    async fn place_stop_limit_order(
        &self,
        request: &StopLimitOrderRequest,
    ) -> Result<OrderResult, ExchangeError> {
        self.warn_if_live(&request.symbol);
        self.place_futures_order(Self::stop_limit_params(request)).await
    }

    async fn place_oco_order(&self, request: &OcoOrderRequest) -> Result<OrderResult, ExchangeError> {
        self.warn_if_live(&request.symbol);
        self.client
            .signed(Method::POST, ApiBase::Spot, OCO_PATH, &Self::oco_params(request))
            .await
            .map(OrderResult::new)
            .map_err(ExchangeError::from)
    }

    async fn get_order(&self, symbol: &Symbol, order_id: &OrderId) -> Result<OrderResult, ExchangeError> {
        self.client
            .signed(
                Method::GET,
                ApiBase::Futures,
                ORDER_PATH,
                &Self::order_params(symbol, order_id),
            )
            .await
            .map(OrderResult::new)
            .map_err(ExchangeError::from)
    }

    async fn cancel_order(
        &self,
        symbol: &Symbol,
        order_id: &OrderId,
    ) -> Result<OrderResult, ExchangeError> {
        self.client
            .signed(
                Method::DELETE,
                ApiBase::Futures,
                ORDER_PATH,
                &Self::order_params(symbol, order_id),
            )
            .await
            .map(OrderResult::new)
            .map_err(ExchangeError::from)
    }
}
