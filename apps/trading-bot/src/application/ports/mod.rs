//! Application Ports
//!
//! Driven (outbound) interfaces the application uses to reach external
//! systems. Adapters live in the infrastructure layer.

mod exchange_port;

pub use exchange_port::{
    AccountSnapshot, ExchangeError, ExchangeInfo, ExchangePort, LimitOrderRequest,
    MarketOrderRequest, OcoOrderRequest, OrderResult, StopLimitOrderRequest, SymbolInfo,
};
