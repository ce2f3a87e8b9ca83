//! Binance Exchange Adapter
//!
//! Implementation of `ExchangePort` for the Binance USDⓈ-M futures REST API:
//! - HMAC-SHA256 signed requests
//! - Testnet by default, with an explicit LIVE switch
//! - Structured error codes preserved for classification
//! - No retries at this level

mod adapter;
mod api_types;
mod config;
mod error;
mod http_client;
mod signing;

pub use adapter::BinanceExchangeAdapter;
pub use config::{BinanceConfig, BinanceEnvironment};
pub use error::BinanceError;
