//! Exchange Adapters
//!
//! Implementations of `ExchangePort` for supported exchanges.

pub mod binance;

pub use binance::{BinanceConfig, BinanceEnvironment, BinanceError, BinanceExchangeAdapter};
