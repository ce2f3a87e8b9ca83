//! Infrastructure Layer
//!
//! Adapters implementing the ports defined in the application layer.
//!
//! - `exchange/`: Exchange API adapters (Binance)

pub mod exchange;
