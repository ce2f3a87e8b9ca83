//! Application Layer
//!
//! Orchestrates the domain through the exchange port:
//!
//! - **Ports**: Interface to the remote exchange
//! - **Strategies**: One order-placement strategy per order kind
//! - **Error mapper**: Exchange failure classification
//! - **Retry**: Bounded backoff for read-only queries
//! - **Dispatcher**: Public entry point tying the above together

pub mod dispatcher;
pub mod error_mapper;
pub mod ports;
pub mod retry;
pub mod strategies;

#[cfg(test)]
pub(crate) mod test_support;

pub use dispatcher::Dispatcher;
pub use error_mapper::{Operation, is_insufficient_balance, map_exchange_error};
pub use ports::*;
pub use retry::{ExponentialBackoffCalculator, RetryPolicy, retry_read_only};
pub use strategies::{OrderStrategy, StrategyError, StrategyTable};
