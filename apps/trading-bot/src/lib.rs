// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Trading Bot - Order Dispatch Library
//!
//! Validates order requests, routes them to the strategy for their order
//! type and submits them to Binance USDT-M futures.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Validated value objects and order parameters
//!   - `shared`: `Symbol`, `OrderId`, `ValidationError`
//!   - `order_execution`: `OrderSide`, `OrderKind`, `TimeInForce`, `OrderParams`, validators
//!
//! - **Application**: Orchestration
//!   - `ports`: `ExchangePort` and its request/response types
//!   - `strategies`: Market, limit, stop-limit and OCO strategies
//!   - `error_mapper`: Exchange failures to `TradingBotError`
//!   - `retry`: Exponential backoff for read-only queries
//!   - `dispatcher`: The entry point for callers
//!
//! - **Infrastructure**: Adapters
//!   - `exchange::binance`: Signed REST adapter for Binance
//!
//! Cross-cutting: `config` (YAML + env interpolation), `telemetry`
//! (tracing subscriber) and `error` (caller-facing error taxonomy).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Value objects and validation with no I/O.
pub mod domain;

/// Application layer - Dispatcher, strategies and port definitions.
pub mod application;

/// Infrastructure layer - Exchange adapters.
pub mod infrastructure;

// =============================================================================
// Cross-cutting Modules
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Caller-facing error taxonomy.
pub mod error;

/// Logging setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::order_execution::{
    OrderParams,
    value_objects::{OrderKind, OrderSide, TimeInForce, UnknownOrderKind},
};
pub use domain::shared::{OrderId, Symbol, ValidationError};

// Application re-exports
pub use application::{
    AccountSnapshot, Dispatcher, ExchangeError, ExchangeInfo, ExchangePort, OrderResult,
    RetryPolicy, SymbolInfo,
};

// Infrastructure re-exports
pub use infrastructure::exchange::{
    BinanceConfig, BinanceEnvironment, BinanceError, BinanceExchangeAdapter,
};

pub use error::{ErrorCode, TradingBotError};
