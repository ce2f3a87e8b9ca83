//! Domain Layer
//!
//! The innermost layer: value objects and validators with zero
//! infrastructure dependencies.
//!
//! - [`order_execution`]: Order kinds, parameters and input validation
//! - [`shared`]: Symbol, identifiers and validation errors

pub mod order_execution;
pub mod shared;
