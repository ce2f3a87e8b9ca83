//! Order Execution Domain
//!
//! Order kinds, caller parameters and the validators that gate every
//! exchange call.

pub mod params;
pub mod validation;
pub mod value_objects;

pub use params::OrderParams;
pub use validation::{parse_decimal, require, validate_price, validate_quantity, validate_symbol};
pub use value_objects::{OrderKind, OrderSide, TimeInForce, UnknownOrderKind};
