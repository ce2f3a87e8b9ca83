//! Order Execution Value Objects
//!
//! Immutable types for order placement.

mod order_kind;
mod order_side;
mod time_in_force;

pub use order_kind::{OrderKind, UnknownOrderKind};
pub use order_side::OrderSide;
pub use time_in_force::TimeInForce;
