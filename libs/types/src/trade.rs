//! Trade execution record
//!
//! One trade is emitted per maker touched by an aggressive order. The price
//! is always the maker's resting price, and every trade produced by one
//! `add_order` call carries the same execution timestamp.

use crate::ids::OrderId;
use crate::numeric::{Price, Qty, Timestamp};
use crate::order::Side;
use serde::{Deserialize, Serialize};

/// An atomic exchange between a resting maker and an aggressive taker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// The aggressive order that consumed liquidity
    pub taker_order_id: OrderId,
    /// The passive order that was resting in the book
    pub maker_order_id: OrderId,
    /// Side of the taker
    pub taker_side: Side,
    /// Execution price (maker's resting price)
    pub price: Price,
    /// Quantity traded
    pub qty: Qty,
    /// Execution time, shared across one matching batch
    pub timestamp: Timestamp,
}
