//! Order record and enums
//!
//! The wire protocol encodes sides and order types as small integers
//! (`+1`/`-1` for Buy/Sell, `1`/`2` for Limit/Market), so both enums carry
//! hand-written serde impls instead of derives.

use crate::ids::OrderId;
use crate::numeric::{Price, Qty, Timestamp};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Buy order (bid), wire code +1
    Buy,
    /// Sell order (ask), wire code -1
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    pub fn wire_code(&self) -> i8 {
        match self {
            Side::Buy => 1,
            Side::Sell => -1,
        }
    }

    pub fn from_wire_code(code: i8) -> Option<Self> {
        match code {
            1 => Some(Side::Buy),
            -1 => Some(Side::Sell),
            _ => None,
        }
    }
}

impl Serialize for Side {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i8(self.wire_code())
    }
}

impl<'de> Deserialize<'de> for Side {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = i8::deserialize(deserializer)?;
        Side::from_wire_code(code)
            .ok_or_else(|| de::Error::custom(format!("invalid side code: {code}")))
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderType {
    /// Rest at the limit price if not fully matched, wire code 1
    Limit,
    /// Match immediately, never rest, wire code 2
    Market,
}

impl OrderType {
    pub fn wire_code(&self) -> u8 {
        match self {
            OrderType::Limit => 1,
            OrderType::Market => 2,
        }
    }

    pub fn from_wire_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(OrderType::Limit),
            2 => Some(OrderType::Market),
            _ => None,
        }
    }
}

impl Serialize for OrderType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.wire_code())
    }
}

impl<'de> Deserialize<'de> for OrderType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u8::deserialize(deserializer)?;
        OrderType::from_wire_code(code)
            .ok_or_else(|| de::Error::custom(format!("invalid order type code: {code}")))
    }
}

/// An order as the engine sees it.
///
/// `remaining` starts equal to `qty` and only ever decreases, through fills
/// or reduce-only modifies. The timestamp is the engine's monotonic arrival
/// time; FIFO within a level is maintained structurally, the timestamp is
/// informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub order_type: OrderType,
    pub price: Price,
    pub qty: Qty,
    pub remaining: Qty,
    pub timestamp: Timestamp,
}

impl Order {
    /// Create a new open order with `remaining == qty`.
    ///
    /// Market orders ignore the supplied price; it is normalised to zero.
    pub fn new(
        id: OrderId,
        side: Side,
        order_type: OrderType,
        price: Price,
        qty: Qty,
        timestamp: Timestamp,
    ) -> Self {
        let price = match order_type {
            OrderType::Limit => price,
            OrderType::Market => Price::ZERO,
        };
        Self {
            id,
            side,
            order_type,
            price,
            qty,
            remaining: qty,
            timestamp,
        }
    }

    /// Check if the order is fully filled.
    pub fn is_filled(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Reduce remaining quantity after a fill.
    ///
    /// # Panics
    /// Panics if the fill exceeds the open quantity; the matching loop
    /// computes fills as `min(taker, maker)` so this indicates a bug.
    pub fn fill(&mut self, amount: Qty) {
        assert!(
            amount <= self.remaining,
            "fill {amount} exceeds remaining {}",
            self.remaining
        );
        self.remaining -= amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit_buy(id: u64, price: i64, qty: u32) -> Order {
        Order::new(
            OrderId::new(id),
            Side::Buy,
            OrderType::Limit,
            Price::new(price),
            Qty::new(qty),
            0,
        )
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_side_wire_codes() {
        assert_eq!(serde_json::to_string(&Side::Buy).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Side::Sell).unwrap(), "-1");

        let side: Side = serde_json::from_str("-1").unwrap();
        assert_eq!(side, Side::Sell);
        assert!(serde_json::from_str::<Side>("0").is_err());
    }

    #[test]
    fn test_order_type_wire_codes() {
        assert_eq!(serde_json::to_string(&OrderType::Limit).unwrap(), "1");
        assert_eq!(serde_json::to_string(&OrderType::Market).unwrap(), "2");

        let order_type: OrderType = serde_json::from_str("2").unwrap();
        assert_eq!(order_type, OrderType::Market);
        assert!(serde_json::from_str::<OrderType>("3").is_err());
    }

    #[test]
    fn test_new_order_is_open() {
        let order = limit_buy(1, 10000, 10);
        assert_eq!(order.remaining, order.qty);
        assert!(!order.is_filled());
    }

    #[test]
    fn test_market_order_price_is_normalised() {
        let order = Order::new(
            OrderId::new(2),
            Side::Sell,
            OrderType::Market,
            Price::new(99999),
            Qty::new(5),
            0,
        );
        assert_eq!(order.price, Price::ZERO);
    }

    #[test]
    fn test_fill_reduces_remaining() {
        let mut order = limit_buy(3, 10000, 10);
        order.fill(Qty::new(4));
        assert_eq!(order.remaining, Qty::new(6));
        order.fill(Qty::new(6));
        assert!(order.is_filled());
    }

    #[test]
    #[should_panic(expected = "exceeds remaining")]
    fn test_overfill_panics() {
        let mut order = limit_buy(4, 10000, 10);
        order.fill(Qty::new(11));
    }
}
