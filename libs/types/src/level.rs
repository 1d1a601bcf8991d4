//! Aggregated depth levels
//!
//! Depth queries return one record per price level, serialized as
//! `{price, qty, count}` on the wire.

use crate::numeric::Price;
use serde::{Deserialize, Serialize};

/// One price level of a depth snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLevel {
    /// Price at this level
    pub price: Price,
    /// Sum of remaining quantities at this price
    #[serde(rename = "qty")]
    pub total_qty: u64,
    /// Number of orders at this level
    #[serde(rename = "count")]
    pub order_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let level = BookLevel {
            price: Price::new(10000),
            total_qty: 15,
            order_count: 2,
        };
        let json = serde_json::to_string(&level).unwrap();
        assert_eq!(json, r#"{"price":10000,"qty":15,"count":2}"#);
    }
}
