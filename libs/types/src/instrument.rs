//! Instrument metadata
//!
//! Loaded from the external catalog. The engine itself never checks tick or
//! lot alignment; that belongs to the request-validation layer in front of
//! it.

use crate::numeric::{Price, Qty};
use serde::{Deserialize, Serialize};

/// A tradable instrument and its price/quantity grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    /// "AAPL", "GOOG", etc.
    pub symbol: String,
    /// "Apple Inc."
    pub description: String,
    /// Minimum price increment in tick-scale units (e.g. 100 = $0.01)
    pub tick_size: Price,
    /// Minimum quantity increment
    pub lot_size: Qty,
    /// Fixed-point multiplier between display price and ticks (e.g. 10000)
    pub price_scale: u32,
}

impl Instrument {
    /// Check that a price sits on the instrument's tick grid.
    pub fn is_valid_price(&self, price: Price) -> bool {
        self.tick_size.as_i64() > 0 && price.as_i64() % self.tick_size.as_i64() == 0
    }

    /// Check that a quantity is a whole number of lots.
    pub fn is_valid_qty(&self, qty: Qty) -> bool {
        self.lot_size.as_u32() > 0 && qty.as_u32() % self.lot_size.as_u32() == 0
    }
}
