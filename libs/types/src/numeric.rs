//! Fixed-point integer types for prices and quantities
//!
//! All engine arithmetic is exact integer arithmetic in the instrument's
//! tick scale; no floating point anywhere inside the matching path. A price
//! of $585.33 at a price scale of 10000 is stored as `5853300`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Monotonic timestamp in nanoseconds.
///
/// Only monotonicity matters (trade ordering and FIFO tie-breaking); the
/// value is not anchored to wall-clock time.
pub type Timestamp = u64;

/// Price in tick-scale integer units.
///
/// Signed so that spreads and differences are closed under subtraction.
/// Market orders carry a price of zero, which is never interpreted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn new(ticks: i64) -> Self {
        Self(ticks)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Self) -> Self::Output {
        Price(self.0 + rhs.0)
    }
}

impl Sub for Price {
    type Output = Price;

    fn sub(self, rhs: Self) -> Self::Output {
        Price(self.0 - rhs.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quantity in whole shares.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Qty(u32);

impl Qty {
    pub const ZERO: Qty = Qty(0);

    pub fn new(shares: u32) -> Self {
        Self(shares)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Widened value for aggregate sums (level totals, volume counters).
    pub fn as_u64(&self) -> u64 {
        u64::from(self.0)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn min(self, other: Qty) -> Qty {
        Qty(self.0.min(other.0))
    }
}

impl Add for Qty {
    type Output = Qty;

    fn add(self, rhs: Self) -> Self::Output {
        Qty(self.0 + rhs.0)
    }
}

impl AddAssign for Qty {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Qty {
    type Output = Qty;

    fn sub(self, rhs: Self) -> Self::Output {
        Qty(self.0 - rhs.0)
    }
}

impl SubAssign for Qty {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Qty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_arithmetic() {
        let bid = Price::new(10000);
        let ask = Price::new(10100);
        assert_eq!(ask - bid, Price::new(100));
        assert_eq!(bid + Price::new(50), Price::new(10050));
    }

    #[test]
    fn test_price_ordering() {
        assert!(Price::new(9900) < Price::new(10000));
        assert!(Price::new(10100) > Price::new(10000));
    }

    #[test]
    fn test_qty_arithmetic() {
        let mut qty = Qty::new(10);
        qty -= Qty::new(4);
        assert_eq!(qty, Qty::new(6));
        qty += Qty::new(1);
        assert_eq!(qty, Qty::new(7));
        assert_eq!(Qty::new(3).min(Qty::new(7)), Qty::new(3));
    }

    #[test]
    fn test_qty_zero() {
        assert!(Qty::ZERO.is_zero());
        assert!(!Qty::new(1).is_zero());
    }

    #[test]
    fn test_serialization_is_plain_integers() {
        assert_eq!(serde_json::to_string(&Price::new(5853300)).unwrap(), "5853300");
        assert_eq!(serde_json::to_string(&Qty::new(100)).unwrap(), "100");

        let price: Price = serde_json::from_str("-25").unwrap();
        assert_eq!(price, Price::new(-25));
    }
}
