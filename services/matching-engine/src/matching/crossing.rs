//! Crossing detection
//!
//! Price-compatibility predicates between an incoming order and the
//! opposite top of book.

use types::numeric::Price;
use types::order::Side;

/// Check whether a taker at `taker_price` can trade against a resting
/// maker at `maker_price`.
///
/// A buy crosses when it bids at least the maker's ask; a sell crosses
/// when it offers at most the maker's bid.
pub fn crosses(taker_side: Side, taker_price: Price, maker_price: Price) -> bool {
    match taker_side {
        Side::Buy => taker_price >= maker_price,
        Side::Sell => taker_price <= maker_price,
    }
}
