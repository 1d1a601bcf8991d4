//! Per-instrument order book
//!
//! Public operations over the three structures that move together: the bid
//! ladder, the ask ladder, and the order index. Crossing is resolved
//! eagerly on insert, so a quiescent book is never locked or crossed; an
//! unmatched market order never rests.

use std::time::Instant;

use types::errors::BookError;
use types::ids::OrderId;
use types::level::BookLevel;
use types::numeric::{Price, Qty, Timestamp};
use types::order::{Order, OrderType, Side};
use types::trade::Trade;

use crate::book::{AskBook, BidBook, OrderIndex};
use crate::matching::crossing;

/// Callback invoked once per emitted trade, in emission order.
///
/// Called while the book is mid-operation: the observer must not re-enter
/// the engine. Asynchronous consumers should enqueue and return.
pub type TradeObserver = Box<dyn FnMut(&Trade) + Send + Sync>;

/// A central limit order book for one instrument.
pub struct OrderBook {
    /// Buy ladder, iterated highest price first
    bids: BidBook,
    /// Sell ladder, iterated lowest price first
    asks: AskBook,
    /// id -> (side, price) locate map for cancels and modifies
    index: OrderIndex,
    /// Optional per-trade callback
    observer: Option<TradeObserver>,
    /// Anchor for the monotonic nanosecond clock
    epoch: Instant,
}

impl OrderBook {
    pub fn new() -> Self {
        Self {
            bids: BidBook::new(),
            asks: AskBook::new(),
            index: OrderIndex::new(),
            observer: None,
            epoch: Instant::now(),
        }
    }

    /// Install a trade observer, replacing any previous one.
    pub fn set_trade_observer(&mut self, observer: impl FnMut(&Trade) + Send + Sync + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Monotonic nanoseconds since book creation.
    fn now(&self) -> Timestamp {
        self.epoch.elapsed().as_nanos() as Timestamp
    }

    /// Submit an order: match eagerly, then rest any limit residual.
    ///
    /// Returns the trades in the exact order they were produced, which is
    /// also the order the observer saw them. Market-order residual that
    /// exhausts the opposite ladder is discarded; the caller observes it
    /// as `qty - Σ trade.qty`.
    ///
    /// An id already resting in the book is rejected before any matching.
    pub fn add_order(&mut self, order: Order) -> Result<Vec<Trade>, BookError> {
        if self.index.contains(order.id) {
            return Err(BookError::DuplicateOrder(order.id));
        }

        let mut order = order;
        order.timestamp = self.now();

        let trades = if self.can_match(&order) {
            self.match_order(&mut order)
        } else {
            Vec::new()
        };

        if let Some(observer) = self.observer.as_mut() {
            for trade in &trades {
                observer(trade);
            }
        }

        if !order.is_filled() && order.order_type == OrderType::Limit {
            self.insert_order(order);
        }

        Ok(trades)
    }

    /// Cancel a resting order.
    ///
    /// Returns `true` iff the id was resting. Never fails: cancelling an
    /// unknown id is a no-op.
    pub fn cancel_order(&mut self, id: OrderId) -> bool {
        let Some((side, price)) = self.index.get(id) else {
            return false;
        };

        let removed = match side {
            Side::Buy => self
                .bids
                .level_mut(price)
                .is_some_and(|level| level.remove_order(id)),
            Side::Sell => self
                .asks
                .level_mut(price)
                .is_some_and(|level| level.remove_order(id)),
        };

        if removed {
            match side {
                Side::Buy => self.bids.remove_level_if_empty(price),
                Side::Sell => self.asks.remove_level_if_empty(price),
            }
            self.index.remove(id);
        }
        removed
    }

    /// Reduce a resting order's open quantity. Reduce-only.
    ///
    /// Returns `false` for an unknown id or when `new_qty` is not strictly
    /// below the current remainder. `new_qty == 0` cancels. Reducing never
    /// resets time priority.
    pub fn modify_order(&mut self, id: OrderId, new_qty: Qty) -> bool {
        let Some((side, price)) = self.index.get(id) else {
            return false;
        };

        let level = match side {
            Side::Buy => self.bids.level(price),
            Side::Sell => self.asks.level(price),
        };
        let Some(remaining) = level.and_then(|level| level.find(id)).map(|o| o.remaining) else {
            return false;
        };

        if new_qty >= remaining {
            return false;
        }
        if new_qty.is_zero() {
            return self.cancel_order(id);
        }

        let reduce_by = remaining - new_qty;
        match side {
            Side::Buy => self
                .bids
                .level_mut(price)
                .is_some_and(|level| level.reduce_order(id, reduce_by)),
            Side::Sell => self
                .asks
                .level_mut(price)
                .is_some_and(|level| level.reduce_order(id, reduce_by)),
        }
    }

    /// Best bid price, if any buy orders rest.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    /// Best ask price, if any sell orders rest.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// `best_ask - best_bid` when both sides are populated.
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Top `levels` bid levels, highest price first.
    pub fn bid_depth(&self, levels: usize) -> Vec<BookLevel> {
        self.bids.depth(levels)
    }

    /// Top `levels` ask levels, lowest price first.
    pub fn ask_depth(&self, levels: usize) -> Vec<BookLevel> {
        self.asks.depth(levels)
    }

    /// Read-only view of a resting order.
    ///
    /// # Panics
    /// Panics if the index points at a level that does not hold the order.
    /// That means the book is corrupted and the process cannot continue.
    pub fn find_order(&self, id: OrderId) -> Result<&Order, BookError> {
        let (side, price) = self.index.get(id).ok_or(BookError::NotFound(id))?;

        let level = match side {
            Side::Buy => self.bids.level(price),
            Side::Sell => self.asks.level(price),
        };

        match level.and_then(|level| level.find(id)) {
            Some(order) => Ok(order),
            None => panic!("order index inconsistent for id {id}"),
        }
    }

    pub fn bid_level_count(&self) -> usize {
        self.bids.level_count()
    }

    pub fn ask_level_count(&self) -> usize {
        self.asks.level_count()
    }

    /// Number of resting orders across both sides.
    pub fn order_count(&self) -> usize {
        self.index.len()
    }

    /// Check whether an incoming order can trade at all.
    fn can_match(&self, order: &Order) -> bool {
        let best_opposite = match order.side {
            Side::Buy => self.asks.best_price(),
            Side::Sell => self.bids.best_price(),
        };
        let Some(best) = best_opposite else {
            return false;
        };

        match order.order_type {
            OrderType::Market => true,
            OrderType::Limit => crossing::crosses(order.side, order.price, best),
        }
    }

    /// Drain the opposite ladder level by level in price-time priority.
    ///
    /// One execution timestamp is snapshotted here and shared by every
    /// trade this call produces. Makers that fill completely are removed
    /// from the index as their level reports them gone; emptied levels are
    /// dropped before moving to the next price.
    fn match_order(&mut self, order: &mut Order) -> Vec<Trade> {
        let exec_time = self.now();
        let mut all_trades = Vec::new();

        match order.side {
            Side::Buy => {
                // Match against asks, lowest price first
                while !order.is_filled() {
                    let Some(level) = self.asks.best_level_mut() else {
                        break;
                    };
                    let level_price = level.price();
                    if order.order_type == OrderType::Limit && order.price < level_price {
                        break;
                    }

                    let trades = level.match_order(order, exec_time);
                    for trade in &trades {
                        if !level.contains(trade.maker_order_id) {
                            self.index.remove(trade.maker_order_id);
                        }
                    }
                    all_trades.extend(trades);

                    self.asks.remove_level_if_empty(level_price);
                }
            }
            Side::Sell => {
                // Match against bids, highest price first
                while !order.is_filled() {
                    let Some(level) = self.bids.best_level_mut() else {
                        break;
                    };
                    let level_price = level.price();
                    if order.order_type == OrderType::Limit && order.price > level_price {
                        break;
                    }

                    let trades = level.match_order(order, exec_time);
                    for trade in &trades {
                        if !level.contains(trade.maker_order_id) {
                            self.index.remove(trade.maker_order_id);
                        }
                    }
                    all_trades.extend(trades);

                    self.bids.remove_level_if_empty(level_price);
                }
            }
        }

        all_trades
    }

    /// Rest a passive order on its own side and register it in the index.
    fn insert_order(&mut self, order: Order) {
        self.index.insert(order.id, order.side, order.price);
        match order.side {
            Side::Buy => self.bids.insert(order),
            Side::Sell => self.asks.insert(order),
        }
    }

    /// Panic unless every structural invariant holds. Test and debug aid;
    /// a violation means the book is corrupted.
    pub fn assert_invariants(&self) {
        let mut resting = 0usize;

        for (side, levels) in [
            (Side::Buy, self.bids.iter().collect::<Vec<_>>()),
            (Side::Sell, self.asks.iter().collect::<Vec<_>>()),
        ] {
            for level in levels {
                assert!(!level.is_empty(), "empty level at {}", level.price());

                let mut sum = 0u64;
                for order in level.iter() {
                    assert!(
                        !order.remaining.is_zero(),
                        "order {} rests with zero remaining",
                        order.id
                    );
                    assert_eq!(order.side, side, "order {} on wrong ladder", order.id);
                    assert_eq!(
                        order.price,
                        level.price(),
                        "order {} on wrong level",
                        order.id
                    );
                    assert_eq!(
                        self.index.get(order.id),
                        Some((side, level.price())),
                        "order {} missing from index",
                        order.id
                    );
                    sum += order.remaining.as_u64();
                    resting += 1;
                }
                assert_eq!(
                    level.total_qty(),
                    sum,
                    "level {} total out of sync",
                    level.price()
                );
            }
        }

        assert_eq!(self.index.len(), resting, "index size out of sync");
        for (id, (side, price)) in self.index.iter() {
            let level = match side {
                Side::Buy => self.bids.level(price),
                Side::Sell => self.asks.level(price),
            };
            assert!(
                level.is_some_and(|level| level.contains(id)),
                "index entry {id} does not resolve"
            );
        }

        if let (Some(bid), Some(ask)) = (self.best_bid(), self.best_ask()) {
            assert!(bid < ask, "book is crossed: bid {bid} >= ask {ask}");
        }
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
