//! Price level with FIFO queue
//!
//! A price level holds every resting order at one price point, in arrival
//! order. Time priority is enforced structurally: new orders append to the
//! tail, matching consumes from the head.
//!
//! Invariant at every observable point: `total_qty` equals the sum of
//! `remaining` over the queued orders.

use std::collections::VecDeque;
use types::ids::OrderId;
use types::numeric::{Price, Qty, Timestamp};
use types::order::Order;
use types::trade::Trade;

/// All resting orders at a single price on one side of the book.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price of this level
    price: Price,
    /// Sum of remaining quantities over the queue
    total_qty: u64,
    /// Resting orders in FIFO order
    orders: VecDeque<Order>,
}

impl PriceLevel {
    /// Create a new empty price level.
    pub fn new(price: Price) -> Self {
        Self {
            price,
            total_qty: 0,
            orders: VecDeque::new(),
        }
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn total_qty(&self) -> u64 {
        self.total_qty
    }

    pub fn order_count(&self) -> u32 {
        self.orders.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Peek at the order next in line to be filled.
    pub fn front(&self) -> Option<&Order> {
        self.orders.front()
    }

    /// Iterate the queue in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    /// Find a resting order by id.
    pub fn find(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.find(id).is_some()
    }

    /// Append an order at the back of the queue (time priority).
    pub fn add_order(&mut self, order: Order) {
        self.total_qty += order.remaining.as_u64();
        self.orders.push_back(order);
    }

    /// Remove a resting order by id. Linear scan; levels are small.
    ///
    /// Returns `true` iff an order with that id was queued here.
    pub fn remove_order(&mut self, id: OrderId) -> bool {
        let Some(position) = self.orders.iter().position(|order| order.id == id) else {
            return false;
        };
        let order = self.orders.remove(position).expect("position is in bounds");
        self.total_qty -= order.remaining.as_u64();
        true
    }

    /// Reduce a resting order's open quantity in place.
    ///
    /// A reduction covering the whole remainder behaves as a removal.
    /// Queue position is preserved: reducing does not reset time priority.
    pub fn reduce_order(&mut self, id: OrderId, reduce_by: Qty) -> bool {
        let Some(position) = self.orders.iter().position(|order| order.id == id) else {
            return false;
        };

        if reduce_by >= self.orders[position].remaining {
            return self.remove_order(id);
        }

        self.orders[position].remaining -= reduce_by;
        self.total_qty -= reduce_by.as_u64();
        true
    }

    /// Fill the aggressor against this level, head-first.
    ///
    /// Consumes the queue front-to-back while the aggressor has open
    /// quantity, emitting one trade per maker at the level price. Fully
    /// filled makers are popped; a partially filled maker keeps its place
    /// at the head.
    pub fn match_order(&mut self, aggressor: &mut Order, exec_time: Timestamp) -> Vec<Trade> {
        let mut trades = Vec::new();

        while !aggressor.is_filled() {
            let Some(maker) = self.orders.front_mut() else {
                break;
            };

            let fill_qty = aggressor.remaining.min(maker.remaining);

            trades.push(Trade {
                taker_order_id: aggressor.id,
                maker_order_id: maker.id,
                taker_side: aggressor.side,
                price: self.price,
                qty: fill_qty,
                timestamp: exec_time,
            });

            aggressor.fill(fill_qty);
            maker.fill(fill_qty);
            self.total_qty -= fill_qty.as_u64();

            if maker.is_filled() {
                self.orders.pop_front();
            }
        }

        trades
    }
}
