//! Instrument registry
//!
//! Maps a symbol to an independent [`OrderBook`]. Books have no cross-book
//! state; the `DashMap` gives each book its own serialisation so a
//! multi-threaded transport can drive different instruments concurrently
//! while every call on one book runs to completion exclusively.

use dashmap::DashMap;
use thiserror::Error;

use types::errors::BookError;
use types::ids::OrderId;
use types::level::BookLevel;
use types::numeric::Qty;
use types::order::Order;
use types::trade::Trade;

use crate::orderbook::OrderBook;

/// Errors surfaced by the registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error(transparent)]
    Book(#[from] BookError),
}

/// Depth snapshot for one instrument.
#[derive(Debug, Clone)]
pub struct BookSnapshot {
    pub symbol: String,
    /// Bid levels, highest price first
    pub bids: Vec<BookLevel>,
    /// Ask levels, lowest price first
    pub asks: Vec<BookLevel>,
}

/// Symbol-keyed collection of order books.
#[derive(Default)]
pub struct MatchingEngine {
    books: DashMap<String, OrderBook>,
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self {
            books: DashMap::new(),
        }
    }

    /// Register a book under a symbol, replacing any existing one.
    ///
    /// The registry is expected to be populated at startup from the
    /// instrument catalog, before the transport starts serving.
    pub fn register_book(&self, symbol: impl Into<String>, book: OrderBook) {
        self.books.insert(symbol.into(), book);
    }

    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.books.contains_key(symbol)
    }

    /// All registered symbols, sorted.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.books.iter().map(|e| e.key().clone()).collect();
        symbols.sort();
        symbols
    }

    /// Submit an order to the book for `symbol`.
    pub fn submit_order(&self, symbol: &str, order: Order) -> Result<Vec<Trade>, EngineError> {
        let mut book = self
            .books
            .get_mut(symbol)
            .ok_or_else(|| EngineError::UnknownSymbol(symbol.to_string()))?;
        Ok(book.add_order(order)?)
    }

    /// Cancel a resting order on the book for `symbol`.
    ///
    /// `Ok(false)` means the id was not resting (a no-op, not an error).
    pub fn cancel_order(&self, symbol: &str, id: OrderId) -> Result<bool, EngineError> {
        let mut book = self
            .books
            .get_mut(symbol)
            .ok_or_else(|| EngineError::UnknownSymbol(symbol.to_string()))?;
        Ok(book.cancel_order(id))
    }

    /// Reduce a resting order on the book for `symbol`.
    pub fn modify_order(
        &self,
        symbol: &str,
        id: OrderId,
        new_qty: Qty,
    ) -> Result<bool, EngineError> {
        let mut book = self
            .books
            .get_mut(symbol)
            .ok_or_else(|| EngineError::UnknownSymbol(symbol.to_string()))?;
        Ok(book.modify_order(id, new_qty))
    }

    /// Depth-of-book snapshot, top `levels` per side.
    pub fn depth(&self, symbol: &str, levels: usize) -> Result<BookSnapshot, EngineError> {
        let book = self
            .books
            .get(symbol)
            .ok_or_else(|| EngineError::UnknownSymbol(symbol.to_string()))?;
        Ok(BookSnapshot {
            symbol: symbol.to_string(),
            bids: book.bid_depth(levels),
            asks: book.ask_depth(levels),
        })
    }

    /// Copy of a resting order.
    pub fn find_order(&self, symbol: &str, id: OrderId) -> Result<Order, EngineError> {
        let book = self
            .books
            .get(symbol)
            .ok_or_else(|| EngineError::UnknownSymbol(symbol.to_string()))?;
        Ok(book.find_order(id)?.clone())
    }

    /// Total resting orders across all books.
    pub fn order_count(&self) -> usize {
        self.books.iter().map(|book| book.order_count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::numeric::Price;
    use types::order::{OrderType, Side};

    fn limit(id: u64, side: Side, price: i64, qty: u32) -> Order {
        Order::new(
            OrderId::new(id),
            side,
            OrderType::Limit,
            Price::new(price),
            Qty::new(qty),
            0,
        )
    }

    fn engine_with(symbols: &[&str]) -> MatchingEngine {
        let engine = MatchingEngine::new();
        for symbol in symbols {
            engine.register_book(*symbol, OrderBook::new());
        }
        engine
    }

    #[test]
    fn test_unknown_symbol() {
        let engine = engine_with(&["AAPL"]);
        let result = engine.submit_order("GOOG", limit(1, Side::Buy, 10000, 10));
        assert_eq!(
            result,
            Err(EngineError::UnknownSymbol("GOOG".to_string()))
        );
    }

    #[test]
    fn test_books_are_independent() {
        let engine = engine_with(&["AAPL", "GOOG"]);

        engine
            .submit_order("AAPL", limit(1, Side::Sell, 10000, 10))
            .unwrap();
        // Same id on another instrument is a different order entirely
        engine
            .submit_order("GOOG", limit(1, Side::Sell, 20000, 10))
            .unwrap();

        let trades = engine
            .submit_order("AAPL", limit(2, Side::Buy, 10000, 10))
            .unwrap();
        assert_eq!(trades.len(), 1);

        // GOOG book untouched
        let snapshot = engine.depth("GOOG", 5).unwrap();
        assert_eq!(snapshot.asks.len(), 1);
        assert_eq!(snapshot.asks[0].price, Price::new(20000));
    }

    #[test]
    fn test_cancel_routes_by_symbol() {
        let engine = engine_with(&["AAPL", "GOOG"]);
        engine
            .submit_order("AAPL", limit(7, Side::Buy, 10000, 10))
            .unwrap();

        // Wrong book: no-op
        assert_eq!(engine.cancel_order("GOOG", OrderId::new(7)), Ok(false));
        // Right book: removed
        assert_eq!(engine.cancel_order("AAPL", OrderId::new(7)), Ok(true));
        assert_eq!(engine.order_count(), 0);
    }

    #[test]
    fn test_symbols_sorted() {
        let engine = engine_with(&["MSFT", "AAPL", "GOOG"]);
        assert_eq!(engine.symbols(), vec!["AAPL", "GOOG", "MSFT"]);
    }
}
