//! Wire payloads
//!
//! Request and response shapes at the HTTP boundary. Sides and order types
//! travel as integer codes (`+1`/`-1`, `1`/`2`); prices and quantities are
//! plain integers in tick scale.

use serde::{Deserialize, Serialize};
use types::ids::OrderId;
use types::level::BookLevel;
use types::numeric::{Price, Qty};
use types::order::{OrderType, Side};
use types::trade::Trade;

/// Order submission payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitOrderRequest {
    pub symbol: String,
    pub id: u64,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Tick-scale price; ignored (and may be omitted) for market orders
    #[serde(default)]
    pub price: Price,
    pub qty: Qty,
}

/// Cancel payload. The symbol routes the cancel to the owning book.
#[derive(Debug, Clone, Deserialize)]
pub struct CancelOrderRequest {
    pub symbol: String,
}

/// Modify (reduce-only) payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ModifyOrderRequest {
    pub symbol: String,
    pub new_qty: Qty,
}

/// Depth query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct DepthQuery {
    pub symbol: String,
    pub levels: Option<usize>,
}

/// One executed trade as reported to the submitting client.
#[derive(Debug, Clone, Serialize)]
pub struct TradeView {
    pub price: Price,
    pub qty: Qty,
    #[serde(rename = "makerId")]
    pub maker_id: OrderId,
    #[serde(rename = "takerId")]
    pub taker_id: OrderId,
}

impl From<&Trade> for TradeView {
    fn from(trade: &Trade) -> Self {
        Self {
            price: trade.price,
            qty: trade.qty,
            maker_id: trade.maker_order_id,
            taker_id: trade.taker_order_id,
        }
    }
}

/// Submission response: trades in execution order plus the quantity that
/// did not execute (resting remainder for a limit order, discarded
/// residual for a market order).
#[derive(Debug, Clone, Serialize)]
pub struct SubmitOrderResponse {
    pub status: &'static str,
    pub trades: Vec<TradeView>,
    pub unfilled: u64,
}

/// Cancel/modify acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct AckResponse {
    pub status: &'static str,
}

/// Depth response: bids descending, asks ascending, each at most the
/// requested number of levels.
#[derive(Debug, Clone, Serialize)]
pub struct DepthResponse {
    pub bids: Vec<BookLevel>,
    pub asks: Vec<BookLevel>,
}

/// Liveness summary.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub orders: usize,
}
