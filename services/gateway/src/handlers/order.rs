//! Order submission, cancellation, and modification
//!
//! This layer owns request validation: symbol existence, tick and lot
//! alignment, and positive quantities. The engine behind it assumes
//! validated input and never re-checks alignment.

use axum::extract::{Path, State};
use axum::Json;

use types::ids::OrderId;
use types::order::{Order, OrderType};

use crate::error::AppError;
use crate::models::{
    AckResponse, CancelOrderRequest, ModifyOrderRequest, SubmitOrderRequest, SubmitOrderResponse,
    TradeView,
};
use crate::state::AppState;

pub async fn submit_order(
    State(state): State<AppState>,
    Json(payload): Json<SubmitOrderRequest>,
) -> Result<Json<SubmitOrderResponse>, AppError> {
    let instrument = state
        .catalog
        .find(&payload.symbol)
        .ok_or_else(|| AppError::BadRequest(format!("unknown symbol: {}", payload.symbol)))?;

    if payload.qty.is_zero() {
        return Err(AppError::BadRequest("qty must be positive".to_string()));
    }
    if !instrument.is_valid_qty(payload.qty) {
        return Err(AppError::BadRequest(format!(
            "qty {} is not a multiple of lot size {}",
            payload.qty, instrument.lot_size
        )));
    }
    if payload.order_type == OrderType::Limit && !instrument.is_valid_price(payload.price) {
        return Err(AppError::BadRequest(format!(
            "price {} is not on the {} tick grid",
            payload.price, instrument.tick_size
        )));
    }

    let order = Order::new(
        OrderId::new(payload.id),
        payload.side,
        payload.order_type,
        payload.price,
        payload.qty,
        0,
    );

    let trades = state.engine.submit_order(&payload.symbol, order)?;

    let filled: u64 = trades.iter().map(|t| t.qty.as_u64()).sum();
    let unfilled = payload.qty.as_u64() - filled;

    Ok(Json(SubmitOrderResponse {
        status: "accepted",
        trades: trades.iter().map(TradeView::from).collect(),
        unfilled,
    }))
}

pub async fn cancel_order(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<CancelOrderRequest>,
) -> Result<Json<AckResponse>, AppError> {
    let cancelled = state
        .engine
        .cancel_order(&payload.symbol, OrderId::new(id))?;

    if cancelled {
        Ok(Json(AckResponse {
            status: "cancelled",
        }))
    } else {
        Err(AppError::NotFound(format!("order not found: {id}")))
    }
}

pub async fn modify_order(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<ModifyOrderRequest>,
) -> Result<Json<AckResponse>, AppError> {
    let modified = state
        .engine
        .modify_order(&payload.symbol, OrderId::new(id), payload.new_qty)?;

    if modified {
        Ok(Json(AckResponse { status: "modified" }))
    } else {
        Err(AppError::BadRequest(format!(
            "modify rejected for order {id}: unknown id or quantity is not a reduction"
        )))
    }
}
