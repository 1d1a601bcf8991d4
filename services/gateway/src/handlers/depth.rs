//! Depth-of-book queries

use axum::extract::{Query, State};
use axum::Json;

use crate::error::AppError;
use crate::models::{DepthQuery, DepthResponse};
use crate::state::AppState;

/// Levels returned when the query does not say how many.
const DEFAULT_DEPTH_LEVELS: usize = 5;

pub async fn get_depth(
    State(state): State<AppState>,
    Query(query): Query<DepthQuery>,
) -> Result<Json<DepthResponse>, AppError> {
    let levels = query.levels.unwrap_or(DEFAULT_DEPTH_LEVELS);
    let snapshot = state.engine.depth(&query.symbol, levels)?;

    Ok(Json(DepthResponse {
        bids: snapshot.bids,
        asks: snapshot.asks,
    }))
}
