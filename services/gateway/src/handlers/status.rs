//! Liveness endpoint

use axum::extract::State;
use axum::Json;

use crate::models::StatusResponse;
use crate::state::AppState;

pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        orders: state.engine.order_count(),
    })
}
