use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{depth, order, status};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/orders", post(order::submit_order))
        .route(
            "/orders/:id",
            delete(order::cancel_order).patch(order::modify_order),
        )
        .route("/depth", get(depth::get_depth))
        .route("/status", get(status::get_status))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
