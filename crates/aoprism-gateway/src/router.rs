//! Axum router wiring (HTTP -> WS upgrade, ops endpoints).
//!
//! WebSocket clients connect to `/`; `/healthz` and `/metrics` share the
//! listener.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(transport::ws::ws_upgrade))
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
