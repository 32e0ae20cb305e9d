//! Axum router wiring.
//!
//! The public router has no routes of its own: everything falls through to
//! the counting proxy. Dashboard and ops live on the admin router.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops, transport};

pub fn build_public_router(state: AppState) -> Router {
    Router::new()
        .fallback(transport::proxy::proxy)
        .with_state(state)
}

pub fn build_admin_router(state: AppState) -> Router {
    Router::new()
        .route("/hits", get(transport::dashboard::hits_html))
        .route("/hits.json", get(transport::dashboard::hits_json))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
