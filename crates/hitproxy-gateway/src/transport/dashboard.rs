//! Admin dashboard endpoints.
//!
//! - `/hits`      : HTML table
//! - `/hits.json` : same listing as JSON

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::app_state::AppState;
use crate::dashboard::render_html;
use crate::transport::error::error_response;

pub async fn hits_html(State(app): State<AppState>) -> Response {
    let metrics = app.metrics();
    match app.dashboard().snapshot().await {
        Ok(snap) => {
            metrics.dashboard_reads.inc(&[("outcome", "ok")]);
            Html(render_html(&snap)).into_response()
        }
        Err(e) => {
            metrics.dashboard_reads.inc(&[("outcome", e.client_code().as_str())]);
            tracing::warn!(error = %e, "dashboard read failed");
            error_response(&e)
        }
    }
}

pub async fn hits_json(State(app): State<AppState>) -> Response {
    let metrics = app.metrics();
    match app.dashboard().snapshot().await {
        Ok(snap) => {
            metrics.dashboard_reads.inc(&[("outcome", "ok")]);
            Json(snap).into_response()
        }
        Err(e) => {
            metrics.dashboard_reads.inc(&[("outcome", e.client_code().as_str())]);
            tracing::warn!(error = %e, "dashboard read failed");
            error_response(&e)
        }
    }
}
