//! Client-visible error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use hitproxy_core::error::{ClientCode, HitProxyError};

pub fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::CounterUnavailable | ClientCode::StoreUnavailable => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        ClientCode::DownstreamUnavailable => StatusCode::BAD_GATEWAY,
        ClientCode::BadRequest => StatusCode::BAD_REQUEST,
        ClientCode::InvalidConfiguration
        | ClientCode::UnsupportedVersion
        | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `{"error": CODE, "message": ...}` with the status mapped from the code.
pub fn error_response(err: &HitProxyError) -> Response {
    let code = err.client_code();
    let body = Json(json!({
        "error": code.as_str(),
        "message": err.to_string(),
    }));
    (status_for(code), body).into_response()
}
