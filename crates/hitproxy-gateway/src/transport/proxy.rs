//! Public proxy endpoint (router fallback, so every path is proxied).

use std::collections::BTreeMap;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::Response,
};
use bytes::Bytes;
use tokio::time::Instant;
use tracing::Instrument;

use hitproxy_core::error::{HitProxyError, Result};
use hitproxy_core::protocol::{parse_query, DownstreamResponse, InboundRequest};

use crate::app_state::AppState;
use crate::transport::error::error_response;

pub async fn proxy(
    State(app): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let span = tracing::info_span!("proxy", method = %method, path = %uri.path());
    async move {
        let metrics = app.metrics();
        let _in_flight = metrics.in_flight_guard();
        let started = Instant::now();

        let req = InboundRequest::from_parts(
            method.as_str(),
            uri.path(),
            header_map(&headers),
            uri.query().map(parse_query).unwrap_or_default(),
            &body,
        );

        let result = app
            .proxy()
            .handle(&req)
            .await
            .and_then(|resp| render_downstream(&resp));

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.client_code().as_str(),
        };
        metrics.requests.inc(&[("outcome", outcome)]);
        metrics
            .request_duration
            .observe(&[("outcome", outcome)], started.elapsed());

        match result {
            Ok(resp) => resp,
            Err(e) => {
                tracing::info!(error = %e, "proxy request failed");
                error_response(&e)
            }
        }
    }
    .instrument(span)
    .await
}

/// Every header value by lowercase name; non-UTF-8 bytes are replaced.
fn header_map(headers: &HeaderMap) -> BTreeMap<String, Vec<String>> {
    let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for name in headers.keys() {
        let values = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect();
        out.insert(name.as_str().to_string(), values);
    }
    out
}

/// Write the downstream response onto the wire: same status, same headers,
/// same body bytes.
pub fn render_downstream(resp: &DownstreamResponse) -> Result<Response> {
    let status = StatusCode::from_u16(resp.status_code()).map_err(|e| {
        HitProxyError::DownstreamUnavailable(format!("invalid status code: {e}"))
    })?;
    let body = resp.body_bytes()?;

    let mut builder = Response::builder().status(status);
    for (name, value) in resp.header_pairs() {
        builder = builder.header(name, value);
    }
    builder
        .body(Body::from(body))
        .map_err(|e| HitProxyError::DownstreamUnavailable(format!("invalid response header: {e}")))
}
