//! Invoke the downstream over HTTP.
//!
//! The request event is POSTed as JSON; the response body is the downstream's
//! payload. A `x-function-error` header marks a handler failure even when the
//! transport status is 200.

use async_trait::async_trait;

use hitproxy_core::error::{HitProxyError, Result};
use hitproxy_core::protocol::{DownstreamResponse, InboundRequest};

use super::DownstreamInvoker;

pub const FUNCTION_ERROR_HEADER: &str = "x-function-error";

pub struct HttpInvoker {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl HttpInvoker {
    pub fn new(url: &str) -> Result<Self> {
        let url = reqwest::Url::parse(url).map_err(|e| {
            HitProxyError::InvalidConfiguration(format!("downstream.url is invalid: {e}"))
        })?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| HitProxyError::Internal(format!("http client build failed: {e}")))?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl DownstreamInvoker for HttpInvoker {
    async fn invoke(&self, req: &InboundRequest) -> Result<DownstreamResponse> {
        let resp = self
            .client
            .post(self.url.clone())
            .json(req)
            .send()
            .await
            .map_err(|e| HitProxyError::DownstreamUnavailable(format!("invoke failed: {e}")))?;

        if let Some(kind) = resp.headers().get(FUNCTION_ERROR_HEADER) {
            return Err(HitProxyError::DownstreamUnavailable(format!(
                "function error: {}",
                kind.to_str().unwrap_or("Unhandled")
            )));
        }

        let status = resp.status();
        if !status.is_success() {
            return Err(HitProxyError::DownstreamUnavailable(format!(
                "invoke returned {status}"
            )));
        }

        let raw = resp
            .bytes()
            .await
            .map_err(|e| {
                HitProxyError::DownstreamUnavailable(format!("read payload failed: {e}"))
            })?;
        DownstreamResponse::from_bytes(raw)
    }
}
