//! Downstream response payload.
//!
//! The proxy never interprets the response beyond what is needed to write it
//! back onto the HTTP connection. `raw()` is exactly what the downstream
//! returned.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{HitProxyError, Result};

/// Structured view of a proxy-integration response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseParts {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_value_headers: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

/// Response returned by the downstream handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownstreamResponse {
    raw: Bytes,
    parts: ResponseParts,
}

impl DownstreamResponse {
    /// Decode a raw payload. A payload without a usable `statusCode` is a
    /// downstream failure, not a client error.
    pub fn from_bytes(raw: Bytes) -> Result<Self> {
        let parts: ResponseParts = serde_json::from_slice(&raw).map_err(|e| {
            HitProxyError::DownstreamUnavailable(format!("malformed response payload: {e}"))
        })?;
        Ok(Self { raw, parts })
    }

    /// Encode parts into a payload (used by in-process downstreams).
    pub fn from_parts(parts: ResponseParts) -> Result<Self> {
        let raw = serde_json::to_vec(&parts)
            .map_err(|e| HitProxyError::Internal(format!("response encode failed: {e}")))?;
        Ok(Self { raw: Bytes::from(raw), parts })
    }

    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    pub fn parts(&self) -> &ResponseParts {
        &self.parts
    }

    pub fn status_code(&self) -> u16 {
        self.parts.status_code
    }

    /// Flattened header list: single-value headers first, then multi-value
    /// headers. A multi-value entry replaces every single-value header with
    /// the same name, compared case-insensitively.
    pub fn header_pairs(&self) -> Vec<(&str, &str)> {
        let multi = self.parts.multi_value_headers.as_ref();
        let overridden =
            |name: &str| multi.is_some_and(|mv| mv.keys().any(|k| k.eq_ignore_ascii_case(name)));

        let mut out = Vec::new();
        if let Some(h) = &self.parts.headers {
            out.extend(
                h.iter()
                    .filter(|(k, _)| !overridden(k.as_str()))
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            );
        }
        if let Some(mv) = multi {
            for (k, vs) in mv {
                out.extend(vs.iter().map(|v| (k.as_str(), v.as_str())));
            }
        }
        out
    }

    /// Body bytes as they go on the wire.
    pub fn body_bytes(&self) -> Result<Vec<u8>> {
        match (&self.parts.body, self.parts.is_base64_encoded) {
            (None, _) => Ok(Vec::new()),
            (Some(b), false) => Ok(b.as_bytes().to_vec()),
            (Some(b), true) => STANDARD.decode(b).map_err(|e| {
                HitProxyError::DownstreamUnavailable(format!("invalid base64 response body: {e}"))
            }),
        }
    }
}
