//! Inbound request event.
//!
//! Field names follow the proxy-integration event shape (`httpMethod`,
//! `queryStringParameters`, ...) so existing downstream handlers can consume
//! the payload unchanged.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

use crate::error::{HitProxyError, Result};

/// Request forwarded to the downstream handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundRequest {
    /// Request path, also the counter key.
    pub path: String,
    /// HTTP method (upper case).
    pub http_method: String,
    /// Request headers, last value per name.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Every value of every request header, in arrival order.
    #[serde(default)]
    pub multi_value_headers: BTreeMap<String, Vec<String>>,
    /// Decoded query parameters, last value per key. `None` when the request
    /// had none.
    #[serde(default)]
    pub query_string_parameters: Option<BTreeMap<String, String>>,
    /// Every value of every query key, in arrival order.
    #[serde(default)]
    pub multi_value_query_string_parameters: Option<BTreeMap<String, Vec<String>>>,
    /// Body as text, or base64 when `is_base64_encoded` is set.
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl InboundRequest {
    /// Build an event from already-extracted HTTP parts.
    ///
    /// Bodies that are not valid UTF-8 are base64 encoded and flagged.
    pub fn from_parts(
        http_method: impl Into<String>,
        path: impl Into<String>,
        headers: BTreeMap<String, Vec<String>>,
        query: BTreeMap<String, Vec<String>>,
        body: &[u8],
    ) -> Self {
        let (body, is_base64_encoded) = if body.is_empty() {
            (None, false)
        } else {
            match std::str::from_utf8(body) {
                Ok(s) => (Some(s.to_owned()), false),
                Err(_) => (Some(STANDARD.encode(body)), true),
            }
        };

        let (query_string_parameters, multi_value_query_string_parameters) = if query.is_empty() {
            (None, None)
        } else {
            (Some(last_values(&query)), Some(query))
        };

        Self {
            path: path.into(),
            http_method: http_method.into(),
            headers: last_values(&headers),
            multi_value_headers: headers,
            query_string_parameters,
            multi_value_query_string_parameters,
            body,
            is_base64_encoded,
        }
    }

    /// Counter key for this request.
    pub fn key(&self) -> &str {
        &self.path
    }

    /// Raw body bytes (base64 decoded when flagged).
    pub fn body_bytes(&self) -> Result<Vec<u8>> {
        match (&self.body, self.is_base64_encoded) {
            (None, _) => Ok(Vec::new()),
            (Some(b), false) => Ok(b.as_bytes().to_vec()),
            (Some(b), true) => STANDARD
                .decode(b)
                .map_err(|e| HitProxyError::BadRequest(format!("invalid base64 body: {e}"))),
        }
    }

    /// Serialize as the invocation payload.
    pub fn to_payload(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| HitProxyError::Internal(format!("request encode failed: {e}")))
    }
}

fn last_values(multi: &BTreeMap<String, Vec<String>>) -> BTreeMap<String, String> {
    multi
        .iter()
        .filter_map(|(k, vs)| vs.last().map(|v| (k.clone(), v.clone())))
        .collect()
}

/// Split a raw query string into keys and all of their values.
///
/// `+` decodes to a space and `%XX` escapes are resolved. A key or value whose
/// escapes do not decode to UTF-8 is kept in its raw form.
pub fn parse_query(raw: &str) -> BTreeMap<String, Vec<String>> {
    let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        out.entry(decode_component(k))
            .or_default()
            .push(decode_component(v));
    }
    out
}

fn decode_component(s: &str) -> String {
    let spaced = s.replace('+', " ");
    match percent_decode_str(&spaced).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => s.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn binary_body_is_base64_flagged() {
        let req = InboundRequest::from_parts(
            "POST",
            "/upload",
            BTreeMap::new(),
            BTreeMap::new(),
            &[0xff, 0x00, 0xfe],
        );
        assert!(req.is_base64_encoded);
        assert_eq!(req.body_bytes().unwrap(), vec![0xff, 0x00, 0xfe]);
    }

    #[test]
    fn repeated_headers_and_query_keys_keep_every_value() {
        let headers = BTreeMap::from([(
            "cookie".to_string(),
            vec!["x=1".to_string(), "y=2".to_string()],
        )]);
        let req = InboundRequest::from_parts("GET", "/p", headers, parse_query("tag=a&tag=b"), b"");

        assert_eq!(req.headers["cookie"], "y=2");
        assert_eq!(req.multi_value_headers["cookie"], vec!["x=1", "y=2"]);
        assert_eq!(req.query_string_parameters.as_ref().unwrap()["tag"], "b");
        assert_eq!(
            req.multi_value_query_string_parameters.as_ref().unwrap()["tag"],
            vec!["a", "b"]
        );
    }

    #[test]
    fn query_decoding() {
        let q = parse_query("a=1+2&b=%2Fx&flag&x=%FF&&c=");
        assert_eq!(q["a"], vec!["1 2"]);
        assert_eq!(q["b"], vec!["/x"]);
        assert_eq!(q["flag"], vec![""]);
        assert_eq!(q["x"], vec!["%FF"]);
        assert_eq!(q["c"], vec![""]);
        assert_eq!(q.len(), 5);
    }

    #[test]
    fn empty_query_and_body_are_absent() {
        let req = InboundRequest::from_parts("GET", "/", BTreeMap::new(), BTreeMap::new(), b"");
        assert!(req.query_string_parameters.is_none());
        assert!(req.multi_value_query_string_parameters.is_none());
        assert!(req.body.is_none());
        assert_eq!(req.key(), "/");
    }
}
