//! Inbound request event vectors.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::BTreeMap;

use hitproxy_core::protocol::InboundRequest;

use vector_loader::load_raw;

#[test]
fn parse_event_full() {
    let req: InboundRequest = serde_json::from_str(&load_raw("request_event.json")).unwrap();
    assert_eq!(req.key(), "/hello");
    assert_eq!(req.http_method, "GET");
    assert_eq!(req.headers.get("host").map(String::as_str), Some("example.com"));
    let q = req.query_string_parameters.as_ref().unwrap();
    assert_eq!(q.get("name").map(String::as_str), Some("cdk"));
    let mq = req.multi_value_query_string_parameters.as_ref().unwrap();
    assert_eq!(mq["tag"], vec!["a", "b"]);
    assert_eq!(req.multi_value_headers["cookie"], vec!["x=1", "y=2"]);
    assert!(req.body.is_none());
}

#[test]
fn parse_event_min() {
    let req: InboundRequest = serde_json::from_str(&load_raw("request_event_min.json")).unwrap();
    assert_eq!(req.key(), "/test");
    assert!(req.headers.is_empty());
    assert!(req.multi_value_headers.is_empty());
    assert!(req.query_string_parameters.is_none());
    assert!(!req.is_base64_encoded);
}

#[test]
fn payload_uses_event_field_names() {
    let mut headers = BTreeMap::new();
    headers.insert("content-type".to_string(), vec!["application/json".to_string()]);
    let req =
        InboundRequest::from_parts("PUT", "/items/7", headers, BTreeMap::new(), br#"{"a":1}"#);

    let v: serde_json::Value = serde_json::from_slice(&req.to_payload().unwrap()).unwrap();
    assert_eq!(v["path"], "/items/7");
    assert_eq!(v["httpMethod"], "PUT");
    assert_eq!(v["body"], r#"{"a":1}"#);
    assert_eq!(v["isBase64Encoded"], false);
    assert!(v["queryStringParameters"].is_null());
    assert!(v["multiValueQueryStringParameters"].is_null());
    assert_eq!(v["headers"]["content-type"], "application/json");
    assert_eq!(v["multiValueHeaders"]["content-type"][0], "application/json");

    let back: InboundRequest = serde_json::from_value(v).unwrap();
    assert_eq!(back, req);
}
