//! Payload contracts exchanged with the downstream invocation facility.
//!
//! - Request: proxy-integration event built from the inbound HTTP request and
//!   forwarded without modification.
//! - Response: opaque JSON payload returned by the downstream. The raw bytes
//!   are retained so the proxy can hand them back exactly as received.
//!
//! Decoding is panic-free: malformed payloads surface as `HitProxyError`.

pub mod request;
pub mod response;

pub use request::{parse_query, InboundRequest};
pub use response::{DownstreamResponse, ResponseParts};
