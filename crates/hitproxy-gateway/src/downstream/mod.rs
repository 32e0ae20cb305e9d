//! Downstream invocation seam.
//!
//! The invoker receives the inbound request exactly as built by the transport
//! and returns whatever payload the downstream produced.

mod http;

use async_trait::async_trait;

use hitproxy_core::error::Result;
use hitproxy_core::protocol::{DownstreamResponse, InboundRequest};

pub use http::{HttpInvoker, FUNCTION_ERROR_HEADER};

/// External synchronous function-invocation facility.
#[async_trait]
pub trait DownstreamInvoker: Send + Sync {
    async fn invoke(&self, req: &InboundRequest) -> Result<DownstreamResponse>;
}
