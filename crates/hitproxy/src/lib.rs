//! Top-level facade crate for hitproxy.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use hitproxy_core::*;
}

pub mod gateway {
    pub use hitproxy_gateway::*;
}
