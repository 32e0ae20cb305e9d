//! HTTP transport.
//!
//! The public side turns any HTTP request into an `InboundRequest` and writes
//! the downstream response back. The admin side serves the dashboard.

pub mod dashboard;
pub mod error;
pub mod proxy;
