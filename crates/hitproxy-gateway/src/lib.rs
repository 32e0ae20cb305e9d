//! hitproxy gateway library entry.
//!
//! Wires the counter store, the downstream invoker, the counting proxy and
//! the dashboard into an HTTP service. Consumed by the binary (`main.rs`) and
//! by integration tests.

pub mod app_state;
pub mod config;
pub mod dashboard;
pub mod downstream;
pub mod obs;
pub mod ops;
pub mod proxy;
pub mod router;
pub mod store;
pub mod transport;
