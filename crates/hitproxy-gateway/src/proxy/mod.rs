//! Counting proxy: count the hit, forward the request, pass the answer back.

pub mod construct;
pub mod handler;

pub use construct::{HitCounter, HitCounterProps};
pub use handler::{CountingProxy, ProxyTimeouts};
