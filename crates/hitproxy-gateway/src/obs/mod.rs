//! In-process metrics.
//!
//! Stored as atomics behind `DashMap` and rendered in Prometheus text format
//! by the admin `/metrics` handler.

pub mod metrics;

pub use metrics::{InFlightGuard, ProxyMetrics};
