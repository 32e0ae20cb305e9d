//! hitproxy core: payload contracts, setup-time validation, and the shared
//! error surface.
//!
//! This crate defines what the gateway forwards to and receives from the
//! downstream handler, plus the read-capacity check that guards the hits
//! table. It carries no transport or runtime dependencies so it can be reused
//! by downstream handlers and tooling.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `HitProxyError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod capacity;
pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{HitProxyError, Result};
