//! Shared error type across hitproxy crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Setup-time configuration rejected.
    InvalidConfiguration,
    /// Counter increment failed; the downstream was never reached.
    CounterUnavailable,
    /// Downstream invocation failed after the hit was counted.
    DownstreamUnavailable,
    /// Dashboard read failed.
    StoreUnavailable,
    /// Invalid input / malformed message.
    BadRequest,
    /// Unsupported config or payload version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::InvalidConfiguration => "INVALID_CONFIGURATION",
            ClientCode::CounterUnavailable => "COUNTER_UNAVAILABLE",
            ClientCode::DownstreamUnavailable => "DOWNSTREAM_UNAVAILABLE",
            ClientCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, HitProxyError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum HitProxyError {
    #[error("{0}")]
    InvalidConfiguration(String),
    #[error("counter unavailable: {0}")]
    CounterUnavailable(String),
    #[error("downstream unavailable: {0}")]
    DownstreamUnavailable(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl HitProxyError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            HitProxyError::InvalidConfiguration(_) => ClientCode::InvalidConfiguration,
            HitProxyError::CounterUnavailable(_) => ClientCode::CounterUnavailable,
            HitProxyError::DownstreamUnavailable(_) => ClientCode::DownstreamUnavailable,
            HitProxyError::StoreUnavailable(_) => ClientCode::StoreUnavailable,
            HitProxyError::BadRequest(_) => ClientCode::BadRequest,
            HitProxyError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            HitProxyError::Internal(_) => ClientCode::Internal,
        }
    }
}
