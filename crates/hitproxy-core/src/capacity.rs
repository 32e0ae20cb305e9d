//! Read-capacity validation for the hits table.
//!
//! Runs once at setup, never on the request path. An absent value falls back
//! to [`DEFAULT_READ_CAPACITY`], which sits below the enforced lower bound and
//! is deliberately exempt from the range check.

use crate::error::{HitProxyError, Result};

/// Capacity used when the operator does not configure one.
pub const DEFAULT_READ_CAPACITY: u32 = 5;

/// Exclusive bounds for an explicitly configured capacity.
pub const READ_CAPACITY_MIN_EXCLUSIVE: u32 = 5;
pub const READ_CAPACITY_MAX_EXCLUSIVE: u32 = 20;

/// Fixed message reported for out-of-range values.
pub const READ_CAPACITY_ERROR: &str = "readCapacity must be greater than 5 and less than 20";

/// Validated read capacity (reads per second).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadCapacity(u32);

impl ReadCapacity {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for ReadCapacity {
    fn default() -> Self {
        ReadCapacity(DEFAULT_READ_CAPACITY)
    }
}

/// Validate an optional read capacity. Signed so negative operator input
/// gets the same message as any other out-of-range value.
pub fn validate_read_capacity(value: Option<i64>) -> Result<ReadCapacity> {
    let Some(v) = value else {
        return Ok(ReadCapacity::default());
    };
    if v > i64::from(READ_CAPACITY_MIN_EXCLUSIVE) && v < i64::from(READ_CAPACITY_MAX_EXCLUSIVE) {
        let v = u32::try_from(v)
            .map_err(|_| HitProxyError::InvalidConfiguration(READ_CAPACITY_ERROR.into()))?;
        return Ok(ReadCapacity(v));
    }
    Err(HitProxyError::InvalidConfiguration(READ_CAPACITY_ERROR.into()))
}
