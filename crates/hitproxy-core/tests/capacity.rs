//! Read-capacity validation scenarios.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use hitproxy_core::capacity::{validate_read_capacity, DEFAULT_READ_CAPACITY};

#[test]
fn capacity_3_is_rejected_with_fixed_message() {
    let err = validate_read_capacity(Some(3)).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INVALID_CONFIGURATION");
    assert_eq!(err.to_string(), "readCapacity must be greater than 5 and less than 20");
}

#[test]
fn capacity_25_is_rejected() {
    let err = validate_read_capacity(Some(25)).expect_err("must fail");
    assert_eq!(err.to_string(), "readCapacity must be greater than 5 and less than 20");
}

#[test]
fn negative_capacity_gets_the_same_message() {
    let err = validate_read_capacity(Some(-3)).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INVALID_CONFIGURATION");
    assert_eq!(err.to_string(), "readCapacity must be greater than 5 and less than 20");
}

#[test]
fn capacity_12_is_accepted() {
    assert_eq!(validate_read_capacity(Some(12)).unwrap().get(), 12);
}

#[test]
fn boundaries_5_and_20_are_rejected() {
    assert!(validate_read_capacity(Some(5)).is_err());
    assert!(validate_read_capacity(Some(20)).is_err());
}

#[test]
fn absent_capacity_defaults_to_5() {
    assert_eq!(validate_read_capacity(None).unwrap().get(), DEFAULT_READ_CAPACITY);
}
