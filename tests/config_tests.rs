//! Tests for the configuration layer (OverlayConfig, RetryPolicy).
//!
//! Note: We use `Default::default()` then field reassignment to exercise
//! one field's validation at a time.
#![allow(clippy::field_reassign_with_default)]

use std::time::Duration;

use cookie_manager::model::constants::*;
use cookie_manager::{OverlayConfig, RetryPolicy};

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// === Default Values Tests ===

#[test]
fn config_default_retry_policy() {
    let config = OverlayConfig::default();
    assert_eq!(config.retry.max_attempts, DEFAULT_MAX_ATTEMPTS);
    assert_eq!(
        config.retry.initial_delay,
        Duration::from_millis(DEFAULT_RETRY_DELAY_MS)
    );
    assert!(approx_eq(config.retry.backoff_factor, DEFAULT_BACKOFF_FACTOR));
    assert_eq!(
        config.retry.max_delay,
        Duration::from_millis(DEFAULT_MAX_RETRY_DELAY_MS)
    );
}

#[test]
fn config_default_geometry() {
    let config = OverlayConfig::default();
    assert!(approx_eq(config.button_size, DEFAULT_BUTTON_SIZE));
    assert!(approx_eq(config.edge_margin, DEFAULT_EDGE_MARGIN));
    assert!(config.snap_to_edge);
    assert_eq!(config.tint, DEFAULT_TINT);
}

#[test]
fn config_button_is_square() {
    let config = OverlayConfig::default();
    let size = config.button();
    assert!(approx_eq(size.width, DEFAULT_BUTTON_SIZE));
    assert!(approx_eq(size.height, DEFAULT_BUTTON_SIZE));
}

// === Validation Tests ===

#[test]
fn validate_clamps_button_below_minimum() {
    let mut config = OverlayConfig::default();
    config.button_size = 4.0;
    config.validate();
    assert!(approx_eq(config.button_size, MIN_BUTTON_SIZE));
}

#[test]
fn validate_resets_non_finite_button() {
    let mut config = OverlayConfig::default();
    config.button_size = f64::NAN;
    config.validate();
    assert!(approx_eq(config.button_size, DEFAULT_BUTTON_SIZE));
}

#[test]
fn validate_clamps_margin_above_maximum() {
    let mut config = OverlayConfig::default();
    config.edge_margin = 500.0;
    config.validate();
    assert!(approx_eq(config.edge_margin, MAX_EDGE_MARGIN));
}

#[test]
fn validate_clamps_tint_channels() {
    let mut config = OverlayConfig::default();
    config.tint = (-0.5, 1.5, 0.5, 2.0);
    config.validate();
    assert_eq!(config.tint, (0.0, 1.0, 0.5, 1.0));
}

#[test]
fn validate_clamps_attempts_above_maximum() {
    let mut config = OverlayConfig::default();
    config.retry.max_attempts = 10_000;
    config.validate();
    assert_eq!(config.retry.max_attempts, MAX_ATTEMPTS);
}

#[test]
fn validate_clamps_retry_delays() {
    let mut policy = RetryPolicy::new(3, Duration::from_millis(1));
    policy.max_delay = Duration::from_secs(3_600);
    policy.validate();
    assert_eq!(policy.initial_delay, Duration::from_millis(MIN_RETRY_DELAY_MS));
    assert_eq!(policy.max_delay, Duration::from_millis(MAX_RETRY_DELAY_MS));
}

#[test]
fn validate_keeps_max_delay_above_initial() {
    let mut policy = RetryPolicy::new(3, Duration::from_millis(2_000))
        .with_backoff(2.0, Duration::from_millis(100));
    policy.validate();
    assert!(policy.max_delay >= policy.initial_delay);
}

#[test]
fn validate_clamps_backoff_factor() {
    let mut policy = RetryPolicy::default().with_backoff(0.1, Duration::from_secs(1));
    policy.validate();
    assert!(approx_eq(policy.backoff_factor, MIN_BACKOFF_FACTOR));

    let mut policy = RetryPolicy::default().with_backoff(99.0, Duration::from_secs(1));
    policy.validate();
    assert!(approx_eq(policy.backoff_factor, MAX_BACKOFF_FACTOR));
}

// === Clone and PartialEq Tests ===

#[test]
fn config_is_cloneable() {
    let mut config = OverlayConfig::default();
    config.snap_to_edge = false;
    let cloned = config.clone();
    assert_eq!(config, cloned);
}
