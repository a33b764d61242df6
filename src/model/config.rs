//! Overlay configuration (pure Rust, no FFI).
//!
//! Values are read once at bootstrap through a key lookup (the process
//! environment in production) and never written back.

use std::time::Duration;

use super::constants::*;
use super::geometry::Size;
use crate::attach::RetryPolicy;
use crate::{clamp, parse_hex_color};

/// Complete overlay configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    /// Bounded retry schedule used when attaching to the host window.
    pub retry: RetryPolicy,
    /// Button diameter in points.
    pub button_size: f64,
    /// Distance kept from the window edges when the button comes to rest.
    pub edge_margin: f64,
    /// Snap the resting button to the nearest vertical edge.
    pub snap_to_edge: bool,
    /// Button tint (r, g, b, a) in [0.0, 1.0].
    pub tint: (f64, f64, f64, f64),
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            button_size: DEFAULT_BUTTON_SIZE,
            edge_margin: DEFAULT_EDGE_MARGIN,
            snap_to_edge: true,
            tint: DEFAULT_TINT,
        }
    }
}

impl OverlayConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unparseable values are
    /// ignored (with a warning) and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = parsed::<u32, _>(&lookup, ENV_MAX_ATTEMPTS) {
            config.retry.max_attempts = v;
        }
        if let Some(v) = parsed::<u64, _>(&lookup, ENV_RETRY_DELAY_MS) {
            config.retry.initial_delay = Duration::from_millis(v);
        }
        if let Some(v) = parsed::<f64, _>(&lookup, ENV_RETRY_BACKOFF) {
            config.retry.backoff_factor = v;
        }
        if let Some(v) = parsed::<u64, _>(&lookup, ENV_RETRY_MAX_DELAY_MS) {
            config.retry.max_delay = Duration::from_millis(v);
        }
        if let Some(v) = parsed::<f64, _>(&lookup, ENV_BUTTON_SIZE) {
            config.button_size = v;
        }
        if let Some(v) = parsed::<f64, _>(&lookup, ENV_EDGE_MARGIN) {
            config.edge_margin = v;
        }
        if let Some(v) = lookup(ENV_SNAP_TO_EDGE) {
            config.snap_to_edge = is_truthy(&v);
        }
        if let Some(v) = lookup(ENV_TINT) {
            match parse_hex_color(&v) {
                Some(tint) => config.tint = tint,
                None => tracing::warn!(key = ENV_TINT, value = %v, "ignoring invalid colour"),
            }
        }

        config.validate();
        config
    }

    /// Validates and clamps all values to valid ranges.
    pub fn validate(&mut self) {
        self.retry.validate();
        self.button_size = if self.button_size.is_finite() {
            clamp(self.button_size, MIN_BUTTON_SIZE, MAX_BUTTON_SIZE)
        } else {
            DEFAULT_BUTTON_SIZE
        };
        self.edge_margin = if self.edge_margin.is_finite() {
            clamp(self.edge_margin, 0.0, MAX_EDGE_MARGIN)
        } else {
            DEFAULT_EDGE_MARGIN
        };
        self.tint = (
            clamp(self.tint.0, 0.0, 1.0),
            clamp(self.tint.1, 0.0, 1.0),
            clamp(self.tint.2, 0.0, 1.0),
            clamp(self.tint.3, 0.0, 1.0),
        );
    }

    pub fn button(&self) -> Size {
        Size::square(self.button_size)
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable setting");
            None
        }
    }
}

pub(crate) fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
