//! Configuration constants and default values.
//!
//! This module contains the retry defaults, overlay geometry defaults,
//! environment variable names, and validation limits.

// === Retry Defaults ===

/// Default number of window searches before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Default delay before the first retry, in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;

/// Default multiplier applied to the delay after each failed attempt.
pub const DEFAULT_BACKOFF_FACTOR: f64 = 1.5;

/// Default upper bound for the retry delay, in milliseconds.
pub const DEFAULT_MAX_RETRY_DELAY_MS: u64 = 3_000;

// === Overlay Defaults ===

/// Default floating button diameter in points.
pub const DEFAULT_BUTTON_SIZE: f64 = 56.0;

/// Default distance kept between the button and the window edges.
pub const DEFAULT_EDGE_MARGIN: f64 = 8.0;

/// Default button tint (R, G, B, A) - dark translucent.
pub const DEFAULT_TINT: (f64, f64, f64, f64) = (0.12, 0.12, 0.14, 0.85);

/// Vertical position of a freshly attached button, as a fraction of the
/// window height.
pub const INITIAL_VERTICAL_FRACTION: f64 = 0.33;

// === Environment Keys ===

/// Tracing filter directive (e.g. `debug`, `cookie_manager=trace`).
pub const ENV_LOG: &str = "COOKIE_MANAGER_LOG";

/// Forces the `debug` filter when set to a truthy value.
pub const ENV_DEBUG: &str = "COOKIE_MANAGER_DEBUG";

/// Key for the maximum number of attachment attempts.
pub const ENV_MAX_ATTEMPTS: &str = "COOKIE_MANAGER_MAX_ATTEMPTS";

/// Key for the initial retry delay in milliseconds.
pub const ENV_RETRY_DELAY_MS: &str = "COOKIE_MANAGER_RETRY_DELAY_MS";

/// Key for the retry backoff factor.
pub const ENV_RETRY_BACKOFF: &str = "COOKIE_MANAGER_RETRY_BACKOFF";

/// Key for the maximum retry delay in milliseconds.
pub const ENV_RETRY_MAX_DELAY_MS: &str = "COOKIE_MANAGER_RETRY_MAX_DELAY_MS";

/// Key for the button diameter.
pub const ENV_BUTTON_SIZE: &str = "COOKIE_MANAGER_BUTTON_SIZE";

/// Key for the edge margin.
pub const ENV_EDGE_MARGIN: &str = "COOKIE_MANAGER_EDGE_MARGIN";

/// Key for the snap-to-edge flag.
pub const ENV_SNAP_TO_EDGE: &str = "COOKIE_MANAGER_SNAP_TO_EDGE";

/// Key for the button tint (`#RRGGBB` or `#RRGGBBAA`).
pub const ENV_TINT: &str = "COOKIE_MANAGER_TINT";

// === Validation Limits ===

/// Minimum number of attachment attempts.
pub const MIN_ATTEMPTS: u32 = 1;

/// Maximum number of attachment attempts.
pub const MAX_ATTEMPTS: u32 = 50;

/// Minimum retry delay in milliseconds.
pub const MIN_RETRY_DELAY_MS: u64 = 16;

/// Maximum retry delay in milliseconds.
pub const MAX_RETRY_DELAY_MS: u64 = 30_000;

/// Minimum backoff factor (1.0 = fixed delay).
pub const MIN_BACKOFF_FACTOR: f64 = 1.0;

/// Maximum backoff factor.
pub const MAX_BACKOFF_FACTOR: f64 = 4.0;

/// Minimum button diameter in points.
pub const MIN_BUTTON_SIZE: f64 = 32.0;

/// Maximum button diameter in points.
pub const MAX_BUTTON_SIZE: f64 = 120.0;

/// Maximum edge margin in points.
pub const MAX_EDGE_MARGIN: f64 = 48.0;

// === Menu ===

/// Cookies listed in the "Show Cookies" message before truncating.
pub const MAX_LISTED_COOKIES: usize = 25;
