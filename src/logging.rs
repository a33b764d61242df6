//! Tracing setup for the injected library.

use tracing_subscriber::EnvFilter;

use crate::model::config::is_truthy;
use crate::model::constants::{ENV_DEBUG, ENV_LOG};

/// Filter from `COOKIE_MANAGER_DEBUG` / `COOKIE_MANAGER_LOG`, `info` otherwise.
pub fn env_filter() -> EnvFilter {
    let debug_enabled = std::env::var(ENV_DEBUG)
        .map(|value| is_truthy(&value))
        .unwrap_or(false);
    if debug_enabled {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Install a stderr subscriber unless the host already has one.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .try_init();
}
