#![allow(unexpected_cfgs)] // Silence cfg warnings from objc macros

//! Floating cookie and app-data manager injected into a host app.
//!
//! Everything outside `platform` is pure Rust with no FFI so it runs as
//! normal unit and integration tests on any OS. The iOS glue (UIKit host,
//! run-loop timers, NSHTTPCookieStorage, C entry points) lives in
//! `platform::ios`.

pub mod attach;
pub mod capabilities;
pub mod deletion;
pub mod events;
pub mod host;
pub mod logging;
pub mod manager;
pub mod model;
pub mod overlay;
pub mod platform;
pub mod storage;

pub use attach::{AttachStatus, AttachmentEngine, RetryPolicy, RetryToken};
pub use deletion::DeletionService;
pub use events::{EventBus, EventPublisher, OverlayEvent};
pub use host::{HostError, HostUi, RetryScheduler, WindowCandidate};
pub use manager::{CookieManager, StartMode};
pub use model::{CookieRecord, DeletionResult, OverlayConfig};
pub use overlay::{OverlayController, OverlayError, OverlayVisualState, ShowStatus};
pub use storage::{StorageAccessor, StorageError};

/// Clamp a value to [lo, hi]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

/// Parse `#RRGGBB` or `#RRGGBBAA` into normalised floats [0..1].
pub fn parse_hex_color(s: &str) -> Option<(f64, f64, f64, f64)> {
    let t = s.trim();
    let t = t.strip_prefix('#').unwrap_or(t);
    let hex = t.chars().filter(|c| !c.is_whitespace()).collect::<String>();
    if !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let (r, g, b, a) = match hex.len() {
        6 => (channel(0)?, channel(2)?, channel(4)?, 255u8),
        8 => (channel(0)?, channel(2)?, channel(4)?, channel(6)?),
        _ => return None,
    };
    Some((
        r as f64 / 255.0,
        g as f64 / 255.0,
        b as f64 / 255.0,
        a as f64 / 255.0,
    ))
}
