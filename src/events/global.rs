//! Process-wide publisher for platform callbacks.
//!
//! Objective-C callbacks (gesture targets, timer and alert blocks) have no
//! Rust context to carry a publisher, so the bootstrap installs the facade's
//! publisher here once. The facade itself never reads it.
//!
//! # Example
//!
//! ```ignore
//! // At bootstrap, after building the facade:
//! events::install_publisher(manager.publisher());
//!
//! // In a callback:
//! events::publish(OverlayEvent::Tapped);
//! ```

use std::sync::OnceLock;

use super::bus::EventPublisher;
use super::types::OverlayEvent;

static PUBLISHER: OnceLock<EventPublisher> = OnceLock::new();

/// Install the process-wide publisher. Only the first call wins; returns
/// whether this call installed it.
pub fn install_publisher(publisher: EventPublisher) -> bool {
    PUBLISHER.set(publisher).is_ok()
}

pub fn is_installed() -> bool {
    PUBLISHER.get().is_some()
}

/// Publish through the installed publisher. Returns false (and drops the
/// event) before bootstrap.
pub fn publish(event: OverlayEvent) -> bool {
    match PUBLISHER.get() {
        Some(publisher) => {
            publisher.publish(event);
            true
        }
        None => {
            tracing::debug!(?event, "event published before bootstrap, dropped");
            false
        }
    }
}
