//! Event system between platform callbacks and the facade.
//!
//! Host callbacks never touch overlay state directly. They publish an
//! [`OverlayEvent`]; the facade drains the queue on the UI thread.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐
//! │ Retry timer │  │  Gestures   │  │ Alert menu  │  │ Window/scene│
//! │  (NSTimer)  │  │ (tap / pan) │  │  handlers   │  │ notifications│
//! └──────┬──────┘  └──────┬──────┘  └──────┬──────┘  └──────┬──────┘
//!        │ publish()      │                │                │
//!        ▼                ▼                ▼                ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       EventBus (mpsc)                           │
//! └───────────────────────────────┬─────────────────────────────────┘
//!                                 │ try_recv() in drain_events()
//!                                 ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │            CookieManager::dispatch (UI thread)                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Structure
//!
//! - [`types`]: Event definitions (`OverlayEvent` enum)
//! - [`bus`]: `EventBus` and `EventPublisher` types
//! - [`global`]: the publisher installed for platform callbacks

pub mod bus;
pub mod global;
pub mod types;

pub use bus::{EventBus, EventPublisher};
pub use global::{install_publisher, publish};
pub use types::OverlayEvent;
