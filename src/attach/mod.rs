//! Attaching the overlay to a host window.
//!
//! - [`state`]: the pure state machine (`AttachMachine`) and retry bookkeeping
//! - [`engine`]: `AttachmentEngine`, which runs the machine's effects against
//!   a `HostUi` and a `RetryScheduler`

pub mod engine;
pub mod state;

pub use engine::AttachmentEngine;
pub use state::{
    AttachEvent, AttachMachine, AttachState, AttachStatus, Effect, RetryPolicy, RetryState,
    RetryToken,
};
