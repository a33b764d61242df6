//! Platform-specific implementations.
//!
//! Only iOS is supported as a host. The submodule implements:
//! - `HostUi` over UIKit windows, views, recognizers and alerts
//! - `RetryScheduler` over run-loop timers
//! - `CookieStore` / `DefaultsStore` over Foundation
//! - The C entry points used to bootstrap the library

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(target_os = "ios")]
pub use ios::*;
