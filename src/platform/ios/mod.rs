//! iOS implementation using UIKit/Foundation via objc2.
//!
//! - `ffi`: objc2 aliases and small runtime helpers
//! - `host`: [`HostUi`](crate::host::HostUi) over UIKit windows and views
//! - `gestures`, `menu`: recognizer target and alert-based menus
//! - `scheduler`: run-loop timers for attachment retries
//! - `cookies`: NSHTTPCookieStorage and NSUserDefaults stores
//! - `observers`: window/scene notifications
//! - `bootstrap`: the owning root and the C entry points

pub mod bootstrap;
pub mod cookies;
pub mod ffi;
pub mod gestures;
pub mod host;
pub mod menu;
pub mod observers;
pub mod probe;
pub mod scheduler;

pub use bootstrap::{initCookieManager, initCookieManagerSilent};
pub use ffi::bridge;
pub use host::UiKitHost;
pub use scheduler::RunLoopScheduler;
