//! Application domain model.
//!
//! Pure data (no FFI dependencies): configuration, geometry, cookie records
//! and deletion results.
//!
//! Platform-specific storage is in `platform::ios`.

pub mod config;
pub mod constants;
pub mod cookie;
pub mod geometry;
pub mod result;

pub use config::OverlayConfig;
pub use cookie::CookieRecord;
pub use geometry::{Point, Rect, Size};
pub use result::{format_bytes, DeletionResult};
