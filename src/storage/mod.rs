//! Access to cookies and app-scoped storage.
//!
//! - [`accessor`]: the `StorageAccessor`, `CookieStore` and `DefaultsStore` seams
//! - [`sandbox`]: `SandboxStorage`, the filesystem implementation
//! - [`memory`]: `MemoryCookieStore`
//! - [`error`]: `StorageError`

pub mod accessor;
pub mod error;
pub mod memory;
pub mod sandbox;

pub use accessor::{Cleared, CookieStore, DefaultsStore, StorageAccessor, StorageArea};
pub use error::StorageError;
pub use memory::MemoryCookieStore;
pub use sandbox::{clear_directory, directory_size, SandboxDirs, SandboxStorage};
