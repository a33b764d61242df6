//! The storage seams: cookie store, user defaults, and the combined
//! [`StorageAccessor`] the deletion service talks to.

use std::fmt;

use super::error::StorageError;
use crate::model::CookieRecord;

/// App-scoped storage areas inside the sandbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageArea {
    Caches,
    Documents,
    Preferences,
}

impl StorageArea {
    pub const ALL: [StorageArea; 3] = [
        StorageArea::Caches,
        StorageArea::Documents,
        StorageArea::Preferences,
    ];
}

impl fmt::Display for StorageArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StorageArea::Caches => "caches",
            StorageArea::Documents => "documents",
            StorageArea::Preferences => "preferences",
        })
    }
}

/// What clearing an area removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cleared {
    /// Files removed (directories are not counted).
    pub items: usize,
    /// Bytes those files occupied, measured before removal.
    pub bytes: u64,
}

/// The host's HTTP cookie store.
pub trait CookieStore {
    fn cookies(&self) -> Result<Vec<CookieRecord>, StorageError>;

    fn delete(&mut self, cookie: &CookieRecord) -> Result<(), StorageError>;

    /// Delete everything. Returns how many cookies were removed.
    fn delete_all(&mut self) -> Result<usize, StorageError> {
        let cookies = self.cookies()?;
        for cookie in &cookies {
            self.delete(cookie)?;
        }
        Ok(cookies.len())
    }

    /// Delete the cookies of `domain` and its subdomains.
    fn delete_domain(&mut self, domain: &str) -> Result<usize, StorageError> {
        let matching: Vec<_> = self
            .cookies()?
            .into_iter()
            .filter(|c| c.matches_domain(domain))
            .collect();
        for cookie in &matching {
            self.delete(cookie)?;
        }
        Ok(matching.len())
    }
}

/// In-memory preferences that would survive deleting the files on disk.
pub trait DefaultsStore {
    fn reset(&mut self) -> Result<(), StorageError>;
}

/// No defaults layer (plain filesystem sandboxes).
impl DefaultsStore for () {
    fn reset(&mut self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Request/response access to cookies and app-scoped storage. Stateless.
pub trait StorageAccessor {
    fn cookies(&self) -> Result<Vec<CookieRecord>, StorageError>;

    fn delete_all_cookies(&mut self) -> Result<usize, StorageError>;

    fn delete_cookies_for_domain(&mut self, domain: &str) -> Result<usize, StorageError>;

    /// Remove the contents of `area`, keeping the directory itself.
    fn clear_area(&mut self, area: StorageArea) -> Result<Cleared, StorageError>;

    fn area_size(&self, area: StorageArea) -> Result<u64, StorageError>;
}
