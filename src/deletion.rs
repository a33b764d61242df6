//! Coarse-grained deletion operations over a [`StorageAccessor`].
//!
//! Every call is synchronous and delegates straight to the accessor. Errors
//! never escape: they are logged and reported as a failed
//! [`DeletionResult`] (or an empty/zero answer for queries).

use tracing::{info, warn};

use crate::model::{CookieRecord, DeletionResult};
use crate::storage::{Cleared, StorageAccessor, StorageArea, StorageError};

pub struct DeletionService<A: StorageAccessor> {
    storage: A,
}

impl<A: StorageAccessor> DeletionService<A> {
    pub fn new(storage: A) -> Self {
        Self { storage }
    }

    pub fn delete_all_cookies(&mut self) -> DeletionResult {
        let outcome = self.storage.delete_all_cookies();
        cookie_result("delete all cookies", outcome)
    }

    pub fn delete_cookies_for_domain(&mut self, domain: &str) -> DeletionResult {
        let domain = domain.trim();
        if domain.is_empty() {
            warn!("refusing to delete cookies for an empty domain");
            return DeletionResult::failure();
        }
        let outcome = self.storage.delete_cookies_for_domain(domain);
        cookie_result("delete cookies for domain", outcome)
    }

    pub fn all_cookies(&self) -> Vec<CookieRecord> {
        self.storage.cookies().unwrap_or_else(|err| {
            warn!(error = %err, "listing cookies failed");
            Vec::new()
        })
    }

    pub fn cookie_count(&self) -> usize {
        self.all_cookies().len()
    }

    /// Caches, documents and preferences. Succeeds only if all three did;
    /// otherwise nothing is reported as affected.
    pub fn delete_all_app_data(&mut self) -> DeletionResult {
        let parts: Vec<DeletionResult> = StorageArea::ALL
            .into_iter()
            .map(|area| self.clear(area))
            .collect();
        let total = parts
            .iter()
            .fold(DeletionResult::success_with_bytes(0, 0), |acc, r| acc + *r);
        if !total.succeeded {
            let removed: usize = parts.iter().map(|r| r.items_affected).sum();
            warn!(removed, "app data only partially deleted");
        }
        total
    }

    pub fn delete_app_caches(&mut self) -> DeletionResult {
        self.clear(StorageArea::Caches)
    }

    pub fn delete_app_documents(&mut self) -> DeletionResult {
        self.clear(StorageArea::Documents)
    }

    pub fn delete_app_preferences(&mut self) -> DeletionResult {
        self.clear(StorageArea::Preferences)
    }

    /// Total bytes across the app-scoped areas. Unreadable areas count as 0.
    pub fn app_data_size(&self) -> u64 {
        StorageArea::ALL
            .into_iter()
            .map(|area| {
                self.storage.area_size(area).unwrap_or_else(|err| {
                    warn!(%area, error = %err, "measuring app data failed");
                    0
                })
            })
            .sum()
    }

    pub fn storage(&self) -> &A {
        &self.storage
    }

    fn clear(&mut self, area: StorageArea) -> DeletionResult {
        match self.storage.clear_area(area) {
            Ok(Cleared { items, bytes }) => {
                info!(%area, items, bytes, "app data deleted");
                DeletionResult::success_with_bytes(items, bytes)
            }
            Err(err) => {
                warn!(%area, error = %err, "app data deletion failed");
                DeletionResult::failure()
            }
        }
    }
}

fn cookie_result(op: &'static str, outcome: Result<usize, StorageError>) -> DeletionResult {
    match outcome {
        Ok(count) => {
            info!(op, count, "cookies deleted");
            DeletionResult::success(count)
        }
        Err(err) => {
            warn!(op, error = %err, "cookie deletion failed");
            DeletionResult::failure()
        }
    }
}
