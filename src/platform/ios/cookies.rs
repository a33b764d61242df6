//! Foundation-backed stores: `NSHTTPCookieStorage` and `NSUserDefaults`.

use time::OffsetDateTime;
use tracing::debug;

use super::ffi::bridge::{array_items, get_class, id, msg_send, nil, string_from_ns};
use crate::model::CookieRecord;
use crate::storage::{CookieStore, DefaultsStore, StorageError};

/// The process-wide shared HTTP cookie storage.
#[derive(Debug, Default)]
pub struct SystemCookieStore;

impl SystemCookieStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Result<id, StorageError> {
        let cls = get_class("NSHTTPCookieStorage")
            .ok_or_else(|| StorageError::CookieStore("NSHTTPCookieStorage missing".into()))?;
        let storage: id = unsafe { msg_send![cls, sharedHTTPCookieStorage] };
        if storage.is_null() {
            return Err(StorageError::CookieStore("no shared cookie storage".into()));
        }
        Ok(storage)
    }

    /// Native cookies paired with their records.
    fn native_cookies(&self) -> Result<(id, Vec<(id, CookieRecord)>), StorageError> {
        let storage = self.storage()?;
        let cookies = unsafe {
            let array: id = msg_send![storage, cookies];
            array_items(array)
                .into_iter()
                .filter_map(|cookie| record_from_native(cookie).map(|r| (cookie, r)))
                .collect()
        };
        Ok((storage, cookies))
    }

    fn delete_where<F>(&mut self, keep: F) -> Result<usize, StorageError>
    where
        F: Fn(&CookieRecord) -> bool,
    {
        let (storage, cookies) = self.native_cookies()?;
        let mut removed = 0;
        for (cookie, record) in cookies {
            if keep(&record) {
                continue;
            }
            unsafe {
                let _: () = msg_send![storage, deleteCookie: cookie];
            }
            removed += 1;
        }
        Ok(removed)
    }
}

impl CookieStore for SystemCookieStore {
    fn cookies(&self) -> Result<Vec<CookieRecord>, StorageError> {
        Ok(self.native_cookies()?.1.into_iter().map(|(_, r)| r).collect())
    }

    fn delete(&mut self, cookie: &CookieRecord) -> Result<(), StorageError> {
        let removed = self.delete_where(|r| {
            !(r.domain == cookie.domain && r.name == cookie.name && r.path == cookie.path)
        })?;
        if removed == 0 {
            debug!(cookie = %cookie, "cookie already gone");
        }
        Ok(())
    }

    fn delete_all(&mut self) -> Result<usize, StorageError> {
        self.delete_where(|_| false)
    }

    fn delete_domain(&mut self, domain: &str) -> Result<usize, StorageError> {
        self.delete_where(|r| !r.matches_domain(domain))
    }
}

unsafe fn record_from_native(cookie: id) -> Option<CookieRecord> {
    if cookie.is_null() {
        return None;
    }
    let domain = string_from_ns(msg_send![cookie, domain])?;
    let name = string_from_ns(msg_send![cookie, name]).unwrap_or_default();
    let path = string_from_ns(msg_send![cookie, path]).unwrap_or_else(|| "/".into());
    let mut record = CookieRecord::new(domain, name, path);

    let expires: id = msg_send![cookie, expiresDate];
    if expires != nil {
        let secs: f64 = msg_send![expires, timeIntervalSince1970];
        if let Ok(at) = OffsetDateTime::from_unix_timestamp(secs as i64) {
            record = record.with_expiry(at);
        }
    }
    Some(record)
}

/// `NSUserDefaults` for the app's own bundle identifier.
#[derive(Debug, Default)]
pub struct StandardDefaults;

impl StandardDefaults {
    pub fn new() -> Self {
        Self
    }
}

impl DefaultsStore for StandardDefaults {
    fn reset(&mut self) -> Result<(), StorageError> {
        let (Some(defaults_cls), Some(bundle_cls)) =
            (get_class("NSUserDefaults"), get_class("NSBundle"))
        else {
            return Err(StorageError::Defaults("Foundation classes missing".into()));
        };
        unsafe {
            let bundle: id = msg_send![bundle_cls, mainBundle];
            let identifier: id = if bundle.is_null() {
                nil
            } else {
                msg_send![bundle, bundleIdentifier]
            };
            if identifier.is_null() {
                return Err(StorageError::Defaults("no bundle identifier".into()));
            }
            let defaults: id = msg_send![defaults_cls, standardUserDefaults];
            if defaults.is_null() {
                return Err(StorageError::Defaults("no standard defaults".into()));
            }
            let _: () = msg_send![defaults, removePersistentDomainForName: identifier];
            let _: objc2::runtime::Bool = msg_send![defaults, synchronize];
            debug!(
                bundle = string_from_ns(identifier).unwrap_or_default(),
                "user defaults reset"
            );
        }
        Ok(())
    }
}
