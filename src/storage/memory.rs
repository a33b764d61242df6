//! In-memory cookie store, used off-device and in tests.

use super::accessor::CookieStore;
use super::error::StorageError;
use crate::model::CookieRecord;

#[derive(Debug, Default, Clone)]
pub struct MemoryCookieStore {
    cookies: Vec<CookieRecord>,
    /// When set, every call fails with this message.
    reject: Option<String>,
}

impl MemoryCookieStore {
    pub fn new(cookies: Vec<CookieRecord>) -> Self {
        Self {
            cookies,
            reject: None,
        }
    }

    /// A store that refuses every request.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            cookies: Vec::new(),
            reject: Some(reason.into()),
        }
    }

    pub fn insert(&mut self, cookie: CookieRecord) {
        self.cookies.push(cookie);
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    fn check(&self) -> Result<(), StorageError> {
        match &self.reject {
            Some(reason) => Err(StorageError::CookieStore(reason.clone())),
            None => Ok(()),
        }
    }
}

impl CookieStore for MemoryCookieStore {
    fn cookies(&self) -> Result<Vec<CookieRecord>, StorageError> {
        self.check()?;
        Ok(self.cookies.clone())
    }

    fn delete(&mut self, cookie: &CookieRecord) -> Result<(), StorageError> {
        self.check()?;
        self.cookies.retain(|c| c != cookie);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryCookieStore {
        MemoryCookieStore::new(vec![
            CookieRecord::new(".example.com", "a", "/"),
            CookieRecord::new("www.example.com", "b", "/"),
            CookieRecord::new("other.com", "c", "/"),
        ])
    }

    #[test]
    fn test_delete_domain_default_impl() {
        let mut s = store();
        assert_eq!(s.delete_domain("example.com").unwrap(), 2);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_delete_all_default_impl() {
        let mut s = store();
        assert_eq!(s.delete_all().unwrap(), 3);
        assert!(s.is_empty());
    }

    #[test]
    fn test_rejecting_store() {
        let mut s = MemoryCookieStore::rejecting("denied");
        assert!(s.cookies().is_err());
        assert!(s.delete_all().is_err());
    }
}
