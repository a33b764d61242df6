//! Cookie records as seen by the overlay (read-only).

use std::fmt;

use time::OffsetDateTime;

/// A cookie from the host's store. Never mutated, only listed or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieRecord {
    pub domain: String,
    pub name: String,
    pub path: String,
    /// `None` for session cookies.
    pub expires: Option<OffsetDateTime>,
}

impl CookieRecord {
    pub fn new(domain: impl Into<String>, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            name: name.into(),
            path: path.into(),
            expires: None,
        }
    }

    pub fn with_expiry(mut self, expires: OffsetDateTime) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn is_session(&self) -> bool {
        self.expires.is_none()
    }

    /// Whether this cookie belongs to `domain` or one of its subdomains.
    ///
    /// Comparison is case-insensitive and ignores the leading dot that
    /// domain cookies carry.
    pub fn matches_domain(&self, domain: &str) -> bool {
        let wanted = normalize_domain(domain);
        if wanted.is_empty() {
            return false;
        }
        let own = normalize_domain(&self.domain);
        own == wanted
            || own
                .strip_suffix(wanted.as_str())
                .is_some_and(|head| head.ends_with('.'))
    }
}

impl fmt::Display for CookieRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}", self.name, self.domain, self.path)
    }
}

pub(crate) fn normalize_domain(domain: &str) -> String {
    domain.trim().trim_start_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_domain_matches() {
        let c = CookieRecord::new("example.com", "sid", "/");
        assert!(c.matches_domain("example.com"));
        assert!(c.matches_domain("EXAMPLE.com"));
    }

    #[test]
    fn test_leading_dot_is_ignored() {
        let c = CookieRecord::new(".example.com", "sid", "/");
        assert!(c.matches_domain("example.com"));
        assert!(c.matches_domain(".example.com"));
    }

    #[test]
    fn test_subdomain_matches_parent() {
        let c = CookieRecord::new("www.example.com", "sid", "/");
        assert!(c.matches_domain("example.com"));
        assert!(!CookieRecord::new("example.com", "sid", "/").matches_domain("www.example.com"));
    }

    #[test]
    fn test_suffix_without_dot_does_not_match() {
        let c = CookieRecord::new("notexample.com", "sid", "/");
        assert!(!c.matches_domain("example.com"));
    }

    #[test]
    fn test_empty_domain_matches_nothing() {
        let c = CookieRecord::new("example.com", "sid", "/");
        assert!(!c.matches_domain(""));
        assert!(!c.matches_domain("  "));
    }

    #[test]
    fn test_display() {
        let c = CookieRecord::new(".example.com", "sid", "/app");
        assert_eq!(c.to_string(), "sid .example.com/app");
        assert!(c.is_session());
    }
}
