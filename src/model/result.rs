//! Deletion results (per operation, never persisted).

use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionResult {
    pub succeeded: bool,
    pub items_affected: usize,
    pub reclaimed_bytes: Option<u64>,
}

impl DeletionResult {
    pub fn success(items_affected: usize) -> Self {
        Self {
            succeeded: true,
            items_affected,
            reclaimed_bytes: None,
        }
    }

    pub fn success_with_bytes(items_affected: usize, reclaimed_bytes: u64) -> Self {
        Self {
            succeeded: true,
            items_affected,
            reclaimed_bytes: Some(reclaimed_bytes),
        }
    }

    /// A rejected operation: nothing counted as affected.
    pub fn failure() -> Self {
        Self {
            succeeded: false,
            items_affected: 0,
            reclaimed_bytes: None,
        }
    }
}

/// Aggregation used by "delete all app data": counts and bytes are summed,
/// and any failed part makes the whole a [`DeletionResult::failure`].
impl Add for DeletionResult {
    type Output = DeletionResult;

    fn add(self, rhs: DeletionResult) -> DeletionResult {
        if !(self.succeeded && rhs.succeeded) {
            return DeletionResult::failure();
        }
        let bytes = match (self.reclaimed_bytes, rhs.reclaimed_bytes) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(0) + b.unwrap_or(0)),
        };
        DeletionResult {
            succeeded: true,
            items_affected: self.items_affected + rhs.items_affected,
            reclaimed_bytes: bytes,
        }
    }
}

/// Human readable byte count (`512 B`, `1.5 KB`, `12.0 MB`).
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_has_no_items() {
        let r = DeletionResult::failure();
        assert!(!r.succeeded);
        assert_eq!(r.items_affected, 0);
        assert_eq!(r.reclaimed_bytes, None);
    }

    #[test]
    fn test_add_aggregates() {
        let total = DeletionResult::success_with_bytes(3, 100)
            + DeletionResult::success(2)
            + DeletionResult::success_with_bytes(1, 50);
        assert!(total.succeeded);
        assert_eq!(total.items_affected, 6);
        assert_eq!(total.reclaimed_bytes, Some(150));
    }

    #[test]
    fn test_add_propagates_failure() {
        let total = DeletionResult::success_with_bytes(4, 64) + DeletionResult::failure();
        assert_eq!(total, DeletionResult::failure());
        assert_eq!(DeletionResult::failure() + DeletionResult::success(2), DeletionResult::failure());
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
    }
}
