//! Identifier generation for assessments, users and plans.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of opaque identifiers.
///
/// Production code uses [`UuidIds`]; tests inject [`SequentialIds`] to get
/// stable, predictable values.
pub trait IdProvider: Send + Sync {
    /// Produce a new identifier carrying the given prefix, e.g. `user_...`.
    fn next_id(&self, prefix: &str) -> String;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdProvider for UuidIds {
    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}_{}", Uuid::new_v4().simple())
    }
}

/// Monotonic counter identifiers (`prefix_1`, `prefix_2`, ...).
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdProvider for SequentialIds {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}_{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_ids_are_prefixed_and_distinct() {
        let ids = UuidIds;
        let a = ids.next_id("user");
        let b = ids.next_id("user");
        assert!(a.starts_with("user_"));
        assert_eq!(a.len(), "user_".len() + 32);
        assert_ne!(a, b);
    }

    #[test]
    fn sequential_ids_count_across_prefixes() {
        let ids = SequentialIds::new();
        assert_eq!(ids.next_id("assessment"), "assessment_1");
        assert_eq!(ids.next_id("user"), "user_2");
        assert_eq!(ids.next_id("assessment"), "assessment_3");
    }
}
