//! Search filter store.
//!
//! Holds the single mutable query string. Matching against product titles
//! is the consuming view's job - this store only carries the value, so the
//! navbar and the listing can share it without knowing about each other.

/// The current search query.
#[derive(Debug, Default)]
pub struct SearchFilter {
    query: String,
}

impl SearchFilter {
    /// Create an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the query unconditionally.
    pub fn set(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Reset the query to empty.
    pub fn clear(&mut self) {
        self.query.clear();
    }

    /// The current query string.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether a non-empty query is set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let filter = SearchFilter::new();
        assert_eq!(filter.query(), "");
        assert!(!filter.is_active());
    }

    #[test]
    fn test_set_replaces_unconditionally() {
        let mut filter = SearchFilter::new();
        filter.set("jacket");
        assert_eq!(filter.query(), "jacket");
        filter.set("ring");
        assert_eq!(filter.query(), "ring");
        assert!(filter.is_active());
    }

    #[test]
    fn test_clear_resets_to_empty() {
        let mut filter = SearchFilter::new();
        filter.set("jacket");
        filter.clear();
        assert_eq!(filter.query(), "");
        assert!(!filter.is_active());
    }
}
