//! In-memory storage backend.

use std::cell::RefCell;
use std::collections::HashMap;

use super::{KeyValueStore, StorageError, check_key};

/// An ephemeral in-memory key-value store.
///
/// Backs tests and `--ephemeral` runs where nothing should outlive the
/// process. Interior mutability via `RefCell` is sufficient because the
/// application is single-threaded by design.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        check_key(key)?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        check_key(key)?;
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        check_key(key)?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").expect("read"), None);

        store.set("k", "v1").expect("write");
        assert_eq!(store.get("k").expect("read"), Some("v1".to_owned()));

        // Last write wins.
        store.set("k", "v2").expect("write");
        assert_eq!(store.get("k").expect("read"), Some("v2".to_owned()));

        store.remove("k").expect("remove");
        assert_eq!(store.get("k").expect("read"), None);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let store = MemoryStore::new();
        store.remove("never-set").expect("remove");
        assert!(store.is_empty());
    }
}
