//! Durable key-value storage - the browser localStorage stand-in.
//!
//! Local storage is an external collaborator: a durable blob store with
//! synchronous `get`/`set`/`remove` over string values. The
//! [`KeyValueStore`] trait is that seam. Two backends are provided:
//!
//! - [`MemoryStore`] - ephemeral, for tests and `--ephemeral` runs
//! - [`FileStore`] - one file per key under a data directory (the "browser
//!   profile")
//!
//! JSON codec helpers live beside the trait so stores persist typed values
//! without owning serialization concerns. [`get_json`] is deliberately
//! fail-open: a malformed blob is logged and decoded as absent, so corrupted
//! state degrades to "empty" instead of an error the user can never fix.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Well-known storage keys.
pub mod keys {
    /// Key for the registered-accounts array.
    pub const USERS: &str = "shophub-users";

    /// Key for the active session projection.
    pub const SESSION: &str = "shophub-user";
}

/// Errors that can occur in a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Key is not usable as a storage location.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Underlying I/O failed.
    #[error("storage I/O error for key {key:?}: {source}")]
    Io {
        /// Key being accessed.
        key: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Value could not be serialized.
    #[error("failed to encode value for key {0:?}: {1}")]
    Encode(String, #[source] serde_json::Error),
}

/// A durable string key-value store.
///
/// All operations are synchronous; callers briefly block on writes, the
/// same model browser localStorage exposes. Implementations use interior
/// mutability so stores can be shared immutably.
pub trait KeyValueStore {
    /// Get the value for `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the backend fails to read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Set `key` to `value`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the backend fails to write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the backend fails to delete.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Read and decode a JSON value.
///
/// Returns `Ok(None)` both when the key is absent and when the stored blob
/// is malformed. Corruption is logged at WARN and otherwise treated as
/// absence - the fail-open policy for persisted state.
///
/// # Errors
///
/// Returns a `StorageError` only if the backend read itself fails.
pub fn get_json<S, T>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(error) => {
            tracing::warn!(key, %error, "discarding malformed persisted value");
            Ok(None)
        }
    }
}

/// Encode a value as JSON and store it.
///
/// # Errors
///
/// Returns a `StorageError` if encoding or the backend write fails.
pub fn set_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let raw = serde_json::to_string(value)
        .map_err(|e| StorageError::Encode(key.to_owned(), e))?;
    store.set(key, &raw)
}

/// Validate that a key is usable as a flat storage location.
fn check_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() || key.contains(['/', '\\', '\0']) || key == "." || key == ".." {
        return Err(StorageError::InvalidKey(key.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_key_rejects_path_like_keys() {
        assert!(check_key("shophub-users").is_ok());
        assert!(check_key("").is_err());
        assert!(check_key("..").is_err());
        assert!(check_key("a/b").is_err());
        assert!(check_key("a\\b").is_err());
    }

    #[test]
    fn test_get_json_absent_key() {
        let store = MemoryStore::new();
        let value: Option<Vec<String>> = get_json(&store, "missing").expect("read");
        assert!(value.is_none());
    }

    #[test]
    fn test_get_json_roundtrip() {
        let store = MemoryStore::new();
        set_json(&store, "list", &vec![1, 2, 3]).expect("write");
        let value: Option<Vec<i32>> = get_json(&store, "list").expect("read");
        assert_eq!(value, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_get_json_malformed_decodes_as_absent() {
        let store = MemoryStore::new();
        store.set("bad", "{not json").expect("write");
        let value: Option<Vec<i32>> = get_json(&store, "bad").expect("read");
        assert!(value.is_none());
        // The raw blob is untouched; only the decode fails open.
        assert_eq!(store.get("bad").expect("read"), Some("{not json".to_owned()));
    }
}
