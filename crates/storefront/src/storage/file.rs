//! File-backed storage backend.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError, check_key};

/// A durable key-value store mapping each key to one file in a directory.
///
/// The directory plays the role of a browser profile: state written here
/// survives across application runs. Writes go through a temp file and
/// rename so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// The directory holding this store's files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        check_key(key)?;
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!("{key}.tmp"));
        let io_err = |source| StorageError::Io {
            key: key.to_owned(),
            source,
        };

        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).expect("open store");
        (dir, store)
    }

    #[test]
    fn test_set_get_remove() {
        let (_dir, store) = temp_store();

        assert_eq!(store.get("k").expect("read"), None);
        store.set("k", "hello").expect("write");
        assert_eq!(store.get("k").expect("read"), Some("hello".to_owned()));

        store.set("k", "world").expect("write");
        assert_eq!(store.get("k").expect("read"), Some("world".to_owned()));

        store.remove("k").expect("remove");
        assert_eq!(store.get("k").expect("read"), None);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let (_dir, store) = temp_store();
        store.remove("never-set").expect("remove");
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let store = FileStore::open(dir.path()).expect("open store");
            store.set("session", "{\"id\":1}").expect("write");
        }
        let store = FileStore::open(dir.path()).expect("reopen store");
        assert_eq!(
            store.get("session").expect("read"),
            Some("{\"id\":1}".to_owned())
        );
    }

    #[test]
    fn test_path_like_key_rejected() {
        let (_dir, store) = temp_store();
        assert!(store.set("../escape", "x").is_err());
    }
}
