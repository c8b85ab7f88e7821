//! File-backed store: one JSON document per key in a data directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StoreKey};
use crate::error::StoreError;

#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the full path for a key.
    pub fn path(&self, key: StoreKey) -> PathBuf {
        self.data_dir.join(key.filename())
    }

    pub fn exists(&self, key: StoreKey) -> bool {
        self.path(key).exists()
    }
}

impl KeyValueStore for FileStore {
    fn read_raw(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Creates the data directory if it doesn't exist.
    fn write_raw(&self, key: StoreKey, json: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir).map_err(|source| StoreError::Io {
            path: self.data_dir.clone(),
            source,
        })?;

        let path = self.path(key);
        fs::write(&path, json).map_err(|source| StoreError::Io { path, source })
    }

    fn delete_raw(&self, key: StoreKey) -> Result<(), StoreError> {
        let path = self.path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    #[test]
    fn test_store_path() {
        let (store, _temp) = test_store();
        assert!(store.path(StoreKey::Products).ends_with("products.json"));
    }

    #[test]
    fn test_read_nonexistent_returns_none() {
        let (store, _temp) = test_store();
        assert!(store.read_raw(StoreKey::Products).unwrap().is_none());
        assert!(!store.exists(StoreKey::Products));
    }

    #[test]
    fn test_write_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("data");
        let store = FileStore::new(nested.clone());

        store.set(StoreKey::OnboardingCompleted, &true);

        assert!(nested.exists());
        assert!(store.exists(StoreKey::OnboardingCompleted));
        assert!(store.get(StoreKey::OnboardingCompleted, false));
    }

    #[test]
    fn test_overwrite_existing_value() {
        let (store, _temp) = test_store();
        store.set(StoreKey::Theme, "dark");
        store.set(StoreKey::Theme, "light");

        let theme: String = store.get(StoreKey::Theme, String::new());
        assert_eq!(theme, "light");
    }

    #[test]
    fn test_remove_deletes_file() {
        let (store, _temp) = test_store();
        store.set(StoreKey::EatenMeals, &vec!["lunch"]);
        store.remove(StoreKey::EatenMeals);

        assert!(!store.exists(StoreKey::EatenMeals));
        store.remove(StoreKey::EatenMeals);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_default() {
        let (store, _temp) = test_store();
        fs::write(store.path(StoreKey::Products), "[{").unwrap();

        let products: Vec<String> = store.get(StoreKey::Products, Vec::new());
        assert!(products.is_empty());
    }

    #[test]
    fn test_unwritable_dir_does_not_panic() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();
        let store = FileStore::new(blocker.join("data"));

        store.set(StoreKey::Theme, "dark");
        assert!(store.try_set(StoreKey::Theme, "dark").is_err());
        assert_eq!(store.get(StoreKey::Theme, "light".to_string()), "light");
    }
}
