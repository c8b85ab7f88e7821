//! In-memory store, used for tests and ephemeral sessions.

use std::cell::RefCell;
use std::collections::HashMap;

use super::{KeyValueStore, StoreKey};
use crate::error::StoreError;

/// Store kept in a map for the lifetime of the value.
///
/// An optional byte capacity makes writes fail the way a full browser-style
/// storage quota would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<StoreKey, String>>,
    capacity: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects writes once the total stored bytes would exceed `bytes`.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            values: RefCell::new(HashMap::new()),
            capacity: Some(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }

    fn used_without(&self, key: StoreKey) -> usize {
        self.values
            .borrow()
            .iter()
            .filter(|(k, _)| **k != key)
            .map(|(_, v)| v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn read_raw(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        Ok(self.values.borrow().get(&key).cloned())
    }

    fn write_raw(&self, key: StoreKey, json: &str) -> Result<(), StoreError> {
        if let Some(capacity) = self.capacity {
            if self.used_without(key) + json.len() > capacity {
                return Err(StoreError::QuotaExceeded { key });
            }
        }
        self.values.borrow_mut().insert(key, json.to_string());
        Ok(())
    }

    fn delete_raw(&self, key: StoreKey) -> Result<(), StoreError> {
        self.values.borrow_mut().remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let store = MemoryStore::new();
        store.try_set(StoreKey::EatenMeals, &vec!["lunch"]).unwrap();

        let eaten: Vec<String> = store.try_get(StoreKey::EatenMeals).unwrap().unwrap();
        assert_eq!(eaten, vec!["lunch".to_string()]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_capacity_rejects_large_writes() {
        let store = MemoryStore::with_capacity(10);
        store.try_set(StoreKey::Theme, "dark").unwrap();

        let err = store
            .try_set(StoreKey::Products, "far too long for the quota")
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::QuotaExceeded {
                key: StoreKey::Products
            }
        ));
    }

    #[test]
    fn test_capacity_allows_overwriting_same_key() {
        let store = MemoryStore::with_capacity(8);
        store.try_set(StoreKey::Theme, "dark").unwrap();
        store.try_set(StoreKey::Theme, "light").unwrap();
        assert_eq!(store.get(StoreKey::Theme, String::new()), "light");
    }

    #[test]
    fn test_delete_absent_key_is_ok() {
        let store = MemoryStore::new();
        assert!(store.delete_raw(StoreKey::Products).is_ok());
        assert!(store.is_empty());
    }
}
