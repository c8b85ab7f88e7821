//! Key/value persistence for application state.
//!
//! Values are JSON documents stored under a fixed set of [`StoreKey`]s. The
//! `get`/`set`/`remove` methods never fail: errors are logged and the caller gets
//! the default value (reads) or nothing happens (writes). The `try_*` methods
//! expose the underlying errors.
//!
//! There is no transaction across keys, so readers must accept any subset of keys
//! being absent or stale.

mod file;
mod key;
mod memory;

pub use file::FileStore;
pub use key::StoreKey;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

pub trait KeyValueStore {
    /// Raw JSON text stored under `key`, or `None` if absent.
    fn read_raw(&self, key: StoreKey) -> Result<Option<String>, StoreError>;

    fn write_raw(&self, key: StoreKey, json: &str) -> Result<(), StoreError>;

    /// Removing an absent key is not an error.
    fn delete_raw(&self, key: StoreKey) -> Result<(), StoreError>;

    fn try_get<T: DeserializeOwned>(&self, key: StoreKey) -> Result<Option<T>, StoreError> {
        match self.read_raw(key)? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|source| StoreError::Deserialize { key, source }),
            None => Ok(None),
        }
    }

    fn try_set<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> Result<(), StoreError> {
        let json =
            serde_json::to_string(value).map_err(|source| StoreError::Serialize { key, source })?;
        self.write_raw(key, &json)
    }

    /// Value under `key`, or `default` when it is absent or unreadable.
    fn get<T: DeserializeOwned>(&self, key: StoreKey, default: T) -> T {
        match self.try_get(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                tracing::warn!("Error reading '{}' from store: {}", key, e);
                default
            }
        }
    }

    /// Like [`KeyValueStore::get`] with `None` as the default.
    fn get_opt<T: DeserializeOwned>(&self, key: StoreKey) -> Option<T> {
        self.get(key, None)
    }

    fn set<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) {
        if let Err(e) = self.try_set(key, value) {
            tracing::warn!("Error writing '{}' to store: {}", key, e);
        }
    }

    fn remove(&self, key: StoreKey) {
        if let Err(e) = self.delete_raw(key) {
            tracing::warn!("Error removing '{}' from store: {}", key, e);
        }
    }

    fn clear(&self) {
        for key in StoreKey::ALL {
            self.remove(key);
        }
    }
}
