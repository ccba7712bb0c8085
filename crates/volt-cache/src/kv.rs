//! Typed cache over a byte store.

use serde::{de::DeserializeOwned, Serialize};

use crate::store::{KeyValueStore, MemoryStore};
use crate::CacheError;

/// Type-safe cache with automatic JSON serialization.
///
/// Wraps any [`KeyValueStore`] backend and serializes values as JSON. Any
/// type implementing `Serialize` and `DeserializeOwned` can be stored.
pub struct Cache {
    store: Box<dyn KeyValueStore>,
}

impl Cache {
    /// Create a cache over an explicit backend.
    pub fn with_store(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Create a cache over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::with_store(Box::new(MemoryStore::new()))
    }

    /// Open a cache over the default Spin Key-Value store.
    #[cfg(target_arch = "wasm32")]
    pub fn open_default() -> Result<Self, CacheError> {
        Ok(Self::with_store(Box::new(
            crate::store::SpinStore::open_default()?,
        )))
    }

    /// Open a cache over a named Spin Key-Value store.
    #[cfg(target_arch = "wasm32")]
    pub fn open(name: &str) -> Result<Self, CacheError> {
        Ok(Self::with_store(Box::new(crate::store::SpinStore::open(
            name,
        )?)))
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }
}
