//! Key-value persistence for append-only logs.
//!
//! Every log is stored as one JSON array under a fixed key. Logs are loaded
//! once and rewritten in full whenever they change. A log whose read fails
//! is never loaded, so it cannot be overwritten.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::SerenityError;

/// Durable string storage addressed by key.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, SerenityError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), SerenityError>;
}

/// Volatile store, used by tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with one value.
    #[cfg(test)]
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.to_string());
        Self { values }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SerenityError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SerenityError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// An append-only log persisted under a single key.
#[derive(Debug, Clone)]
pub struct PersistedLog<T> {
    key: &'static str,
    entries: Vec<T>,
}

impl<T: Serialize + DeserializeOwned> PersistedLog<T> {
    /// Load the log stored under `key`.
    ///
    /// A missing or malformed payload yields an empty log.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read. An unreadable log must
    /// never be appended to.
    pub fn load(store: &dyn KeyValueStore, key: &'static str) -> Result<Self, SerenityError> {
        let raw = store
            .get(key)
            .map_err(|e| SerenityError::Storage(format!("Failed to load {key}: {e}")))?;

        let entries = match raw {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(key, error = %e, "discarding malformed log payload");
                Vec::new()
            }),
            None => Vec::new(),
        };

        Ok(Self { key, entries })
    }

    /// Append an entry and rewrite the whole log.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be serialized or written. The entry
    /// stays in memory either way.
    pub fn append(&mut self, store: &mut dyn KeyValueStore, entry: T) -> Result<(), SerenityError> {
        self.entries.push(entry);
        let payload = serde_json::to_string(&self.entries)?;
        store
            .set(self.key, &payload)
            .map_err(|e| SerenityError::Storage(format!("Failed to persist {}: {e}", self.key)))
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[T] {
        &self.entries
    }
}
