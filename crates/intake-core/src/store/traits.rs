//! Store Layer - Core Traits

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backing storage cannot be reached (private mode, quota, no window)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Stored value does not parse
    #[error("Corrupt value under '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Write failed: {0}")]
    Write(String),
}

/// String key-value capability (browser local storage, or in-memory for tests).
///
/// Methods take `&self`: backends own their interior mutability.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Reads and parses a JSON value; a missing key yields `None`
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StoreError::Corrupt {
                    key: key.to_string(),
                    reason: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()>
    where
        Self: Sized,
    {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::Write(e.to_string()))?;
        self.set(key, &raw)
    }
}

impl<S: KeyValueStore> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
