//! Persistent store adapter.
//!
//! # Responsibility
//! - Map fixed string keys to JSON documents in local device storage.
//! - Recover from absent or corrupt payloads by handing back the caller's
//!   default.
//!
//! # Invariants
//! - `get` never surfaces a parse failure; the stored payload is left as is
//!   until the next `set` overwrites it.
//! - `get_list` drops only the elements that fail to decode, never the
//!   whole array.
//! - `set` is synchronous and write failures reach the caller.
//! - There is no transaction spanning two keys.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod sqlite;

pub use sqlite::SqliteKvStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer failure. Parse errors on read never show up here.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "store write failed: {err}"),
            Self::Encode { key, source } => write!(f, "cannot encode record `{key}`: {source}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Encode { source, .. } => Some(source),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Raw string storage keyed by name.
pub trait KeyValueStore {
    fn get_raw(&self, key: &str) -> StoreResult<Option<String>>;
    fn set_raw(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_raw(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_raw(key, value)
    }
}

/// JSON adapter over any `KeyValueStore`.
#[derive(Debug, Clone)]
pub struct JsonStore<S> {
    inner: S,
}

impl<S: KeyValueStore> JsonStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Reads `key`, or returns `default` when the record is absent, `null`,
    /// or does not decode as `T`.
    ///
    /// # Errors
    /// - Only when the underlying storage cannot be read at all.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> StoreResult<T> {
        let Some(raw) = self.inner.get_raw(key)? else {
            debug!("event=store_get module=store status=miss key={key}");
            return Ok(default);
        };

        match serde_json::from_str::<Option<T>>(&raw) {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Ok(default),
            Err(err) => {
                warn!(
                    "event=store_get module=store status=recovered key={key} reason=malformed_payload line={} column={}",
                    err.line(),
                    err.column()
                );
                Ok(default)
            }
        }
    }

    /// Reads an array under `key`, keeping every element that decodes as
    /// `T`. Elements that do not decode are skipped; a payload that is not an
    /// array at all yields an empty list.
    ///
    /// # Errors
    /// - Only when the underlying storage cannot be read at all.
    pub fn get_list<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Vec<T>> {
        let raw: Vec<serde_json::Value> = self.get(key, Vec::new())?;
        let total = raw.len();
        let items: Vec<T> = raw
            .into_iter()
            .filter_map(|value| serde_json::from_value(value).ok())
            .collect();
        if items.len() < total {
            warn!(
                "event=store_get module=store status=recovered key={key} reason=malformed_element skipped={}",
                total - items.len()
            );
        }
        Ok(items)
    }

    /// Serializes `value` and writes it under `key` immediately.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let encoded = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.inner.set_raw(key, &encoded)?;
        debug!(
            "event=store_set module=store status=ok key={key} bytes={}",
            encoded.len()
        );
        Ok(())
    }
}
