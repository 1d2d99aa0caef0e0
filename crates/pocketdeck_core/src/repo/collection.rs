//! Generic ordered collection mirrored to one store key.
//!
//! # Invariants
//! - Each mutation rewrites the whole record; there is no batching.
//! - On a failed write the in-memory state keeps the mutation while storage
//!   keeps the previous value. The error is returned to the caller.

use crate::model::EntityId;
use crate::store::{JsonStore, KeyValueStore, StoreError};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    NotFound(EntityId),
    InvalidOrder(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidOrder(message) => write!(f, "invalid order: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::NotFound(_) | Self::InvalidOrder(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// A record that lives in an ordered collection under a fixed key.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Store key holding the serialized array.
    const STORE_KEY: &'static str;

    fn id(&self) -> EntityId;
}

/// Ordered, persisted list of records.
#[derive(Debug)]
pub struct Collection<T, S> {
    store: JsonStore<S>,
    items: Vec<T>,
}

impl<T: Record, S: KeyValueStore> Collection<T, S> {
    /// Loads the collection. A missing or corrupt record yields an empty
    /// list; single elements that fail to decode are skipped.
    pub fn load(store: S) -> RepoResult<Self> {
        let store = JsonStore::new(store);
        let items = store.get_list(T::STORE_KEY)?;
        debug!(
            "event=collection_load module=repo status=ok key={} count={}",
            T::STORE_KEY,
            items.len()
        );
        Ok(Self { store, items })
    }

    /// Replaces in-memory state with whatever the store holds now.
    pub fn reload(&mut self) -> RepoResult<()> {
        self.items = self.store.get_list(T::STORE_KEY)?;
        Ok(())
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Appends at the end of the current order.
    pub fn push(&mut self, item: T) -> RepoResult<()> {
        self.items.push(item);
        self.persist()
    }

    /// Mutates one record in place and persists.
    pub fn update<F, R>(&mut self, id: EntityId, mutate: F) -> RepoResult<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or(RepoError::NotFound(id))?;
        let result = mutate(item);
        self.persist()?;
        Ok(result)
    }

    /// Visits every record; persists once if any visit reported a change.
    ///
    /// Returns the number of changed records.
    pub fn update_each<F>(&mut self, mut visit: F) -> RepoResult<usize>
    where
        F: FnMut(&mut T) -> bool,
    {
        let mut changed = 0;
        for item in &mut self.items {
            if visit(item) {
                changed += 1;
            }
        }
        if changed > 0 {
            self.persist()?;
        }
        Ok(changed)
    }

    pub fn remove(&mut self, id: EntityId) -> RepoResult<T> {
        let index = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(RepoError::NotFound(id))?;
        let removed = self.items.remove(index);
        self.persist()?;
        Ok(removed)
    }

    /// Applies a new order reported by the front end.
    ///
    /// # Errors
    /// - `InvalidOrder` when `ids` contains unknown or duplicate ids, or
    ///   misses any current id. The current order is left untouched.
    pub fn reorder(&mut self, ids: &[EntityId]) -> RepoResult<()> {
        if let Err(err) = validate_permutation(&self.items, ids) {
            warn!(
                "event=collection_reorder module=repo status=error key={} error_code=invalid_order",
                T::STORE_KEY
            );
            return Err(err);
        }

        let mut by_id: HashMap<EntityId, T> = self
            .items
            .drain(..)
            .map(|item| (item.id(), item))
            .collect();
        self.items = ids.iter().filter_map(|id| by_id.remove(id)).collect();
        self.persist()
    }

    fn persist(&self) -> RepoResult<()> {
        self.store.set(T::STORE_KEY, &self.items)?;
        Ok(())
    }
}

fn validate_permutation<T: Record>(items: &[T], ids: &[EntityId]) -> RepoResult<()> {
    if ids.len() != items.len() {
        return Err(RepoError::InvalidOrder(format!(
            "expected {} ids, got {}",
            items.len(),
            ids.len()
        )));
    }

    let known: HashSet<EntityId> = items.iter().map(|item| item.id()).collect();
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !known.contains(id) {
            return Err(RepoError::InvalidOrder(format!("unknown id {id}")));
        }
        if !seen.insert(*id) {
            return Err(RepoError::InvalidOrder(format!("duplicate id {id}")));
        }
    }
    Ok(())
}
