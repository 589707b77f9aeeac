//! InMemoryItemStore - HashMap-backed item store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{ItemStore, OrderUpdate, StoreError};
use crate::item::Sortable;
use crate::scope::Scope;

/// In-memory item store backed by a HashMap.
///
/// Storage key is `"COLLECTION:id"`, values are the serde_json form of the
/// item. Clone-friendly via Arc; clones share storage. `update_orders` is
/// atomic because validation and writes happen under one write lock.
#[derive(Clone)]
pub struct InMemoryItemStore {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl Default for InMemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryItemStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn make_key(collection: &str, id: &str) -> String {
        format!("{}:{}", collection, id)
    }

    fn collection_prefix(collection: &str) -> String {
        format!("{}:", collection)
    }
}

impl ItemStore for InMemoryItemStore {
    fn get_item<M: Sortable>(&self, id: &str) -> Result<Option<M>, StoreError> {
        let key = Self::make_key(M::COLLECTION, id);
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;

        match storage.get(&key) {
            Some(bytes) => {
                let item: M = serde_json::from_slice(bytes)
                    .map_err(|e| StoreError::Serde(e.to_string()))?;
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    fn insert_item<M: Sortable>(&self, item: &M) -> Result<(), StoreError> {
        let key = Self::make_key(M::COLLECTION, item.id());
        let bytes = serde_json::to_vec(item).map_err(|e| StoreError::Serde(e.to_string()))?;

        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        if storage.contains_key(&key) {
            return Err(StoreError::AlreadyExists {
                collection: M::COLLECTION.to_string(),
                id: item.id().to_string(),
            });
        }

        storage.insert(key, bytes);
        Ok(())
    }

    fn save_item<M: Sortable>(&self, item: &M) -> Result<(), StoreError> {
        let key = Self::make_key(M::COLLECTION, item.id());
        let bytes = serde_json::to_vec(item).map_err(|e| StoreError::Serde(e.to_string()))?;

        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        storage.insert(key, bytes);
        Ok(())
    }

    fn find_items<M: Sortable>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<M>, StoreError> {
        let prefix = Self::collection_prefix(M::COLLECTION);
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;

        let mut items = Vec::new();
        for (key, bytes) in storage.iter() {
            if !key.starts_with(&prefix) {
                continue;
            }
            let item: M =
                serde_json::from_slice(bytes).map_err(|e| StoreError::Serde(e.to_string()))?;
            if predicate(&item) {
                items.push(item);
            }
        }
        Ok(items)
    }

    fn max_order<M: Sortable>(&self, scope: &Scope<M>) -> Result<Option<i64>, StoreError> {
        let prefix = Self::collection_prefix(M::COLLECTION);
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;

        let mut max: Option<i64> = None;
        for (key, bytes) in storage.iter() {
            if !key.starts_with(&prefix) {
                continue;
            }
            let item: M =
                serde_json::from_slice(bytes).map_err(|e| StoreError::Serde(e.to_string()))?;
            if !scope.matches(&item) {
                continue;
            }
            max = Some(match max {
                Some(current) => current.max(item.sort_order()),
                None => item.sort_order(),
            });
        }
        Ok(max)
    }

    fn update_orders<M: Sortable>(&self, updates: &[OrderUpdate]) -> Result<(), StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        // Validate every update and serialize the patched form before
        // touching stored state; any failure aborts with nothing written.
        let mut patched = Vec::with_capacity(updates.len());
        for update in updates {
            let key = Self::make_key(M::COLLECTION, &update.id);
            let bytes = storage.get(&key).ok_or_else(|| StoreError::NotFound {
                collection: M::COLLECTION.to_string(),
                id: update.id.clone(),
            })?;

            let mut value: serde_json::Value =
                serde_json::from_slice(bytes).map_err(|e| StoreError::Serde(e.to_string()))?;
            let object = value.as_object_mut().ok_or_else(|| {
                StoreError::Storage(format!("stored item {} is not an object", key))
            })?;

            if !object.contains_key(M::ORDER_ATTRIBUTE) {
                return Err(StoreError::UnknownAttribute {
                    collection: M::COLLECTION.to_string(),
                    attribute: M::ORDER_ATTRIBUTE.to_string(),
                });
            }
            object.insert(
                M::ORDER_ATTRIBUTE.to_string(),
                serde_json::Value::from(update.order),
            );

            let bytes =
                serde_json::to_vec(&value).map_err(|e| StoreError::Serde(e.to_string()))?;
            patched.push((key, bytes));
        }

        for (key, bytes) in patched {
            storage.insert(key, bytes);
        }
        Ok(())
    }
}
