use std::sync::Arc;

use super::InsertError;
use crate::item::{self, Sortable};
use crate::lock::LockManager;
use crate::scope::Scope;
use crate::store::{ItemStore, StoreError};

struct ScopeLock {
    manager: Arc<dyn LockManager>,
    key: String,
}

/// Assigns order values to items entering a scope.
///
/// ## Example
///
/// ```ignore
/// let policy = InsertionPolicy::new()
///     .with_scope(Scope::new(move |task: &Task| task.group_id == group));
///
/// let mut task = Task::new("write the report");
/// policy.insert(&store, &mut task)?;
/// ```
pub struct InsertionPolicy<M: Sortable> {
    scope: Option<Scope<M>>,
    lock: Option<ScopeLock>,
}

impl<M: Sortable> InsertionPolicy<M> {
    pub fn new() -> Self {
        InsertionPolicy {
            scope: None,
            lock: None,
        }
    }

    /// Restrict the max-order computation to one ordering scope.
    pub fn with_scope(mut self, scope: Scope<M>) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Serialize insertions through the lock registered under `key`, closing
    /// the window where two concurrent insertions read the same max order.
    /// Only `insert` gets the full guarantee: `assign_initial_order` releases
    /// the lock before the caller persists.
    pub fn with_scope_lock(mut self, manager: Arc<dyn LockManager>, key: impl Into<String>) -> Self {
        self.lock = Some(ScopeLock {
            manager,
            key: key.into(),
        });
        self
    }

    /// Set the item's order value to `max + 1` over its scope, treating an
    /// empty scope as max `0`. Returns the assigned value. The caller
    /// persists the item afterwards.
    pub fn assign_initial_order<S: ItemStore>(
        &self,
        store: &S,
        item: &mut M,
    ) -> Result<i64, InsertError> {
        self.ensure_attribute(item)?;
        self.with_lock_held(|| {
            let next = self.next_order(store)?;
            item.set_sort_order(next);
            Ok(next)
        })
    }

    /// Assign the order value and persist the item in one step. With a scope
    /// lock configured, both happen while holding it, so concurrent inserts
    /// into the scope receive distinct consecutive values.
    pub fn insert<S: ItemStore>(&self, store: &S, item: &mut M) -> Result<i64, InsertError> {
        self.ensure_attribute(item)?;
        self.with_lock_held(|| {
            let next = self.next_order(store)?;
            item.set_sort_order(next);
            store.insert_item(item)?;
            Ok(next)
        })
    }

    fn ensure_attribute(&self, item: &M) -> Result<(), InsertError> {
        let present = item::has_order_attribute(item)
            .map_err(|e| InsertError::Store(StoreError::Serde(e.to_string())))?;
        if present {
            Ok(())
        } else {
            Err(InsertError::UnknownSortableAttribute {
                collection: M::COLLECTION.to_string(),
                attribute: M::ORDER_ATTRIBUTE.to_string(),
            })
        }
    }

    fn next_order<S: ItemStore>(&self, store: &S) -> Result<i64, InsertError> {
        let scope = match &self.scope {
            Some(scope) => scope.clone(),
            None => Scope::all(),
        };
        let max = store.max_order::<M>(&scope)?.unwrap_or(0);
        Ok(max + 1)
    }

    fn with_lock_held<T>(
        &self,
        f: impl FnOnce() -> Result<T, InsertError>,
    ) -> Result<T, InsertError> {
        let lock = match &self.lock {
            Some(config) => {
                let lock = config.manager.scope_lock(&config.key)?;
                lock.lock()?;
                Some(lock)
            }
            None => None,
        };

        let outcome = f();

        match lock {
            Some(lock) => match (lock.unlock(), outcome) {
                (_, Err(err)) => Err(err),
                (Err(unlock_err), Ok(_)) => Err(InsertError::Lock(unlock_err)),
                (Ok(()), ok) => ok,
            },
            None => outcome,
        }
    }
}

impl<M: Sortable> Default for InsertionPolicy<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryItemStore;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Clone)]
    struct Row {
        id: String,
        group: String,
        sort_order: i64,
    }

    impl Sortable for Row {
        const COLLECTION: &'static str = "rows";

        fn id(&self) -> &str {
            &self.id
        }

        fn sort_order(&self) -> i64 {
            self.sort_order
        }

        fn set_sort_order(&mut self, order: i64) {
            self.sort_order = order;
        }
    }

    fn row(id: &str, group: &str) -> Row {
        Row {
            id: id.into(),
            group: group.into(),
            sort_order: 0,
        }
    }

    #[test]
    fn empty_scope_starts_at_one() {
        let store = InMemoryItemStore::new();
        let policy = InsertionPolicy::new();

        let mut first = row("x", "a");
        assert_eq!(policy.insert(&store, &mut first).unwrap(), 1);

        let mut second = row("y", "a");
        assert_eq!(policy.insert(&store, &mut second).unwrap(), 2);
    }

    #[test]
    fn assign_without_persisting() {
        let store = InMemoryItemStore::new();
        let policy = InsertionPolicy::new();

        let mut item = row("x", "a");
        assert_eq!(policy.assign_initial_order(&store, &mut item).unwrap(), 1);
        assert_eq!(item.sort_order, 1);
        assert!(store.get_item::<Row>("x").unwrap().is_none());
    }

    #[test]
    fn scope_isolates_max_computation() {
        let store = InMemoryItemStore::new();
        store
            .insert_item(&Row {
                id: "other".into(),
                group: "b".into(),
                sort_order: 40,
            })
            .unwrap();

        let policy = InsertionPolicy::new().with_scope(Scope::new(|r: &Row| r.group == "a"));
        let mut item = row("x", "a");
        assert_eq!(policy.insert(&store, &mut item).unwrap(), 1);
    }

    #[test]
    fn gaps_in_order_values_are_preserved() {
        let store = InMemoryItemStore::new();
        store
            .insert_item(&Row {
                id: "a".into(),
                group: "a".into(),
                sort_order: 7,
            })
            .unwrap();

        let policy = InsertionPolicy::new();
        let mut item = row("x", "a");
        assert_eq!(policy.insert(&store, &mut item).unwrap(), 8);
    }

    #[derive(Serialize, Deserialize, Clone)]
    struct Renamed {
        id: String,
        #[serde(rename = "position")]
        sort_order: i64,
    }

    impl Sortable for Renamed {
        const COLLECTION: &'static str = "renamed";

        fn id(&self) -> &str {
            &self.id
        }

        fn sort_order(&self) -> i64 {
            self.sort_order
        }

        fn set_sort_order(&mut self, order: i64) {
            self.sort_order = order;
        }
    }

    #[test]
    fn missing_attribute_fails_before_store_access() {
        let store = InMemoryItemStore::new();
        let policy = InsertionPolicy::new();

        let mut item = Renamed {
            id: "x".into(),
            sort_order: 0,
        };
        let err = policy.insert(&store, &mut item).unwrap_err();
        assert!(matches!(err, InsertError::UnknownSortableAttribute { .. }));
        assert!(store.get_item::<Renamed>("x").unwrap().is_none());
    }
}
