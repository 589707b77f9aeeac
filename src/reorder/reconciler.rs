use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Permutation, ReorderError};
use crate::item::{self, Sortable};
use crate::scope::Scope;
use crate::store::{ItemStore, OrderUpdate, StoreError};

/// What a successful reorder committed. Handed to the post-reorder hook and
/// returned to the caller, e.g. for cache invalidation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderReport {
    pub collection: String,
    pub updates: Vec<OrderUpdate>,
}

/// Reconciles client-submitted permutations into persisted order values.
///
/// ## Example
///
/// ```ignore
/// let reconciler = Reconciler::new()
///     .with_scope(Scope::new(move |task: &Task| task.group_id == group))
///     .with_after_sort(|report| views.invalidate(&report.collection));
///
/// reconciler.reorder(&store, &permutation)?;
/// ```
pub struct Reconciler<M: Sortable> {
    scope: Option<Scope<M>>,
    after_sort: Option<Arc<dyn Fn(&ReorderReport) + Send + Sync>>,
}

impl<M: Sortable> Reconciler<M> {
    pub fn new() -> Self {
        Reconciler {
            scope: None,
            after_sort: None,
        }
    }

    /// Restrict the reconciler to one ordering scope. Permutations that
    /// reference items outside it are rejected before any write.
    pub fn with_scope(mut self, scope: Scope<M>) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Register a hook invoked with the commit report after every
    /// successful reorder. Never invoked on failure.
    pub fn with_after_sort<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ReorderReport) + Send + Sync + 'static,
    {
        self.after_sort = Some(Arc::new(hook));
        self
    }

    /// Apply a permutation: each slot's new occupant receives the order
    /// value its previous occupant held, so the stored values realize the
    /// new display order without renumbering the whole scope.
    ///
    /// When a slot's previous occupant is gone or was never ordered, the new
    /// occupant's key doubles as a raw order value (legacy behavior carried
    /// over from grid clients that submit positions as keys); a non-numeric
    /// key on that path is an error.
    ///
    /// All updates land in one atomic store batch. On any failure the
    /// operation aborts with every order value unchanged.
    pub fn reorder<S: ItemStore>(
        &self,
        store: &S,
        permutation: &Permutation,
    ) -> Result<ReorderReport, ReorderError> {
        let mut updates: Vec<OrderUpdate> = Vec::with_capacity(permutation.len());
        let mut attribute_checked = false;

        for (old_key, new_key) in permutation.iter() {
            let item: M =
                store
                    .get_item(new_key)?
                    .ok_or_else(|| ReorderError::ItemNotFound {
                        collection: M::COLLECTION.to_string(),
                        id: new_key.to_string(),
                    })?;

            if !attribute_checked {
                let present = item::has_order_attribute(&item)
                    .map_err(|e| ReorderError::Store(StoreError::Serde(e.to_string())))?;
                if !present {
                    return Err(ReorderError::UnknownSortableAttribute {
                        collection: M::COLLECTION.to_string(),
                        attribute: M::ORDER_ATTRIBUTE.to_string(),
                    });
                }
                attribute_checked = true;
            }

            if let Some(scope) = &self.scope {
                if !scope.matches(&item) {
                    return Err(ReorderError::OutOfScope {
                        collection: M::COLLECTION.to_string(),
                        id: new_key.to_string(),
                    });
                }
            }

            let assigned = match store.get_item::<M>(old_key)? {
                Some(prior) if prior.sort_order() != 0 => prior.sort_order(),
                _ => new_key
                    .parse::<i64>()
                    .map_err(|_| ReorderError::UnresolvedOrderValue {
                        collection: M::COLLECTION.to_string(),
                        key: new_key.to_string(),
                    })?,
            };

            updates.push(OrderUpdate {
                id: new_key.to_string(),
                order: assigned,
            });
        }

        store.update_orders::<M>(&updates)?;

        let report = ReorderReport {
            collection: M::COLLECTION.to_string(),
            updates,
        };
        if let Some(hook) = &self.after_sort {
            hook(&report);
        }
        Ok(report)
    }
}

impl<M: Sortable> Default for Reconciler<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryItemStore;

    #[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
    struct Row {
        id: String,
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

    fn seeded_store(rows: &[(&str, i64)]) -> InMemoryItemStore {
        let store = InMemoryItemStore::new();
        for (id, order) in rows {
            store
                .insert_item(&Row {
                    id: (*id).into(),
                    sort_order: *order,
                })
                .unwrap();
        }
        store
    }

    fn order_of(store: &InMemoryItemStore, id: &str) -> i64 {
        store.get_item::<Row>(id).unwrap().unwrap().sort_order
    }

    #[test]
    fn new_occupant_takes_the_old_occupants_order() {
        let store = seeded_store(&[("a", 1), ("b", 2), ("c", 3)]);

        // Display order after the drag: c, a, b
        let permutation =
            Permutation::from_sequences(&["a", "b", "c"], &["c", "a", "b"]).unwrap();
        Reconciler::<Row>::new().reorder(&store, &permutation).unwrap();

        assert_eq!(order_of(&store, "c"), 1);
        assert_eq!(order_of(&store, "a"), 2);
        assert_eq!(order_of(&store, "b"), 3);
    }

    #[test]
    fn identity_permutation_changes_nothing() {
        let store = seeded_store(&[("a", 10), ("b", 20)]);

        let permutation = Permutation::from_pairs([("a", "a"), ("b", "b")]);
        Reconciler::<Row>::new().reorder(&store, &permutation).unwrap();

        assert_eq!(order_of(&store, "a"), 10);
        assert_eq!(order_of(&store, "b"), 20);
    }

    #[test]
    fn unordered_old_occupant_falls_back_to_numeric_key() {
        // "a" was never ordered, so slot keys degrade to raw order values.
        let store = seeded_store(&[("a", 0), ("7", 5)]);

        let permutation = Permutation::from_pairs([("a", "7")]);
        Reconciler::<Row>::new().reorder(&store, &permutation).unwrap();

        assert_eq!(order_of(&store, "7"), 7);
    }

    #[test]
    fn fallback_with_non_numeric_key_fails_before_writing() {
        let store = seeded_store(&[("a", 0), ("b", 5)]);

        let permutation = Permutation::from_pairs([("a", "b")]);
        let err = Reconciler::<Row>::new()
            .reorder(&store, &permutation)
            .unwrap_err();

        assert!(matches!(err, ReorderError::UnresolvedOrderValue { .. }));
        assert_eq!(order_of(&store, "b"), 5);
    }

    #[test]
    fn empty_permutation_reports_success() {
        let store = seeded_store(&[("a", 1)]);
        let report = Reconciler::<Row>::new()
            .reorder(&store, &Permutation::default())
            .unwrap();
        assert!(report.updates.is_empty());
        assert_eq!(order_of(&store, "a"), 1);
    }
}
