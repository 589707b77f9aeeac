//! Scopes - stateless predicates partitioning items into ordering groups.
//!
//! Relative order is maintained independently within each scope (e.g. rows
//! grouped by a foreign key). The same scope narrows both the max-order
//! computation at insertion time and the interpretation of a permutation.

use std::sync::Arc;

use crate::item::Sortable;

/// A stateless filter narrowing a collection to one ordering scope.
///
/// Cheap to clone; the predicate is shared behind an `Arc`.
///
/// ## Example
///
/// ```ignore
/// let group = "inbox".to_string();
/// let scope = Scope::new(move |task: &Task| task.group_id == group);
/// ```
pub struct Scope<M> {
    filter: Arc<dyn Fn(&M) -> bool + Send + Sync>,
}

impl<M: Sortable> Scope<M> {
    /// Create a scope from a predicate.
    pub fn new<F>(filter: F) -> Self
    where
        F: Fn(&M) -> bool + Send + Sync + 'static,
    {
        Scope {
            filter: Arc::new(filter),
        }
    }

    /// The scope containing every item of the collection.
    pub fn all() -> Self {
        Scope {
            filter: Arc::new(|_: &M| true),
        }
    }

    /// Whether the item belongs to this scope.
    pub fn matches(&self, item: &M) -> bool {
        (self.filter)(item)
    }
}

impl<M> Clone for Scope<M> {
    fn clone(&self) -> Self {
        Scope {
            filter: self.filter.clone(),
        }
    }
}

impl<M: Sortable> Default for Scope<M> {
    fn default() -> Self {
        Self::all()
    }
}
