//! ItemStore - abstract storage for sortable items.

use serde::{Deserialize, Serialize};

use super::StoreError;
use crate::item::Sortable;
use crate::scope::Scope;

/// One persisted order change: an item identifier and the value it receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub id: String,
    pub order: i64,
}

/// Abstract storage for sortable items.
pub trait ItemStore: Send + Sync {
    /// Get an item by ID. Returns None if not found.
    fn get_item<M: Sortable>(&self, id: &str) -> Result<Option<M>, StoreError>;

    /// Insert a new item. Fails if it already exists.
    fn insert_item<M: Sortable>(&self, item: &M) -> Result<(), StoreError>;

    /// Upsert an item (insert or replace).
    fn save_item<M: Sortable>(&self, item: &M) -> Result<(), StoreError>;

    /// Find items matching a predicate.
    fn find_items<M: Sortable>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<M>, StoreError>;

    /// Maximum order value among in-scope items, or None when the scope is empty.
    fn max_order<M: Sortable>(&self, scope: &Scope<M>) -> Result<Option<i64>, StoreError>;

    /// Apply a batch of order updates atomically: every update is validated
    /// against current state before any write, and a failure leaves every
    /// item untouched.
    fn update_orders<M: Sortable>(&self, updates: &[OrderUpdate]) -> Result<(), StoreError>;

    /// In-scope items in display order: ascending order value, ties broken
    /// by identifier.
    fn items_in_order<M: Sortable>(&self, scope: &Scope<M>) -> Result<Vec<M>, StoreError> {
        let mut items = self.find_items(&|item: &M| scope.matches(item))?;
        items.sort_by(|a, b| {
            a.sort_order()
                .cmp(&b.sort_order())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(items)
    }
}
