use sortable_rust::{ItemStore, OrderUpdate, Scope, Sortable, StoreError};

/// Store wrapper whose atomic batch always fails, for rollback tests.
pub struct FailingStore<S> {
    inner: S,
}

impl<S> FailingStore<S> {
    pub fn new(inner: S) -> Self {
        FailingStore { inner }
    }
}

impl<S: ItemStore> ItemStore for FailingStore<S> {
    fn get_item<M: Sortable>(&self, id: &str) -> Result<Option<M>, StoreError> {
        self.inner.get_item(id)
    }

    fn insert_item<M: Sortable>(&self, item: &M) -> Result<(), StoreError> {
        self.inner.insert_item(item)
    }

    fn save_item<M: Sortable>(&self, item: &M) -> Result<(), StoreError> {
        self.inner.save_item(item)
    }

    fn find_items<M: Sortable>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<M>, StoreError> {
        self.inner.find_items(predicate)
    }

    fn max_order<M: Sortable>(&self, scope: &Scope<M>) -> Result<Option<i64>, StoreError> {
        self.inner.max_order(scope)
    }

    fn update_orders<M: Sortable>(&self, _updates: &[OrderUpdate]) -> Result<(), StoreError> {
        Err(StoreError::Storage("transaction aborted".into()))
    }
}
