//! Insertion - append new items to the end of their scope.
//!
//! A new item's order value is `max + 1` over its scope, computed as of
//! insertion time, so created items always sort last and values grow
//! monotonically until a reorder reshuffles them.

mod policy;

use std::fmt;

use crate::lock::LockError;
use crate::store::StoreError;

pub use policy::InsertionPolicy;

/// Error type for insertion operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    /// The item type's serialized form does not expose the configured order
    /// attribute. Caught before any store access.
    UnknownSortableAttribute {
        collection: String,
        attribute: String,
    },
    /// The store failed; propagated verbatim.
    Store(StoreError),
    /// The scope lock failed; propagated verbatim.
    Lock(LockError),
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::UnknownSortableAttribute {
                collection,
                attribute,
            } => write!(
                f,
                "collection {} has no sortable attribute `{}`",
                collection, attribute
            ),
            InsertError::Store(err) => write!(f, "store failure during insert: {}", err),
            InsertError::Lock(err) => write!(f, "scope lock failure during insert: {}", err),
        }
    }
}

impl std::error::Error for InsertError {}

impl From<StoreError> for InsertError {
    fn from(err: StoreError) -> Self {
        InsertError::Store(err)
    }
}

impl From<LockError> for InsertError {
    fn from(err: LockError) -> Self {
        InsertError::Lock(err)
    }
}
