use std::fmt;

use crate::store::StoreError;

/// Error type for reorder operations.
///
/// Every variant aborts the whole operation before any order value is
/// written; there is no partial reordering to observe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderError {
    /// The item type's serialized form does not expose the configured order
    /// attribute. A configuration error, caught before any write.
    UnknownSortableAttribute {
        collection: String,
        attribute: String,
    },
    /// A key in the permutation does not resolve to an existing item.
    ItemNotFound { collection: String, id: String },
    /// A resolved item does not belong to the configured scope.
    OutOfScope { collection: String, id: String },
    /// The legacy fallback needed the key as a raw order value, but it is
    /// not numeric.
    UnresolvedOrderValue { collection: String, key: String },
    /// `from_sequences` was given sequences of different lengths.
    MismatchedSequences { before: usize, after: usize },
    /// The store failed while applying the batch; propagated verbatim.
    Store(StoreError),
}

impl fmt::Display for ReorderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReorderError::UnknownSortableAttribute {
                collection,
                attribute,
            } => write!(
                f,
                "collection {} has no sortable attribute `{}`",
                collection, attribute
            ),
            ReorderError::ItemNotFound { collection, id } => {
                write!(f, "item not found: {}:{}", collection, id)
            }
            ReorderError::OutOfScope { collection, id } => {
                write!(f, "item {}:{} is outside the ordering scope", collection, id)
            }
            ReorderError::UnresolvedOrderValue { collection, key } => write!(
                f,
                "no order value resolvable for {}:{} (key is not numeric)",
                collection, key
            ),
            ReorderError::MismatchedSequences { before, after } => write!(
                f,
                "permutation sequences differ in length ({} before, {} after)",
                before, after
            ),
            ReorderError::Store(err) => write!(f, "store failure during reorder: {}", err),
        }
    }
}

impl std::error::Error for ReorderError {}

impl From<StoreError> for ReorderError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnknownAttribute {
                collection,
                attribute,
            } => ReorderError::UnknownSortableAttribute {
                collection,
                attribute,
            },
            StoreError::NotFound { collection, id } => {
                ReorderError::ItemNotFound { collection, id }
            }
            other => ReorderError::Store(other),
        }
    }
}
