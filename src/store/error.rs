use std::fmt;

/// Error type for item store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The underlying lock primitive was poisoned during the named operation.
    LockPoisoned(&'static str),
    /// No item with this identifier exists in the collection.
    NotFound { collection: String, id: String },
    /// An item with this identifier already exists in the collection.
    AlreadyExists { collection: String, id: String },
    /// The stored form of the item does not expose the configured order attribute.
    UnknownAttribute {
        collection: String,
        attribute: String,
    },
    /// Serialization/deserialization error.
    Serde(String),
    /// Storage-level error.
    Storage(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
            StoreError::NotFound { collection, id } => {
                write!(f, "item not found: {}:{}", collection, id)
            }
            StoreError::AlreadyExists { collection, id } => {
                write!(f, "item already exists: {}:{}", collection, id)
            }
            StoreError::UnknownAttribute {
                collection,
                attribute,
            } => write!(
                f,
                "collection {} has no sortable attribute `{}`",
                collection, attribute
            ),
            StoreError::Serde(msg) => write!(f, "store serialization error: {}", msg),
            StoreError::Storage(msg) => write!(f, "storage error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}
