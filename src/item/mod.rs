//! Sortable items - the contract between ordered items and this library.
//!
//! An item lives in exactly one ordering scope at a time and carries a
//! numeric order attribute whose ascending sort determines display order.
//! Order values are only compared relatively; nothing requires them to be
//! contiguous or unique. `0` means "not yet ordered" and is never assigned
//! by the insertion policy.
//!
//! ## Example
//!
//! ```ignore
//! use serde::{Deserialize, Serialize};
//! use sortable_rust::Sortable;
//!
//! #[derive(Serialize, Deserialize, Clone, Sortable)]
//! #[sortable(collection = "tasks")]
//! struct Task {
//!     id: String,
//!     group_id: String,
//!     title: String,
//!     sort_order: i64,
//! }
//! ```

use serde::{de::DeserializeOwned, Serialize};

/// Trait for items whose display order this library maintains.
pub trait Sortable: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this item type (e.g., "tasks", "gallery_images").
    /// Maps to a table in SQL, a collection in MongoDB, a key prefix in KV stores, etc.
    const COLLECTION: &'static str;

    /// The name of the order attribute as it appears in the item's serialized
    /// form. Reorder and insertion both verify the attribute exists before
    /// writing anything.
    const ORDER_ATTRIBUTE: &'static str = "sort_order";

    /// Returns the stable identifier for this item.
    fn id(&self) -> &str;

    /// Current order value. `0` means unset.
    fn sort_order(&self) -> i64;

    /// Replace the order value.
    fn set_sort_order(&mut self, order: i64);
}

/// Checks that `ORDER_ATTRIBUTE` is a key of the item's serialized form.
///
/// The typed accessors alone cannot catch a trait implementation whose
/// attribute name does not match the serialized field (e.g. a serde rename),
/// and stores patch the serialized form by that name.
pub(crate) fn has_order_attribute<M: Sortable>(item: &M) -> Result<bool, serde_json::Error> {
    let value = serde_json::to_value(item)?;
    Ok(value
        .as_object()
        .map(|object| object.contains_key(M::ORDER_ATTRIBUTE))
        .unwrap_or(false))
}
