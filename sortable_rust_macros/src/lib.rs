mod sortable;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Sortable)]
// ============================================================================

/// Derive the `Sortable` trait for a struct with named fields.
///
/// # Usage
///
/// ```ignore
/// #[derive(Serialize, Deserialize, Clone, Sortable)]
/// #[sortable(collection = "tasks")]
/// struct Task {
///     id: String,
///     title: String,
///     sort_order: i64,
/// }
/// ```
///
/// Attributes:
/// - `#[sortable(collection = "...")]` on the struct overrides the collection
///   name (default: snake_case struct name + "s").
/// - `#[sortable(id)]` marks the identifier field (default: the field named `id`).
/// - `#[sortable(order)]` marks the order field, which must be `i64`
///   (default: the field named `sort_order`).
/// - `#[sortable(attribute = "...")]` on the struct overrides the serialized
///   attribute name (default: the order field's identifier).
#[proc_macro_derive(Sortable, attributes(sortable))]
pub fn derive_sortable(input: TokenStream) -> TokenStream {
    sortable::derive_sortable(input)
}
