use serde::{Deserialize, Serialize};
use sortable_rust::Sortable;

/// Grid row used across the integration tests: one ordering scope per group.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Sortable)]
#[sortable(collection = "tasks")]
pub struct Task {
    pub id: String,
    pub group_id: String,
    pub title: String,
    pub sort_order: i64,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        group_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Task {
            id: id.into(),
            group_id: group_id.into(),
            title: title.into(),
            sort_order: 0,
        }
    }
}
