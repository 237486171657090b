//! Item domain model.
//!
//! # Invariants
//! - `list_id` referenced an existing list when the item was created or moved.
//! - `checked` starts as `false`.

use super::list::ListId;
use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a shopping list item.
pub type ItemId = i64;

/// A single entry belonging to exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Assigned on creation; survives moves between lists.
    pub id: ItemId,
    /// Owning list.
    pub list_id: ListId,
    pub name: String,
    /// Free-form grouping label. Empty when unset.
    pub category: String,
    pub checked: bool,
}
