//! List domain model.

use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a shopping list.
pub type ListId = i64;

/// A named container for items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Assigned on creation; immutable afterwards.
    pub id: ListId,
    /// Stored verbatim, empty names included.
    pub name: String,
}
