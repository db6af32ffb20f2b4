//! Item Entity
//!
//! One todo entry: a title, an optional longer description and a
//! completion flag.

use serde::{Deserialize, Serialize};

use super::item_id::ItemId;

/// A todo item
///
/// Serialized field order and names are the persisted record layout:
/// `{"id", "text", "description", "completed"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier, fixed at creation
    pub id: ItemId,
    /// Title
    pub text: String,
    /// Longer notes, may be empty
    #[serde(default)]
    pub description: String,
    /// Completion status
    #[serde(default)]
    pub completed: bool,
}

impl Item {
    /// Create a new, not yet completed item
    pub fn new(id: ItemId, text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            description: description.into(),
            completed: false,
        }
    }

    /// Same item with `completed` flipped
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }

    /// Whether the title has any non-whitespace content
    pub fn has_title(&self) -> bool {
        !self.text.trim().is_empty()
    }
}
