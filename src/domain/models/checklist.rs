//! Checklist domain model.
//!
//! Checklists are named sets of line items attached to a task; their
//! completion gates the `complete` transition.

use serde::{Deserialize, Serialize};

pub type ChecklistId = i64;
pub type ChecklistItemId = i64;

/// One line item inside a checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: ChecklistItemId,
    pub text: String,
}

/// A named, ordered set of line items belonging to one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub id: ChecklistId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

impl Checklist {
    pub fn new(id: ChecklistId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, id: ChecklistItemId, text: impl Into<String>) -> Self {
        self.items.push(ChecklistItem { id, text: text.into() });
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Per-checklist completion counts. Derived from user interaction on the
/// client, never persisted; sent along with a completion request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistProgress {
    pub total: u32,
    pub completed: u32,
}

impl ChecklistProgress {
    pub fn new(total: u32, completed: u32) -> Self {
        Self { total, completed }
    }

    /// Fully done, with at least one item to have done.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed >= self.total
    }
}
