//! In-progress note edits
//!
//! The edit buffer holds drafts that have not been saved yet.
//! An entry exists only while the matching item is being edited;
//! saving or deleting the item removes it.

use std::collections::HashMap;

use super::data::ItemId;

/// Draft text per item id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditBuffer {
    drafts: HashMap<ItemId, String>,
}

impl EditBuffer {
    /// Start (or restart) a draft from the given text
    pub fn seed(&mut self, id: ItemId, text: &str) {
        self.drafts.insert(id, text.to_string());
    }

    /// Replace the draft for an item
    pub fn set(&mut self, id: ItemId, text: String) {
        self.drafts.insert(id, text);
    }

    pub fn get(&self, id: ItemId) -> Option<&str> {
        self.drafts.get(&id).map(String::as_str)
    }

    /// Remove and return the draft for an item
    pub fn take(&mut self, id: ItemId) -> Option<String> {
        self.drafts.remove(&id)
    }
}
