use tracing::debug;

use super::data::{EditState, FocusedItem, ItemId, MediaItem};
use super::edit::EditBuffer;
use crate::media::ImageHandle;

/// The gallery store.
///
/// Holds the ordered items, the drafts of notes being edited, and the
/// snapshot shown in the overlay. Every operation consumes the current
/// state and returns the next one; the UI keeps exactly one value and
/// replaces it after each message.
///
/// Operations referring to an id that is not in the gallery are no-ops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryState {
    items: Vec<MediaItem>,
    drafts: EditBuffer,
    focused: Option<FocusedItem>,
}

impl GalleryState {
    /// Create an empty gallery
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Queries ==========

    /// All items in insertion order
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&MediaItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Draft text for an item being edited
    pub fn draft(&self, id: ItemId) -> Option<&str> {
        self.drafts.get(id)
    }

    /// Snapshot currently shown in the overlay
    pub fn focused(&self) -> Option<&FocusedItem> {
        self.focused.as_ref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items currently in the `Editing` state
    pub fn editing_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_editing()).count()
    }

    fn item_mut(&mut self, id: ItemId) -> Option<&mut MediaItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    // ========== Operations ==========

    /// Append a new item with empty notes at the end of the gallery
    #[must_use]
    pub fn add_item(mut self, image: ImageHandle) -> Self {
        let item = MediaItem::new(image);
        debug!(id = %item.id, "added item");
        self.items.push(item);
        self
    }

    /// Remove an item and any draft it left behind
    #[must_use]
    pub fn delete_item(mut self, id: ItemId) -> Self {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.drafts.take(id);

        if self.items.len() != before {
            debug!(%id, "deleted item");
        }
        self
    }

    /// Switch an item to editing, starting the draft from its committed notes.
    ///
    /// Any earlier unsaved draft for the item is discarded.
    #[must_use]
    pub fn begin_edit(mut self, id: ItemId) -> Self {
        let Some(item) = self.item_mut(id) else {
            return self;
        };

        item.edit_state = EditState::Editing;
        let notes = item.notes.clone();
        self.drafts.seed(id, &notes);
        self
    }

    /// Replace the draft for an item.
    ///
    /// Callers only do this for items in the `Editing` state; committed
    /// notes are untouched until `save_edit`.
    #[must_use]
    pub fn update_draft(mut self, id: ItemId, text: impl Into<String>) -> Self {
        self.drafts.set(id, text.into());
        self
    }

    /// Commit the draft (or keep the current notes if there is none)
    /// and return the item to `Viewing`
    #[must_use]
    pub fn save_edit(mut self, id: ItemId) -> Self {
        let draft = self.drafts.take(id);

        if let Some(item) = self.item_mut(id) {
            if let Some(text) = draft {
                item.notes = text;
            }
            item.edit_state = EditState::Viewing;
            debug!(%id, len = item.notes.len(), "saved notes");
        }
        self
    }

    /// Show a snapshot of the item in the overlay
    #[must_use]
    pub fn open_focus(mut self, item: &MediaItem) -> Self {
        self.focused = Some(FocusedItem::from(item));
        self
    }

    /// Show the item with this id in the overlay, if it exists
    #[must_use]
    pub fn open_focus_by_id(self, id: ItemId) -> Self {
        match self.item(id).cloned() {
            Some(item) => self.open_focus(&item),
            None => self,
        }
    }

    #[must_use]
    pub fn close_focus(mut self) -> Self {
        self.focused = None;
        self
    }

    /// Swap in an earlier list of items (undo/redo).
    ///
    /// Only the list and the committed notes go back. The overlay is left
    /// as it is, and items that still exist keep their edit state and
    /// draft. A restored item that was deleted while editing gets a draft
    /// started from its notes.
    #[must_use]
    pub fn restore_items(mut self, mut items: Vec<MediaItem>) -> Self {
        let mut drafts = EditBuffer::default();
        for item in &mut items {
            if let Some(current) = self.item(item.id) {
                item.edit_state = current.edit_state;
            }
            if item.is_editing() {
                match self.drafts.take(item.id) {
                    Some(text) => drafts.set(item.id, text),
                    None => drafts.seed(item.id, &item.notes),
                }
            }
        }

        self.items = items;
        self.drafts = drafts;
        self
    }
}
