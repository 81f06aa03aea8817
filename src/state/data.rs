//! Shared data structures for the application state
//!
//! These structs represent the data model that flows between
//! the gallery store and the UI layer.

use chrono::{DateTime, Local};
use std::fmt;
use uuid::Uuid;

use crate::media::ImageHandle;

/// Opaque identifier of a gallery item.
///
/// Generated once when the item is added and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generate a fresh random id
    pub fn new() -> Self {
        ItemId(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether the notes of an item are shown or being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Viewing,
    Editing,
}

/// Represents a single image in the gallery
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    /// Unique id, stable for the item's lifetime
    pub id: ItemId,
    /// Decoded, displayable image data
    pub image: ImageHandle,
    /// Committed notes (empty until the user saves some)
    pub notes: String,
    /// Viewing or Editing
    pub edit_state: EditState,
    /// When the item was appended to the gallery
    pub added_at: DateTime<Local>,
}

impl MediaItem {
    /// Create a new item with empty notes in the `Viewing` state
    pub fn new(image: ImageHandle) -> Self {
        Self {
            id: ItemId::new(),
            image,
            notes: String::new(),
            edit_state: EditState::Viewing,
            added_at: Local::now(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.edit_state == EditState::Editing
    }
}

/// Snapshot of an item shown in the overlay.
///
/// This is a copy taken when the overlay opens, so it keeps showing
/// the notes from that moment even if the item is edited or deleted later.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusedItem {
    pub id: ItemId,
    pub image: ImageHandle,
    pub notes: String,
}

impl From<&MediaItem> for FocusedItem {
    fn from(item: &MediaItem) -> Self {
        Self {
            id: item.id,
            image: item.image.clone(),
            notes: item.notes.clone(),
        }
    }
}
