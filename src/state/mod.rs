//! State management module
//!
//! This module handles all application state, including:
//! - The gallery store and its operations (gallery.rs)
//! - Shared data structures (data.rs)
//! - Drafts of notes being edited (edit.rs)
//! - Ordering of in-flight uploads (uploads.rs)
//! - Undo/redo stacks (history.rs)

pub mod data;
pub mod edit;
pub mod gallery;
pub mod history;
pub mod uploads;

pub use data::{EditState, FocusedItem, ItemId, MediaItem};
pub use gallery::GalleryState;
pub use history::History;
pub use uploads::{Ticket, UploadOrder, UploadQueue};
