//! Views over the gallery store
//!
//! - gallery.rs: the grid of cards with notes controls
//! - overlay.rs: the enlarged view and its backdrop hit test

pub mod gallery;
pub mod overlay;
