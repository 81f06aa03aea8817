//! Image source module
//!
//! This module handles:
//! - Reading picked files from disk
//! - Decoding them once to make sure they can be displayed
//! - Wrapping the result in an immutable `ImageHandle`

pub mod handle;
pub mod loader;

pub use crate::error::ResolveError;
pub use handle::ImageHandle;
