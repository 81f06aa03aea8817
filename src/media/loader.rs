//! Image file resolution
//!
//! Turns a picked file into an `ImageHandle`. Reading happens on the
//! tokio runtime and decoding on a blocking thread, so the UI stays
//! responsive while large images load.

use std::path::{Path, PathBuf};
use tokio::task;
use tracing::{debug, warn};

use super::ImageHandle;
use crate::error::ResolveError;

/// Extensions offered by the file picker
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff", "ico",
];

/// Resolve a file into a displayable handle
///
/// # Returns
/// * `Ok(handle)` - The file decoded as an image
/// * `Err(ResolveError)` - The file could not be read or decoded; nothing
///   should be added to the gallery
pub async fn resolve(path: PathBuf) -> Result<ImageHandle, ResolveError> {
    let bytes = tokio::fs::read(&path).await.map_err(|e| ResolveError::Io {
        path: path.clone(),
        message: e.to_string(),
    })?;

    debug!(path = %path.display(), len = bytes.len(), "read image file");

    // Spawn blocking because decoding is CPU-intensive
    let result = task::spawn_blocking(move || ImageHandle::decode(bytes))
        .await
        .map_err(|e| ResolveError::Task(e.to_string()))?;

    if let Err(err) = &result {
        warn!(path = %path.display(), %err, "could not resolve image");
    }

    result
}

/// Check if a path has one of the picker's image extensions
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
