use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading the settings file
#[derive(Debug, Error)]
pub enum Error {
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings file: {0}")]
    TomlDe(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a picked file could not become a gallery image.
///
/// Messages carry strings rather than the source errors so the value
/// can travel inside a `Message` (which must be `Clone`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("could not read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    #[error("not a recognised image format")]
    UnsupportedFormat,

    #[error("image could not be decoded: {0}")]
    Decode(String),

    #[error("background task failed: {0}")]
    Task(String),
}
