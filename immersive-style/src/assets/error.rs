//! Asset error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while hashing or copying assets.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Asset file could not be read.
    #[error("Failed to read asset {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    /// Asset could not be copied into the output directory.
    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    /// Output directory could not be created or cleared.
    #[error("Failed to prepare directory {}: {source}", path.display())]
    Directory { path: PathBuf, source: io::Error },
}

/// Result type for asset operations.
pub type AssetResult<T> = Result<T, AssetError>;
