//! Style document error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing a style document.
#[derive(Debug, Error)]
pub enum StyleError {
    /// Style file could not be read.
    #[error("Failed to read style {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    /// Style file is not a valid style document.
    #[error("Failed to parse style {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Style could not be serialized back to JSON.
    #[error("Failed to serialize style: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Style file could not be written.
    #[error("Failed to write style {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}
