//! Content-addressed asset handling.
//!
//! Catalog assets are copied into the output directory under a name that
//! embeds a hash of their bytes (`<basename>-<hash>.<ext>`). Unchanged
//! content therefore keeps its name between runs, which is what the
//! uploader relies on to detect new assets.

mod error;
mod hasher;
mod materialize;

pub use error::{AssetError, AssetResult};
pub use hasher::{ContentHasher, Sha256Hasher};
pub use materialize::{copy_dir_contents, hashed_filename, materialize_assets, MaterializedAsset};
