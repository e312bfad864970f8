//! File content hashing.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use super::error::{AssetError, AssetResult};

/// Computes a deterministic content hash of a file.
///
/// Same bytes must always produce the same string. The hash only names
/// files; it is not used for integrity or security.
pub trait ContentHasher {
    fn hash_file(&self, path: &Path) -> AssetResult<String>;
}

/// SHA-256 hasher producing lowercase hex.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl ContentHasher for Sha256Hasher {
    fn hash_file(&self, path: &Path) -> AssetResult<String> {
        let read_failed = |source| AssetError::Read {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(read_failed)?;
        let mut reader = BufReader::new(file);
        let mut hasher = Sha256::new();
        let mut buffer = [0u8; 8192];

        loop {
            let bytes_read = reader.read(&mut buffer).map_err(read_failed)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(format!("{:x}", hasher.finalize()))
    }
}

impl<H: ContentHasher + ?Sized> ContentHasher for &H {
    fn hash_file(&self, path: &Path) -> AssetResult<String> {
        (**self).hash_file(path)
    }
}
