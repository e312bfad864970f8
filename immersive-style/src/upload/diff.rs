//! New-asset detection.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::assets::{AssetError, AssetResult};

/// Filenames present in `output_dir` but not in `source_dir`.
///
/// Composed assets carry a content hash in their name, so an unchanged
/// asset reproduces a name that already exists in the source style and is
/// not reported.
pub fn new_assets(source_dir: &Path, output_dir: &Path) -> AssetResult<BTreeSet<String>> {
    let known = file_names(source_dir)?;
    let produced = file_names(output_dir)?;
    Ok(produced.difference(&known).cloned().collect())
}

fn file_names(dir: &Path) -> AssetResult<BTreeSet<String>> {
    let read_failed = |source| AssetError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = BTreeSet::new();
    for entry in fs::read_dir(dir).map_err(read_failed)? {
        let entry = entry.map_err(read_failed)?;
        names.insert(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dir_with(temp: &TempDir, name: &str, files: &[&str]) -> std::path::PathBuf {
        let dir = temp.path().join(name);
        fs::create_dir_all(&dir).unwrap();
        for file in files {
            fs::write(dir.join(file), b"x").unwrap();
        }
        dir
    }

    #[test]
    fn test_only_output_only_files_are_new() {
        let temp = TempDir::new().unwrap();
        let source = dir_with(&temp, "src", &["a.svg", "b.svg"]);
        let output = dir_with(&temp, "out", &["a.svg", "b.svg", "c.svg"]);

        let new = new_assets(&source, &output).unwrap();
        assert_eq!(new, BTreeSet::from(["c.svg".to_string()]));
    }

    #[test]
    fn test_source_only_files_are_ignored() {
        let temp = TempDir::new().unwrap();
        let source = dir_with(&temp, "src", &["old-1.glb"]);
        let output = dir_with(&temp, "out", &[]);

        assert!(new_assets(&source, &output).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let output = dir_with(&temp, "out", &["a.svg"]);

        let result = new_assets(&temp.path().join("missing"), &output);
        assert!(matches!(result, Err(AssetError::Read { .. })));
    }
}
