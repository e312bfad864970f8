//! Copies catalog assets into a composed style.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::error::{AssetError, AssetResult};
use super::hasher::ContentHasher;
use crate::catalog::StyleCatalog;
use crate::layout::StyleLayout;
use crate::style::{AssetGroup, StyleDocument};

/// An asset written to the output directory and registered in the style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedAsset {
    pub group: AssetGroup,
    /// Key in the style's `icons` or `models` map.
    pub key: String,
    /// Hashed filename, also the registered `url`.
    pub file_name: String,
}

/// `<basename>-<hash>.<ext>`
pub fn hashed_filename(basename: &str, hash: &str, extension: &str) -> String {
    format!("{}-{}.{}", basename, hash, extension)
}

/// Hashes every catalog asset, copies it into `out/<style_name>/` under its
/// hashed name and registers `{url}` for it in `document`.
///
/// Existing output files are overwritten. The output asset directories must
/// already exist.
pub fn materialize_assets<H: ContentHasher>(
    catalog: &StyleCatalog,
    layout: &StyleLayout,
    style_name: &str,
    hasher: &H,
    document: &mut StyleDocument,
) -> AssetResult<Vec<MaterializedAsset>> {
    let assets = catalog.assets(layout);
    let mut written = Vec::with_capacity(assets.len());

    for asset in assets {
        let hash = hasher.hash_file(&asset.source)?;
        let file_name = hashed_filename(&asset.basename, &hash, asset.extension);
        let target = layout
            .output_assets(style_name, asset.group)
            .join(&file_name);

        fs::copy(&asset.source, &target).map_err(|source| AssetError::Copy {
            from: asset.source.clone(),
            to: target.clone(),
            source,
        })?;
        document.register_asset(asset.group, &asset.key, &file_name);

        debug!(group = %asset.group, key = %asset.key, file = %file_name, "Asset materialized");
        written.push(MaterializedAsset {
            group: asset.group,
            key: asset.key,
            file_name,
        });
    }

    info!(count = written.len(), "Catalog assets copied");
    Ok(written)
}

/// Recursively copies the contents of `source` into `destination`.
///
/// `destination` is created if needed; files already there are overwritten.
pub fn copy_dir_contents(source: &Path, destination: &Path) -> AssetResult<()> {
    let entries = fs::read_dir(source).map_err(|e| AssetError::Read {
        path: source.to_path_buf(),
        source: e,
    })?;
    fs::create_dir_all(destination).map_err(|e| AssetError::Directory {
        path: destination.to_path_buf(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| AssetError::Read {
            path: source.to_path_buf(),
            source: e,
        })?;
        let from = entry.path();
        let to: PathBuf = destination.join(entry.file_name());

        if from.is_dir() {
            copy_dir_contents(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|e| AssetError::Copy {
                from: from.clone(),
                to: to.clone(),
                source: e,
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::hasher::tests::LengthHasher;
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn write(path: &Path, bytes: &[u8]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, bytes).unwrap();
    }

    fn catalog() -> StyleCatalog {
        let mut catalog = StyleCatalog::empty();
        catalog.lane_icons = BTreeMap::from([(2, "lane-straight".to_string())]);
        catalog.textures = vec![("dots".to_string(), "dust".to_string())];
        catalog.models = vec![("pillar".to_string(), "pillar_v2".to_string())];
        catalog
    }

    fn workspace() -> (TempDir, StyleLayout) {
        let temp = TempDir::new().unwrap();
        let layout = StyleLayout::new(temp.path());
        write(&layout.lane_icon("lane-straight"), b"abc");
        write(&layout.texture("dust"), b"abcd");
        write(&layout.model("pillar_v2"), b"abcde");
        for group in AssetGroup::ALL {
            fs::create_dir_all(layout.output_assets("demo", group)).unwrap();
        }
        (temp, layout)
    }

    #[test]
    fn test_hashed_filename() {
        assert_eq!(hashed_filename("pillar", "ab12", "glb"), "pillar-ab12.glb");
    }

    #[test]
    fn test_materialize_registers_and_copies() {
        let (_temp, layout) = workspace();
        let mut doc = StyleDocument::default();

        let written =
            materialize_assets(&catalog(), &layout, "demo", &LengthHasher, &mut doc).unwrap();

        assert_eq!(written.len(), 3);
        assert_eq!(
            doc.asset_url(AssetGroup::Images, "lane-straight"),
            Some("lane-straight-len3.svg")
        );
        assert_eq!(doc.asset_url(AssetGroup::Images, "dust"), Some("dust-len4.svg"));
        assert_eq!(
            doc.asset_url(AssetGroup::Models, "pillar"),
            Some("pillar_v2-len5.glb")
        );

        let copied = layout
            .output_assets("demo", AssetGroup::Models)
            .join("pillar_v2-len5.glb");
        assert_eq!(fs::read(copied).unwrap(), b"abcde");
    }

    #[test]
    fn test_rerun_gives_identical_names() {
        let (_temp, layout) = workspace();
        let hasher = crate::assets::Sha256Hasher;

        let mut first = StyleDocument::default();
        let mut second = StyleDocument::default();
        let a = materialize_assets(&catalog(), &layout, "demo", &hasher, &mut first).unwrap();
        let b = materialize_assets(&catalog(), &layout, "demo", &hasher, &mut second).unwrap();

        assert_eq!(a, b);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_asset_source_fails() {
        let (_temp, layout) = workspace();
        fs::remove_file(layout.texture("dust")).unwrap();

        let result = materialize_assets(
            &catalog(),
            &layout,
            "demo",
            &crate::assets::Sha256Hasher,
            &mut StyleDocument::default(),
        );
        assert!(matches!(result, Err(AssetError::Read { .. })));
    }

    #[test]
    fn test_copy_dir_contents_recursive() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("fonts");
        write(&source.join("a.pbf"), b"a");
        write(&source.join("Noto/0-255.pbf"), b"b");

        let destination = temp.path().join("out/fonts");
        copy_dir_contents(&source, &destination).unwrap();

        assert_eq!(fs::read(destination.join("a.pbf")).unwrap(), b"a");
        assert_eq!(fs::read(destination.join("Noto/0-255.pbf")).unwrap(), b"b");
    }

    #[test]
    fn test_copy_dir_contents_missing_source() {
        let temp = TempDir::new().unwrap();
        let result = copy_dir_contents(&temp.path().join("nope"), &temp.path().join("out"));
        assert!(matches!(result, Err(AssetError::Read { .. })));
    }
}
