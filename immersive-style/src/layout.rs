//! Filesystem layout shared by the composer and the uploader.
//!
//! ```text
//! <root>/styles/<name>/style.json, icons/, models/, fonts/   source styles
//! <root>/out/<name>/style.json, icons/, models/, fonts/      composed output
//! <root>/assets/images/lanes/<icon>.svg                      lane icons
//! <root>/assets/images/<texture>.svg                         textures and signs
//! <root>/assets/models/<model>.glb                           3D models
//! ```

use std::path::{Path, PathBuf};

use crate::style::AssetGroup;

/// Name of the style document inside a style directory.
pub const STYLE_FILENAME: &str = "style.json";

/// Folder holding fonts, copied through verbatim.
pub const FONTS_FOLDER: &str = "fonts";

const STYLES_DIR: &str = "styles";
const OUTPUT_DIR: &str = "out";
const ASSETS_DIR: &str = "assets";

/// Resolves every path of the style workspace from a single root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleLayout {
    root: PathBuf,
}

impl StyleLayout {
    /// Creates a layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `styles/<name>`
    pub fn source_dir(&self, style: &str) -> PathBuf {
        self.root.join(STYLES_DIR).join(style)
    }

    /// `styles/<name>/style.json`
    pub fn source_style(&self, style: &str) -> PathBuf {
        self.source_dir(style).join(STYLE_FILENAME)
    }

    /// `styles/<name>/icons` or `styles/<name>/models`
    pub fn source_assets(&self, style: &str, group: AssetGroup) -> PathBuf {
        self.source_dir(style).join(group.folder())
    }

    /// `out/<name>`
    pub fn output_dir(&self, style: &str) -> PathBuf {
        self.root.join(OUTPUT_DIR).join(style)
    }

    /// `out/<name>/style.json`
    pub fn output_style(&self, style: &str) -> PathBuf {
        self.output_dir(style).join(STYLE_FILENAME)
    }

    /// `out/<name>/icons` or `out/<name>/models`
    pub fn output_assets(&self, style: &str, group: AssetGroup) -> PathBuf {
        self.output_dir(style).join(group.folder())
    }

    /// `assets/images/lanes/<icon>.svg`
    pub fn lane_icon(&self, icon: &str) -> PathBuf {
        self.root
            .join(ASSETS_DIR)
            .join("images")
            .join("lanes")
            .join(format!("{}.svg", icon))
    }

    /// `assets/images/<texture>.svg`
    pub fn texture(&self, texture: &str) -> PathBuf {
        self.root
            .join(ASSETS_DIR)
            .join("images")
            .join(format!("{}.svg", texture))
    }

    /// `assets/models/<model>.glb`
    pub fn model(&self, model: &str) -> PathBuf {
        self.root
            .join(ASSETS_DIR)
            .join("models")
            .join(format!("{}.glb", model))
    }
}

impl Default for StyleLayout {
    fn default() -> Self {
        Self::new(".")
    }
}
