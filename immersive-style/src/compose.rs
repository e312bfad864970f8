//! The Style Composer.
//!
//! Builds `out/<name>/` from `styles/<name>/`:
//!
//! 1. recreate the output directory with `icons/`, `models/` and `fonts/`
//! 2. copy the source style's fonts, icons and models through verbatim
//! 3. hash and copy the catalog assets, registering them in the document
//! 4. inject the catalog's slot layers
//! 5. write the composed `style.json`
//!
//! Writes are not transactional: a failure leaves whatever was already
//! written in place.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

use crate::assets::{copy_dir_contents, materialize_assets, AssetError, ContentHasher, MaterializedAsset};
use crate::catalog::StyleCatalog;
use crate::layout::{StyleLayout, FONTS_FOLDER};
use crate::slots::{inject_slots, InjectionCounter, SlotError};
use crate::style::{AssetGroup, StyleDocument, StyleError};

/// Errors from composing a style.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error(transparent)]
    Style(#[from] StyleError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Slots(#[from] SlotError),
}

impl ComposeError {
    /// Returns true for slot validation failures, false for I/O failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, ComposeError::Slots(_))
    }
}

/// Summary of a compose run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeReport {
    pub style_name: String,
    pub assets: Vec<MaterializedAsset>,
    pub injected_layers: u64,
    pub output: PathBuf,
}

/// Composes immersive styles from a catalog.
pub struct Composer<H> {
    layout: StyleLayout,
    catalog: StyleCatalog,
    hasher: H,
}

impl<H: ContentHasher> Composer<H> {
    pub fn new(layout: StyleLayout, catalog: StyleCatalog, hasher: H) -> Self {
        Self {
            layout,
            catalog,
            hasher,
        }
    }

    pub fn layout(&self) -> &StyleLayout {
        &self.layout
    }

    /// Composes `styles/<style_name>` into `out/<style_name>`.
    pub fn compose(&self, style_name: &str) -> Result<ComposeReport, ComposeError> {
        info!(style = style_name, "Composing style");

        self.prepare_output(style_name)?;

        let mut document = StyleDocument::from_path(&self.layout.source_style(style_name))?;

        let assets = materialize_assets(
            &self.catalog,
            &self.layout,
            style_name,
            &self.hasher,
            &mut document,
        )?;

        let mut counter = InjectionCounter::new();
        let layers = std::mem::take(&mut document.layers);
        document.layers = inject_slots(
            layers,
            &self.catalog.slots,
            self.catalog.roads_group_id.as_deref(),
            &mut counter,
        )?;
        info!(
            slots = self.catalog.slots.len(),
            layers = counter.value(),
            "Slot layers injected"
        );

        let output = self.layout.output_style(style_name);
        document.write_to(&output)?;
        info!(path = %output.display(), "Composed style written");

        Ok(ComposeReport {
            style_name: style_name.to_string(),
            assets,
            injected_layers: counter.value(),
            output,
        })
    }

    fn prepare_output(&self, style_name: &str) -> Result<(), AssetError> {
        let output = self.layout.output_dir(style_name);
        let source = self.layout.source_dir(style_name);

        if output.exists() {
            debug!(path = %output.display(), "Removing previous output");
            fs::remove_dir_all(&output).map_err(|e| AssetError::Directory {
                path: output.clone(),
                source: e,
            })?;
        }

        let fonts = output.join(FONTS_FOLDER);
        fs::create_dir_all(&fonts).map_err(|e| AssetError::Directory {
            path: fonts.clone(),
            source: e,
        })?;
        copy_dir_contents(&source.join(FONTS_FOLDER), &fonts)?;

        for group in AssetGroup::ALL {
            copy_dir_contents(
                &self.layout.source_assets(style_name, group),
                &self.layout.output_assets(style_name, group),
            )?;
        }
        debug!(from = %source.display(), to = %output.display(), "Static folders copied");

        Ok(())
    }
}
