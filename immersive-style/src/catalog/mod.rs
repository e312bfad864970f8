//! Catalogs of generated layers and the assets they reference.
//!
//! A [`StyleCatalog`] is plain configuration data: which lane icons,
//! textures and models to ship, which road group to tag, and which layer
//! templates to inject at each slot. It is passed to the composer explicitly,
//! so tests (or other styles) can use their own catalog.
//!
//! [`StyleCatalog::immersive`] builds the production catalog.

pub mod expressions;
mod immersive;
mod slot;

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::layout::StyleLayout;
use crate::style::AssetGroup;

pub use immersive::ROADS_GROUP_ID;
pub use slot::{LayerTemplate, Slot, SlotCatalog};

/// Everything the composer adds to a base style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleCatalog {
    /// Lane-direction code → icon basename (under `assets/images/lanes`).
    pub lane_icons: BTreeMap<u32, String>,
    /// Logical texture name → svg basename (under `assets/images`).
    pub textures: Vec<(String, String)>,
    /// Logical model name → glb basename (under `assets/models`).
    pub models: Vec<(String, String)>,
    /// Group whose sublayers get an `ignoreTier` predicate.
    pub roads_group_id: Option<String>,
    /// Layer templates per slot.
    pub slots: SlotCatalog,
}

/// One asset to hash, copy and register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogAsset {
    pub group: AssetGroup,
    /// Name under which the asset is registered in the style document.
    pub key: String,
    /// Source file basename, reused for the hashed output name.
    pub basename: String,
    pub source: PathBuf,
    pub extension: &'static str,
}

impl StyleCatalog {
    /// An empty catalog: no assets, no slots.
    pub fn empty() -> Self {
        Self {
            lane_icons: BTreeMap::new(),
            textures: Vec::new(),
            models: Vec::new(),
            roads_group_id: None,
            slots: SlotCatalog::new(),
        }
    }

    /// Replaces the slot catalog.
    pub fn with_slots(mut self, slots: SlotCatalog) -> Self {
        self.slots = slots;
        self
    }

    /// Resolves every catalog asset against `layout`.
    ///
    /// Lane icons come first (by ascending code), then textures, then models.
    /// Icons and textures are registered under their file basename, which is
    /// how layers refer to them (`iconImage`, `textureImage`); models are
    /// registered under their logical name (`modelSrc`).
    pub fn assets(&self, layout: &StyleLayout) -> Vec<CatalogAsset> {
        let lanes = self.lane_icons.values().map(|icon| CatalogAsset {
            group: AssetGroup::Images,
            key: icon.clone(),
            basename: icon.clone(),
            source: layout.lane_icon(icon),
            extension: "svg",
        });

        let textures = self.textures.iter().map(|(_, svg)| CatalogAsset {
            group: AssetGroup::Images,
            key: svg.clone(),
            basename: svg.clone(),
            source: layout.texture(svg),
            extension: "svg",
        });

        let models = self.models.iter().map(|(name, glb)| CatalogAsset {
            group: AssetGroup::Models,
            key: name.clone(),
            basename: glb.clone(),
            source: layout.model(glb),
            extension: "glb",
        });

        lanes.chain(textures).chain(models).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assets_order_and_keys() {
        let mut catalog = StyleCatalog::empty();
        catalog.lane_icons.insert(8, "lane-left".to_string());
        catalog.lane_icons.insert(2, "lane-straight".to_string());
        catalog
            .textures
            .push(("dots".to_string(), "dust_texture".to_string()));
        catalog
            .models
            .push(("pillar".to_string(), "pillar_v2".to_string()));

        let layout = StyleLayout::new("/w");
        let assets = catalog.assets(&layout);

        let keys: Vec<&str> = assets.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["lane-straight", "lane-left", "dust_texture", "pillar"]);

        assert_eq!(assets[0].source, PathBuf::from("/w/assets/images/lanes/lane-straight.svg"));
        assert_eq!(assets[2].source, PathBuf::from("/w/assets/images/dust_texture.svg"));
        assert_eq!(assets[3].group, AssetGroup::Models);
        assert_eq!(assets[3].basename, "pillar_v2");
        assert_eq!(assets[3].extension, "glb");
    }

    #[test]
    fn test_empty_catalog_has_no_assets() {
        let catalog = StyleCatalog::empty();
        assert!(catalog.assets(&StyleLayout::default()).is_empty());
        assert!(catalog.slots.is_empty());
    }
}
