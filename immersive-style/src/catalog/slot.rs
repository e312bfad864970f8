//! Slot catalog and layer templates.

use serde_json::Value;

use crate::style::Layer;

/// A layer definition instantiated with a fresh id at injection time.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerTemplate {
    pub layer_type: String,
    pub filter: Value,
    pub style: Value,
    pub minzoom: u8,
}

impl LayerTemplate {
    pub fn new(layer_type: impl Into<String>, filter: Value, style: Value, minzoom: u8) -> Self {
        Self {
            layer_type: layer_type.into(),
            filter,
            style,
            minzoom,
        }
    }

    /// Creates a style layer from this template.
    pub fn instantiate(&self, id: String) -> Layer {
        let mut layer = Layer::new(id, self.layer_type.as_str());
        layer.set_property("filter", self.filter.clone());
        layer.set_property("style", self.style.clone());
        layer.set_property("minzoom", Value::from(self.minzoom));
        layer
    }
}

/// Templates injected right after the anchor layer named `name`.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub name: String,
    /// `(template key, template)` in injection order.
    pub templates: Vec<(String, LayerTemplate)>,
}

/// Ordered mapping of slot name → templates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlotCatalog {
    slots: Vec<Slot>,
}

impl SlotCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a slot. A later slot with the same name replaces the earlier one.
    pub fn with_slot<K: Into<String>>(
        mut self,
        name: impl Into<String>,
        templates: impl IntoIterator<Item = (K, LayerTemplate)>,
    ) -> Self {
        let slot = Slot {
            name: name.into(),
            templates: templates
                .into_iter()
                .map(|(key, template)| (key.into(), template))
                .collect(),
        };

        match self.slots.iter_mut().find(|s| s.name == slot.name) {
            Some(existing) => *existing = slot,
            None => self.slots.push(slot),
        }
        self
    }

    /// Looks up the slot anchored at layer `id`.
    pub fn get(&self, id: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.name == id)
    }

    /// Slot names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
