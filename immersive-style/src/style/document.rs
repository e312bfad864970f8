//! Typed view over a style document.

use std::fs;
use std::path::Path;

use serde::de::{self, DeserializeOwned};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};

use super::StyleError;

/// Layer type marking a layer that owns nested `layers`.
pub const GROUP_LAYER_TYPE: &str = "group";

/// Prefix added to the style name when it is submitted as a draft.
pub const UPLOAD_NAME_PREFIX: &str = "[upload] ";

/// Binary asset groups carried by a style.
///
/// Each group has a map in the style document, a folder next to
/// `style.json`, and an endpoint on the styles backend. The names differ for
/// images (`icons` locally, `images` remotely).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetGroup {
    /// SVG icons and textures.
    Images,
    /// GLB models.
    Models,
}

impl AssetGroup {
    /// All groups, in upload order.
    pub const ALL: [AssetGroup; 2] = [AssetGroup::Images, AssetGroup::Models];

    /// Key of the group's map in the style document.
    pub fn style_key(self) -> &'static str {
        match self {
            AssetGroup::Images => "icons",
            AssetGroup::Models => "models",
        }
    }

    /// Folder holding the group's files, relative to the style directory.
    pub fn folder(self) -> &'static str {
        self.style_key()
    }

    /// Path segment used by the backend's asset endpoints.
    pub fn api_name(self) -> &'static str {
        match self {
            AssetGroup::Images => "images",
            AssetGroup::Models => "models",
        }
    }
}

impl std::fmt::Display for AssetGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_name())
    }
}

/// A single style layer.
///
/// `layers` is only present on group layers. All other properties (filter,
/// style, zoom range, ...) live in `properties` untouched. Keys are written
/// back in the order they were read; keys added later follow them.
#[derive(Debug, Clone)]
pub struct Layer {
    pub id: String,
    pub layer_type: Option<String>,
    pub layers: Option<Vec<Layer>>,
    pub properties: Map<String, Value>,
    key_order: Vec<String>,
}

impl Layer {
    /// Creates a layer with no extra properties.
    pub fn new(id: impl Into<String>, layer_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            layer_type: Some(layer_type.into()),
            layers: None,
            properties: Map::new(),
            key_order: Vec::new(),
        }
    }

    /// Returns true for `type == "group"`.
    pub fn is_group(&self) -> bool {
        self.layer_type.as_deref() == Some(GROUP_LAYER_TYPE)
    }

    /// Sets (or replaces) a property.
    pub fn set_property(&mut self, key: impl Into<String>, value: Value) {
        self.properties.insert(key.into(), value);
    }
}

// Key order is presentation only.
impl PartialEq for Layer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.layer_type == other.layer_type
            && self.layers == other.layers
            && self.properties == other.properties
    }
}

/// A map style document.
///
/// Top-level keys keep their original order on write, like layer keys.
#[derive(Debug, Clone, Default)]
pub struct StyleDocument {
    /// Properties the tooling does not interpret (`name`, sources, ...).
    pub extra: Map<String, Value>,
    pub icons: Map<String, Value>,
    pub models: Map<String, Value>,
    pub layers: Vec<Layer>,
    key_order: Vec<String>,
}

impl PartialEq for StyleDocument {
    fn eq(&self, other: &Self) -> bool {
        self.extra == other.extra
            && self.icons == other.icons
            && self.models == other.models
            && self.layers == other.layers
    }
}

const LAYER_FIELDS: [&str; 3] = ["id", "type", "layers"];
const DOCUMENT_FIELDS: [&str; 3] = ["icons", "models", "layers"];

fn field<T, E>(value: Value) -> Result<T, E>
where
    T: DeserializeOwned,
    E: de::Error,
{
    serde_json::from_value(value).map_err(E::custom)
}

impl<'de> Deserialize<'de> for Layer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::<String, Value>::deserialize(deserializer)?;
        let key_order = object.keys().cloned().collect();

        let mut id = None;
        let mut layer_type = None;
        let mut layers = None;
        let mut properties = Map::new();
        for (key, value) in object {
            match key.as_str() {
                "id" => id = Some(field::<String, D::Error>(value)?),
                "type" => layer_type = field::<_, D::Error>(value)?,
                "layers" => layers = field::<_, D::Error>(value)?,
                _ => {
                    properties.insert(key, value);
                }
            }
        }

        Ok(Self {
            id: id.ok_or_else(|| <D::Error as de::Error>::missing_field("id"))?,
            layer_type,
            layers,
            properties,
            key_order,
        })
    }
}

impl Serialize for Layer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        write_ordered(
            &mut map,
            &self.key_order,
            &LAYER_FIELDS,
            &self.properties,
            |map, key| match key {
                "id" => map.serialize_entry("id", &self.id),
                "type" => match &self.layer_type {
                    Some(layer_type) => map.serialize_entry("type", layer_type),
                    None => Ok(()),
                },
                _ => match &self.layers {
                    Some(layers) => map.serialize_entry("layers", layers),
                    None => Ok(()),
                },
            },
        )?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for StyleDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::<String, Value>::deserialize(deserializer)?;
        let mut document = StyleDocument {
            key_order: object.keys().cloned().collect(),
            ..StyleDocument::default()
        };

        for (key, value) in object {
            match key.as_str() {
                "icons" => document.icons = field::<_, D::Error>(value)?,
                "models" => document.models = field::<_, D::Error>(value)?,
                "layers" => document.layers = field::<_, D::Error>(value)?,
                _ => {
                    document.extra.insert(key, value);
                }
            }
        }

        Ok(document)
    }
}

impl Serialize for StyleDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        write_ordered(
            &mut map,
            &self.key_order,
            &DOCUMENT_FIELDS,
            &self.extra,
            |map, key| match key {
                "icons" => map.serialize_entry("icons", &self.icons),
                "models" => map.serialize_entry("models", &self.models),
                _ => map.serialize_entry("layers", &self.layers),
            },
        )?;
        map.end()
    }
}

/// Writes typed `fields` and `extra` entries.
///
/// Typed fields missing from `order` come first, then every key of `order`,
/// then `extra` keys added after reading.
fn write_ordered<M, F>(
    map: &mut M,
    order: &[String],
    fields: &[&str],
    extra: &Map<String, Value>,
    mut write_field: F,
) -> Result<(), M::Error>
where
    M: SerializeMap,
    F: FnMut(&mut M, &str) -> Result<(), M::Error>,
{
    let was_read = |key: &str| order.iter().any(|k| k == key);

    for field in fields.iter().copied().filter(|field| !was_read(field)) {
        write_field(map, field)?;
    }
    for key in order {
        if fields.contains(&key.as_str()) {
            write_field(map, key.as_str())?;
        } else if let Some(value) = extra.get(key) {
            map.serialize_entry(key, value)?;
        }
    }
    for (key, value) in extra.iter().filter(|(key, _)| !was_read(key.as_str())) {
        map.serialize_entry(key, value)?;
    }
    Ok(())
}

impl StyleDocument {
    /// Parses a style document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads and parses the style document at `path`.
    pub fn from_path(path: &Path) -> Result<Self, StyleError> {
        let content = fs::read_to_string(path).map_err(|source| StyleError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&content).map_err(|source| StyleError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serializes the document as compact JSON.
    pub fn to_json(&self) -> Result<String, StyleError> {
        serde_json::to_string(self).map_err(StyleError::Serialize)
    }

    /// Converts the document into a JSON value, e.g. for embedding in a request body.
    pub fn to_value(&self) -> Result<Value, StyleError> {
        serde_json::to_value(self).map_err(StyleError::Serialize)
    }

    /// Writes the document as compact JSON to `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), StyleError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| StyleError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns the asset map for a group.
    pub fn asset_map(&self, group: AssetGroup) -> &Map<String, Value> {
        match group {
            AssetGroup::Images => &self.icons,
            AssetGroup::Models => &self.models,
        }
    }

    fn asset_map_mut(&mut self, group: AssetGroup) -> &mut Map<String, Value> {
        match group {
            AssetGroup::Images => &mut self.icons,
            AssetGroup::Models => &mut self.models,
        }
    }

    /// Registers an asset, replacing any previous entry under `name` with `{url}`.
    pub fn register_asset(&mut self, group: AssetGroup, name: &str, url: &str) {
        self.asset_map_mut(group)
            .insert(name.to_string(), json!({ "url": url }));
    }

    /// Rewrites the `url` of an existing entry, keeping its other fields.
    ///
    /// Returns false if there is no object entry under `name`.
    pub fn set_asset_url(&mut self, group: AssetGroup, name: &str, url: &str) -> bool {
        match self.asset_map_mut(group).get_mut(name) {
            Some(Value::Object(entry)) => {
                entry.insert("url".to_string(), Value::String(url.to_string()));
                true
            }
            _ => false,
        }
    }

    /// Returns the URL registered for `name`, if any.
    pub fn asset_url(&self, group: AssetGroup, name: &str) -> Option<&str> {
        self.asset_map(group)
            .get(name)
            .and_then(|entry| entry.get("url"))
            .and_then(Value::as_str)
    }

    /// Lists `(name, url)` pairs of a group in document order.
    ///
    /// Entries without a string `url` are skipped.
    pub fn asset_entries(&self, group: AssetGroup) -> Vec<(String, String)> {
        self.asset_map(group)
            .iter()
            .filter_map(|(name, entry)| {
                entry
                    .get("url")
                    .and_then(Value::as_str)
                    .map(|url| (name.clone(), url.to_string()))
            })
            .collect()
    }

    /// Returns the style's `name`, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.extra.get("name").and_then(Value::as_str)
    }

    /// Prefixes the style name with [`UPLOAD_NAME_PREFIX`].
    pub fn mark_as_upload(&mut self) {
        if let Some(name) = self.name() {
            let marked = format!("{}{}", UPLOAD_NAME_PREFIX, name);
            self.extra.insert("name".to_string(), Value::String(marked));
        }
    }
}
