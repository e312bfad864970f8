//! Slot injection.
//!
//! Walks a style's layer list and, after every layer whose id names a slot,
//! inserts that slot's templates in declared order. Group layers are walked
//! one level deep, so anchors may also live among a group's sublayers.

use std::collections::BTreeSet;

use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::catalog::SlotCatalog;
use crate::style::Layer;

/// Sublayer property hiding regular roads where an immersive counterpart exists.
pub const IGNORE_TIER_PROPERTY: &str = "ignoreTier";

/// Errors from slot injection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlotError {
    /// Catalog slots with no anchor layer in the document.
    #[error("Not all slots were injected: {}", slots.join(", "))]
    Unmatched { slots: Vec<String> },
}

/// Source of the numeric suffix of injected layer ids.
///
/// Shared by every slot in a run, so ids stay unique across slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InjectionCounter(u64);

impl InjectionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next id suffix. The first call returns 1.
    pub fn next(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    /// Number of ids handed out so far.
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// `["match", ["get", "db_has_immersive_counterpart"], [1], false, true]`
pub fn ignore_tier_expression() -> Value {
    json!([
        "match",
        ["get", "db_has_immersive_counterpart"],
        [1],
        false,
        true
    ])
}

/// Injects slot templates into `layers`.
///
/// Untouched layers keep their relative order; injected layers land right
/// after their anchor. Sublayers of the group `roads_group_id` get an
/// [`IGNORE_TIER_PROPERTY`] before their own anchor check. Fails if any slot
/// of `catalog` has no anchor.
pub fn inject_slots(
    layers: Vec<Layer>,
    catalog: &SlotCatalog,
    roads_group_id: Option<&str>,
    counter: &mut InjectionCounter,
) -> Result<Vec<Layer>, SlotError> {
    let mut matched = BTreeSet::new();
    let mut output = Vec::with_capacity(layers.len());

    for layer in layers {
        let id = layer.id.clone();
        let index = output.len();
        output.push(layer);
        inject_after(&id, catalog, counter, &mut matched, &mut output);

        // Sublayer ids are numbered after the group's own slot, if any.
        let group = &mut output[index];
        if !group.is_group() {
            continue;
        }
        let Some(sublayers) = group.layers.take() else {
            continue;
        };

        let tag_roads = roads_group_id == Some(id.as_str());
        let mut walked = Vec::with_capacity(sublayers.len());
        for mut sublayer in sublayers {
            if tag_roads {
                sublayer.set_property(IGNORE_TIER_PROPERTY, ignore_tier_expression());
            }
            let sub_id = sublayer.id.clone();
            walked.push(sublayer);
            inject_after(&sub_id, catalog, counter, &mut matched, &mut walked);
        }
        group.layers = Some(walked);
    }

    let unmatched: Vec<String> = catalog
        .names()
        .filter(|name| !matched.contains(*name))
        .map(str::to_string)
        .collect();

    if unmatched.is_empty() {
        Ok(output)
    } else {
        Err(SlotError::Unmatched { slots: unmatched })
    }
}

fn inject_after(
    id: &str,
    catalog: &SlotCatalog,
    counter: &mut InjectionCounter,
    matched: &mut BTreeSet<String>,
    collection: &mut Vec<Layer>,
) {
    let Some(slot) = catalog.get(id) else {
        return;
    };

    matched.insert(slot.name.clone());
    for (key, template) in &slot.templates {
        let layer_id = format!("{}-{}", key, counter.next());
        debug!(slot = %slot.name, layer = %layer_id, "Injecting layer");
        collection.push(template.instantiate(layer_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LayerTemplate;

    fn template(layer_type: &str) -> LayerTemplate {
        LayerTemplate::new(layer_type, json!(true), json!({}), 16)
    }

    fn ids(layers: &[Layer]) -> Vec<&str> {
        layers.iter().map(|l| l.id.as_str()).collect()
    }

    fn group(id: &str, sublayers: Vec<Layer>) -> Layer {
        let mut layer = Layer::new(id, "group");
        layer.layers = Some(sublayers);
        layer
    }

    #[test]
    fn test_roadbed_slot_gets_first_counter_value() {
        let catalog = SlotCatalog::new().with_slot("roadbedSlot", [("Roadbed", template("polygon"))]);
        let layers = vec![Layer::new("roadbedSlot", "line")];

        let mut counter = InjectionCounter::new();
        let output = inject_slots(layers, &catalog, None, &mut counter).unwrap();

        assert_eq!(ids(&output), vec!["roadbedSlot", "Roadbed-1"]);
        assert_eq!(output[1].layer_type.as_deref(), Some("polygon"));
        assert_eq!(output[1].properties["minzoom"], json!(16));
        assert_eq!(counter.value(), 1);
    }

    #[test]
    fn test_preserves_order_and_grows_by_template_count() {
        let catalog = SlotCatalog::new()
            .with_slot("a", [("A1", template("line")), ("A2", template("line"))])
            .with_slot("b", [("B1", template("line"))]);
        let layers = vec![
            Layer::new("first", "line"),
            Layer::new("a", "line"),
            Layer::new("middle", "line"),
            Layer::new("b", "line"),
            Layer::new("last", "line"),
        ];

        let output = inject_slots(layers, &catalog, None, &mut InjectionCounter::new()).unwrap();

        assert_eq!(output.len(), 5 + 3);
        assert_eq!(
            ids(&output),
            vec!["first", "a", "A1-1", "A2-2", "middle", "b", "B1-3", "last"]
        );
    }

    #[test]
    fn test_injects_into_group_sublayers() {
        let catalog = SlotCatalog::new().with_slot("markingsSlot", [("Solid", template("line"))]);
        let layers = vec![
            group(
                "roads",
                vec![
                    Layer::new("markingsSlot", "line"),
                    Layer::new("after", "line"),
                ],
            ),
            Layer::new("labels", "symbol"),
        ];

        let output = inject_slots(layers, &catalog, None, &mut InjectionCounter::new()).unwrap();

        assert_eq!(ids(&output), vec!["roads", "labels"]);
        let sublayers = output[0].layers.as_ref().unwrap();
        assert_eq!(ids(sublayers), vec!["markingsSlot", "Solid-1", "after"]);
    }

    #[test]
    fn test_tags_roads_group_sublayers_only() {
        let layers = vec![
            group("515493", vec![Layer::new("road", "line")]),
            group("other", vec![Layer::new("path", "line")]),
        ];

        let output = inject_slots(
            layers,
            &SlotCatalog::new(),
            Some("515493"),
            &mut InjectionCounter::new(),
        )
        .unwrap();

        let roads = &output[0].layers.as_ref().unwrap()[0];
        assert_eq!(roads.properties[IGNORE_TIER_PROPERTY], ignore_tier_expression());

        let other = &output[1].layers.as_ref().unwrap()[0];
        assert!(!other.properties.contains_key(IGNORE_TIER_PROPERTY));
        assert!(!output[0].properties.contains_key(IGNORE_TIER_PROPERTY));
    }

    #[test]
    fn test_injected_sublayers_are_not_tagged() {
        let catalog = SlotCatalog::new().with_slot("roadbedSlot", [("Roadbed", template("polygon"))]);
        let layers = vec![group("515493", vec![Layer::new("roadbedSlot", "line")])];

        let output =
            inject_slots(layers, &catalog, Some("515493"), &mut InjectionCounter::new()).unwrap();

        let sublayers = output[0].layers.as_ref().unwrap();
        assert!(sublayers[0].properties.contains_key(IGNORE_TIER_PROPERTY));
        assert!(!sublayers[1].properties.contains_key(IGNORE_TIER_PROPERTY));
    }

    #[test]
    fn test_nested_groups_are_not_walked() {
        let catalog = SlotCatalog::new().with_slot("deep", [("D", template("line"))]);
        let layers = vec![group(
            "outer",
            vec![group("inner", vec![Layer::new("deep", "line")])],
        )];

        let result = inject_slots(layers, &catalog, None, &mut InjectionCounter::new());
        assert_eq!(
            result,
            Err(SlotError::Unmatched {
                slots: vec!["deep".to_string()]
            })
        );
    }

    #[test]
    fn test_unmatched_slot_is_named() {
        let catalog = SlotCatalog::new()
            .with_slot("present", [("P", template("line"))])
            .with_slot("X", [("Y", template("line"))]);
        let layers = vec![Layer::new("present", "line")];

        let err = inject_slots(layers, &catalog, None, &mut InjectionCounter::new()).unwrap_err();

        assert_eq!(
            err,
            SlotError::Unmatched {
                slots: vec!["X".to_string()]
            }
        );
        assert!(err.to_string().contains('X'));
    }

    #[test]
    fn test_counter_continues_across_calls() {
        let catalog = SlotCatalog::new().with_slot("s", [("T", template("line"))]);
        let mut counter = InjectionCounter::new();

        inject_slots(vec![Layer::new("s", "line")], &catalog, None, &mut counter).unwrap();
        let second = inject_slots(vec![Layer::new("s", "line")], &catalog, None, &mut counter).unwrap();

        assert_eq!(second[1].id, "T-2");
    }

    #[test]
    fn test_group_anchor_is_numbered_before_its_sublayers() {
        let catalog = SlotCatalog::new()
            .with_slot("overpassSlot", [("Overpass", template("overpass"))])
            .with_slot("markingsSlot", [("Solid", template("line"))]);
        let layers = vec![group(
            "overpassSlot",
            vec![Layer::new("markingsSlot", "line")],
        )];

        let output = inject_slots(layers, &catalog, None, &mut InjectionCounter::new()).unwrap();

        assert_eq!(ids(&output), vec!["overpassSlot", "Overpass-1"]);
        assert_eq!(
            ids(output[0].layers.as_ref().unwrap()),
            vec!["markingsSlot", "Solid-2"]
        );
    }

    #[test]
    fn test_group_without_sublayers_is_kept() {
        let layers = vec![Layer::new("empty-group", "group")];
        let output =
            inject_slots(layers, &SlotCatalog::new(), None, &mut InjectionCounter::new()).unwrap();
        assert_eq!(ids(&output), vec!["empty-group"]);
        assert!(output[0].layers.is_none());
    }
}
