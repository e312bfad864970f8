//! The production immersive-roads catalog.
//!
//! Base styles must declare three anchor layers:
//!
//! 1. `overpassSlot` - interchanges, embankments and road supports
//! 2. `markingsSlot` - road markings
//! 3. `roadbedSlot` - roadbed polygons

use std::collections::BTreeMap;

use serde_json::{json, Value};

use super::expressions::{
    fadeout, immersive_filter, linear_change_color, meters_to_pixels, sublayer_is, zoom,
    zoom_interpolate,
};
use super::{LayerTemplate, SlotCatalog, StyleCatalog};
use crate::lanes::directions_matcher;

/// Base-style group holding the regular road layers.
pub const ROADS_GROUP_ID: &str = "515493";

// Zoom at which the roadbed appears.
const ROADBED_MIN_ZOOM: u8 = 16;
// Zoom until which the roadbed color keeps darkening.
const ROADBED_MAX_ZOOM: u8 = 18;
// Zoom at which the main markings appear.
const MARKING_MIN_ZOOM: u8 = 16;
// Zoom at which the secondary markings appear.
const MARKING_ADD_MIN_ZOOM: u8 = 17;
// Overpasses start one level early so regular roads can fade into them.
const OVERPASS_MIN_ZOOM: u8 = 15;

const MARKING_WHITE: &str = "#E0E0E0";
const MARKING_YELLOW: &str = "#EBE74D";
const MARKING_BLUE: &str = "#E0E0E0";
const MARKING_GRAY: &str = "#E0E0E0";
const MARKING_POINT: &str = "#FFFFFF";

const ROADBED_ASPHALT: &str = "#C7C7C7";
const ROADBED_ASPHALT_DARK: &str = "#B3B3B3";
const EMBANKMENT_GREEN: &str = "#9AC78B";

const LANE_ICONS: [(u32, &str); 11] = [
    (2, "immersive-straight"),
    (4, "immersive-right"),
    (6, "immersive-right-straight"),
    (8, "immersive-left"),
    (10, "immersive-left-straight"),
    (12, "immersive-left-right"),
    (14, "immersive-left-straight-right"),
    (64, "immersive-sharply-right"),
    (128, "immersive-sharply-left"),
    (1024, "immersive-turnover-left"),
    (1026, "immersive-turnover-left-straight"),
];

const TEXTURES: [(&str, &str); 9] = [
    ("bricks", "Visiwig-Bricks"),
    ("dots", "dust_texture"),
    ("squares", "protruding-squares"),
    ("waffle3x", "waffle3x"),
    ("waffle", "waffle"),
    ("immersive-sign-give-way", "immersive-sign-give-way"),
    ("immersive-sign-electroparking", "immersive-sign-electroparking"),
    ("immersive-sign-disabled-person", "immersive-sign-disabled-person"),
    ("immersive-sign-bus-line", "immersive-sign-bus-line"),
];

const MODELS: [(&str, &str); 1] = [("pillar", "pillar")];

impl StyleCatalog {
    /// Builds the catalog used for the production online style.
    pub fn immersive() -> Self {
        let lane_icons: BTreeMap<u32, String> = LANE_ICONS
            .iter()
            .map(|(code, icon)| (*code, icon.to_string()))
            .collect();

        let markings: Vec<(&str, LayerTemplate)> = polygon_markings()
            .into_iter()
            .chain(linear_markings())
            .chain(point_markings(directions_matcher(&lane_icons)))
            .collect();

        let slots = SlotCatalog::new()
            .with_slot("overpassSlot", overpass_layers())
            .with_slot("markingsSlot", markings)
            .with_slot("roadbedSlot", roadbed_layers());

        Self {
            lane_icons,
            textures: pairs(&TEXTURES),
            models: pairs(&MODELS),
            roads_group_id: Some(ROADS_GROUP_ID.to_string()),
            slots,
        }
    }
}

fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
    entries
        .iter()
        .map(|(name, file)| (name.to_string(), file.to_string()))
        .collect()
}

fn z(level: u8) -> f64 {
    f64::from(level)
}

/// Marking width that thins from `wide` at z16 to `narrow` at z18, in meters.
fn tapered_width(wide: f64, narrow: f64) -> Value {
    meters_to_pixels(zoom_interpolate(&[(16.0, wide), (18.0, narrow)]))
}

fn line_marking(name: &'static str, style: Value, minzoom: u8) -> (&'static str, LayerTemplate) {
    (
        name,
        LayerTemplate::new("line", sublayer_is(name), style, minzoom),
    )
}

fn linear_markings() -> Vec<(&'static str, LayerTemplate)> {
    let main = z(MARKING_MIN_ZOOM);
    let add = z(MARKING_ADD_MIN_ZOOM);

    vec![
        line_marking(
            "LinearMarking_Broken",
            json!({
                "width": meters_to_pixels(json!(0.15)),
                "color": fadeout(MARKING_WHITE, add),
                "pattern": ["pattern", "stripe", meters_to_pixels(json!(3)), meters_to_pixels(json!(3))],
                "startCap": "butt",
                "endCap": "butt"
            }),
            MARKING_ADD_MIN_ZOOM,
        ),
        line_marking(
            "LinearMarking_Double",
            json!({
                "width": tapered_width(2.4, 0.6),
                "color": fadeout(MARKING_WHITE, main),
                "pattern": ["pattern", "doubledash", 10, tapered_width(0.8, 0.2), 10, 10],
                "startCap": "butt",
                "endCap": "butt"
            }),
            MARKING_MIN_ZOOM,
        ),
        line_marking(
            "LinearMarking_ParkingPlaces",
            json!({
                "width": meters_to_pixels(json!(0.15)),
                "color": fadeout(MARKING_GRAY, main)
            }),
            MARKING_MIN_ZOOM,
        ),
        line_marking(
            "LinearMarking_Reversal",
            json!({
                "width": tapered_width(2.4, 0.6),
                "color": fadeout(MARKING_WHITE, main),
                "pattern": [
                    "pattern",
                    "doubledash",
                    meters_to_pixels(json!(4)),
                    tapered_width(0.8, 0.2),
                    meters_to_pixels(json!(2)),
                    meters_to_pixels(json!(4))
                ],
                "startCap": "butt",
                "endCap": "butt"
            }),
            MARKING_MIN_ZOOM,
        ),
        line_marking(
            "LinearMarking_ReverseTraffic",
            json!({
                "width": tapered_width(2.4, 0.6),
                "color": fadeout(MARKING_WHITE, add),
                "pattern": [
                    "pattern",
                    "doubledash",
                    meters_to_pixels(json!(10)),
                    tapered_width(0.8, 0.2),
                    meters_to_pixels(json!(5)),
                    meters_to_pixels(json!(5))
                ],
                "startCap": "butt",
                "endCap": "butt"
            }),
            MARKING_ADD_MIN_ZOOM,
        ),
        line_marking(
            "LinearMarking_ShortIntermittentBlue",
            json!({
                "width": meters_to_pixels(json!(0.15)),
                "color": fadeout(MARKING_BLUE, add),
                "pattern": ["pattern", "stripe", meters_to_pixels(json!(0.5)), meters_to_pixels(json!(0.5))],
                "startCap": "butt",
                "endCap": "butt"
            }),
            MARKING_ADD_MIN_ZOOM,
        ),
        line_marking(
            "LinearMarking_ShortIntermittentWhite",
            json!({
                "width": meters_to_pixels(json!(0.15)),
                "color": fadeout(MARKING_WHITE, add),
                "pattern": ["pattern", "stripe", meters_to_pixels(json!(0.5)), meters_to_pixels(json!(0.5))],
                "startCap": "butt",
                "endCap": "butt"
            }),
            MARKING_ADD_MIN_ZOOM,
        ),
        line_marking(
            "LinearMarking_Solid",
            json!({
                "width": tapered_width(0.8, 0.2),
                "color": fadeout(MARKING_WHITE, main)
            }),
            MARKING_MIN_ZOOM,
        ),
        line_marking(
            "LinearMarking_Stop",
            json!({
                "width": meters_to_pixels(json!(0.15)),
                "color": fadeout(MARKING_YELLOW, add),
                "geometryModifier": ["geometry-modifier", ["line-to-zigzag", 2, 2, false]]
            }),
            MARKING_ADD_MIN_ZOOM,
        ),
        // Fades in with the main markings but only shows from the secondary zoom.
        line_marking(
            "LinearMarking_StopLine",
            json!({
                "width": meters_to_pixels(json!(0.3)),
                "color": fadeout(MARKING_WHITE, main),
                "startCap": "butt",
                "endCap": "butt"
            }),
            MARKING_ADD_MIN_ZOOM,
        ),
        line_marking(
            "LinearMarking_TramStop",
            json!({
                "width": meters_to_pixels(json!(0.15)),
                "color": fadeout(MARKING_YELLOW, add),
                "geometryModifier": ["geometry-modifier", ["line-to-zigzag", 1, 1, false]]
            }),
            MARKING_ADD_MIN_ZOOM,
        ),
        line_marking(
            "LinearMarking_TurnStraight",
            json!({
                "width": tapered_width(2.4, 0.6),
                "color": fadeout(MARKING_WHITE, add),
                "pattern": [
                    "pattern",
                    "doubledash",
                    meters_to_pixels(json!(4)),
                    tapered_width(0.8, 0.2),
                    meters_to_pixels(json!(4)),
                    meters_to_pixels(json!(2))
                ],
                "startCap": "butt",
                "endCap": "butt"
            }),
            MARKING_ADD_MIN_ZOOM,
        ),
        line_marking(
            "LinearMarking_save_island_contour",
            json!({
                "width": tapered_width(0.8, 0.2),
                "color": fadeout(MARKING_WHITE, main)
            }),
            MARKING_MIN_ZOOM,
        ),
    ]
}

fn polygon_markings() -> Vec<(&'static str, LayerTemplate)> {
    let main = z(MARKING_MIN_ZOOM);
    let add = z(MARKING_ADD_MIN_ZOOM);
    let polygon = |name: &'static str, style: Value| {
        (
            name,
            LayerTemplate::new("polygon", sublayer_is(name), style, MARKING_MIN_ZOOM),
        )
    };

    vec![
        polygon(
            "PolygonMarkings_save_island",
            json!({ "color": fadeout("#505050", main) }),
        ),
        polygon(
            "PolygonMarkings_save_island_strokes",
            json!({ "color": fadeout(MARKING_WHITE, main) }),
        ),
        polygon(
            "PolygonMarkings_waffle",
            json!({
                "strokeColor": fadeout(&format!("{}60", MARKING_YELLOW), main),
                "strokeWidth": meters_to_pixels(json!(0.1)),
                "color": linear_change_color(
                    ROADBED_ASPHALT,
                    z(ROADBED_MIN_ZOOM),
                    ROADBED_ASPHALT_DARK,
                    z(ROADBED_MAX_ZOOM)
                ),
                "textureSize": [51, 51],
                "textureImage": "waffle",
                "textureOpacity": ["interpolate", ["linear"], ["zoom"], zoom(add + 0.1), 0, zoom(add), 0.7]
            }),
        ),
    ]
}

fn point_markings(directions: Value) -> Vec<(&'static str, LayerTemplate)> {
    let main = z(MARKING_MIN_ZOOM);
    let sign = |name: &'static str, icon: Value, width: f64, height: f64| {
        (
            name,
            LayerTemplate::new(
                "metricPoint",
                sublayer_is(name),
                json!({
                    "iconImage": icon,
                    "color": fadeout(MARKING_POINT, main),
                    "rotation": ["get", "db_rotation_angle"],
                    "width": width,
                    "height": height
                }),
                MARKING_MIN_ZOOM,
            ),
        )
    };

    vec![
        sign("PointMarkings_lane_directions", directions, 2.4, 4.6),
        sign(
            "PointMarkings_public_transport",
            json!("immersive-sign-bus-line"),
            1.8,
            3.2,
        ),
        sign(
            "PointMarkings_ParkingHandicapped",
            json!("immersive-sign-disabled-person"),
            2.2,
            3.2,
        ),
        sign(
            "PointMarkings_ParkingElectricFilling",
            json!("immersive-sign-electroparking"),
            1.8,
            3.2,
        ),
        sign(
            "PointMarkings_Triangle",
            json!("immersive-sign-give-way"),
            1.8,
            4.2,
        ),
    ]
}

fn overpass_layers() -> Vec<(&'static str, LayerTemplate)> {
    let roadbed = z(ROADBED_MIN_ZOOM);

    vec![
        (
            "EmbankmentPolygon",
            LayerTemplate::new(
                "embankment",
                immersive_filter("sublayer", &["Embankment_polygon"]),
                json!({
                    "color": fadeout(EMBANKMENT_GREEN, roadbed),
                    "visibility": "visible",
                    "textureSize": [128, 128],
                    "textureImage": "dust_texture"
                }),
                OVERPASS_MIN_ZOOM,
            ),
        ),
        (
            "Roadbed",
            LayerTemplate::new(
                "overpass",
                immersive_filter("sublayer", &["Roadbed", "Road_bed_outline", "Roadbed_outline"]),
                json!({
                    "color": linear_change_color(
                        ROADBED_ASPHALT,
                        roadbed,
                        ROADBED_ASPHALT_DARK,
                        z(ROADBED_MAX_ZOOM)
                    ),
                    "sideColor": ["interpolate", ["linear"], ["height"], 0, "#A6A9AD", 0.99, "#D9D9D9"],
                    "thickness": 0.5,
                    "visibility": "visible",
                    "borderWidth": 0.7,
                    "bottomColor": "#A6A9AD",
                    "strokeColor": "#D9D9D9",
                    "borderHeight": 0.3,
                    "borderTopColor": "#D9D9D9",
                    "nearCameraFade": 0
                }),
                OVERPASS_MIN_ZOOM,
            ),
        ),
        (
            "RoadSupport",
            LayerTemplate::new(
                "model",
                immersive_filter("db_sublayer", &["Road_support", "Road_support_new"]),
                json!({
                    "scale": [
                        "literal",
                        [
                            1,
                            1,
                            ["+", ["*", ["get", "db_nominal_height"], ["*", ["get", "db_level"], 5]], -0.3]
                        ]
                    ],
                    "modelSrc": "pillar",
                    "rotation": ["literal", [0, 0, ["get", "db_rotation_angle"]]],
                    "nearCameraFade": 1000
                }),
                OVERPASS_MIN_ZOOM,
            ),
        ),
    ]
}

fn roadbed_layers() -> Vec<(&'static str, LayerTemplate)> {
    vec![(
        "Roadbed",
        LayerTemplate::new(
            "polygon",
            immersive_filter("sublayer", &["Roadbed"]),
            json!({
                "color": linear_change_color(
                    ROADBED_ASPHALT,
                    z(ROADBED_MIN_ZOOM),
                    ROADBED_ASPHALT_DARK,
                    z(ROADBED_MAX_ZOOM)
                ),
                "visibility": "visible",
                "strokeWidth": ["interpolate", ["linear"], ["zoom"], 16, 1, 19, 3]
            }),
            ROADBED_MIN_ZOOM,
        ),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declares_three_slots_in_order() {
        let catalog = StyleCatalog::immersive();
        assert_eq!(
            catalog.slots.names().collect::<Vec<_>>(),
            vec!["overpassSlot", "markingsSlot", "roadbedSlot"]
        );
    }

    #[test]
    fn test_markings_slot_order() {
        let catalog = StyleCatalog::immersive();
        let keys: Vec<&str> = catalog
            .slots
            .get("markingsSlot")
            .unwrap()
            .templates
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();

        assert_eq!(keys.len(), 3 + 13 + 5);
        assert_eq!(keys[0], "PolygonMarkings_save_island");
        assert_eq!(keys[3], "LinearMarking_Broken");
        assert_eq!(keys[16], "PointMarkings_lane_directions");
    }

    #[test]
    fn test_lane_icon_codes_match_their_names() {
        use crate::lanes::direction_code;

        let catalog = StyleCatalog::immersive();
        assert_eq!(catalog.lane_icons.len(), 11);
        for (code, icon) in &catalog.lane_icons {
            // The sharply/turnover icons use '-' inside tokens, so only
            // check icons built from single-word tokens.
            if !icon.contains("sharply") && !icon.contains("turnover") {
                assert_eq!(direction_code(icon), *code, "{}", icon);
            }
        }
    }

    #[test]
    fn test_lane_directions_layer_uses_matcher() {
        let catalog = StyleCatalog::immersive();
        let (_, template) = &catalog.slots.get("markingsSlot").unwrap().templates[16];
        let icon_image = &template.style["iconImage"];

        assert_eq!(icon_image[0], json!("match"));
        assert_eq!(icon_image[2], json!([2]));
        assert_eq!(icon_image[3], json!("immersive-straight"));
        assert_eq!(icon_image.as_array().unwrap().last(), Some(&json!("")));
    }

    #[test]
    fn test_roads_group_and_assets() {
        let catalog = StyleCatalog::immersive();
        assert_eq!(catalog.roads_group_id.as_deref(), Some("515493"));
        assert_eq!(catalog.textures.len(), 9);
        assert_eq!(catalog.models, vec![("pillar".to_string(), "pillar".to_string())]);
    }

    #[test]
    fn test_waffle_stroke_fades_from_transparent_yellow() {
        let catalog = StyleCatalog::immersive();
        let (_, waffle) = &catalog.slots.get("markingsSlot").unwrap().templates[2];
        assert_eq!(waffle.style["strokeColor"][4], json!("#EBE74D00"));
        assert_eq!(waffle.style["strokeColor"][6], json!("#EBE74D60"));
    }
}
