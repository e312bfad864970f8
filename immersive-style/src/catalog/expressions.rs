//! Style expression helpers used by the layer catalog.
//!
//! Colors are `#RRGGBB` strings; helpers that fade a color keep its RGB
//! components and only zero the alpha channel.

use serde_json::{json, Value};

/// Zoom offset over which a faded color reaches full opacity.
pub const FADE_SPAN: f64 = 0.1;

/// Converts a zoom level to a JSON number, keeping integral levels integral.
pub fn zoom(level: f64) -> Value {
    if level.fract() == 0.0 && level.abs() < i64::MAX as f64 {
        json!(level as i64)
    } else {
        json!(level)
    }
}

/// Returns the fully transparent variant of `color` (`#RRGGBB00`).
///
/// Any alpha already present is replaced.
pub fn transparent(color: &str) -> String {
    format!("{}00", color.get(..7).unwrap_or(color))
}

/// Fades `color` in from transparent starting at `from_zoom`.
pub fn fadeout(color: &str, from_zoom: f64) -> Value {
    json!([
        "interpolate",
        ["linear"],
        ["zoom"],
        zoom(from_zoom),
        transparent(color),
        zoom(from_zoom + FADE_SPAN),
        color
    ])
}

/// Fades `from` in at `from_zoom`, then blends it into `to` by `to_zoom`.
pub fn linear_change_color(from: &str, from_zoom: f64, to: &str, to_zoom: f64) -> Value {
    json!([
        "interpolate",
        ["linear"],
        ["zoom"],
        zoom(from_zoom),
        transparent(from),
        zoom(from_zoom + FADE_SPAN),
        from,
        zoom(to_zoom),
        to
    ])
}

/// `["meters-to-pixels", value]`
pub fn meters_to_pixels(value: Value) -> Value {
    json!(["meters-to-pixels", value])
}

/// Linear interpolation over zoom between pairs of `(zoom, value)` stops.
pub fn zoom_interpolate(stops: &[(f64, f64)]) -> Value {
    let mut expression = vec![json!("interpolate"), json!(["linear"]), json!(["zoom"])];
    for (level, value) in stops {
        expression.push(zoom(*level));
        expression.push(json!(value));
    }
    Value::Array(expression)
}

/// `["==", ["get", "sublayer"], name]`
pub fn sublayer_is(name: &str) -> Value {
    json!(["==", ["get", "sublayer"], name])
}

/// Matches features whose `attribute` is one of `values`, gated on the
/// `immersiveRoadsOn` global.
pub fn immersive_filter(attribute: &str, values: &[&str]) -> Value {
    json!([
        "all",
        ["match", ["global", "immersiveRoadsOn"], [true], true, false],
        ["match", ["get", attribute], values, true, false]
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent() {
        assert_eq!(transparent("#E0E0E0"), "#E0E0E000");
        assert_eq!(transparent("#EBE74D60"), "#EBE74D00");
    }

    #[test]
    fn test_zoom_keeps_integers() {
        assert_eq!(zoom(16.0).to_string(), "16");
        assert_eq!(zoom(16.5).to_string(), "16.5");
    }

    #[test]
    fn test_fadeout() {
        assert_eq!(
            fadeout("#FFFFFF", 16.0),
            json!(["interpolate", ["linear"], ["zoom"], 16, "#FFFFFF00", 16.1, "#FFFFFF"])
        );
    }

    #[test]
    fn test_linear_change_color() {
        assert_eq!(
            linear_change_color("#C7C7C7", 16.0, "#B3B3B3", 18.0),
            json!([
                "interpolate", ["linear"], ["zoom"],
                16, "#C7C7C700", 16.1, "#C7C7C7", 18, "#B3B3B3"
            ])
        );
    }

    #[test]
    fn test_zoom_interpolate() {
        assert_eq!(
            zoom_interpolate(&[(16.0, 2.4), (18.0, 0.6)]),
            json!(["interpolate", ["linear"], ["zoom"], 16, 2.4, 18, 0.6])
        );
    }

    #[test]
    fn test_immersive_filter() {
        assert_eq!(
            immersive_filter("sublayer", &["Roadbed"]),
            json!([
                "all",
                ["match", ["global", "immersiveRoadsOn"], [true], true, false],
                ["match", ["get", "sublayer"], ["Roadbed"], true, false]
            ])
        );
    }
}
