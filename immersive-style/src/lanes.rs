//! Lane direction bit-codes.
//!
//! Lane-direction icons are named after the directions they show, e.g.
//! `left-straight.svg`. Each direction token owns one bit; the code of an
//! icon is the OR of its tokens' bits. The same code is stored per feature in
//! the `db_lane_directions` attribute, so the renderer can pick an icon with
//! a `match` expression built by [`directions_matcher`].
//!
//! | Token                  | Bit  |
//! |------------------------|------|
//! | `straight`             | 2    |
//! | `right`                | 4    |
//! | `left`                 | 8    |
//! | `slightly_right`       | 16   |
//! | `slightly_left`        | 32   |
//! | `sharply_right`        | 64   |
//! | `sharply_left`         | 128  |
//! | `right_with_left_turn` | 256  |
//! | `on_circle`            | 512  |
//! | `turnover`             | 1024 |

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde_json::{json, Value};

/// Feature attribute holding a lane's direction code.
pub const LANE_DIRECTIONS_ATTRIBUTE: &str = "db_lane_directions";

/// Direction tokens and their bits.
pub const DIRECTION_TOKENS: [(&str, u32); 10] = [
    ("straight", 1 << 1),
    ("right", 1 << 2),
    ("left", 1 << 3),
    ("slightly_right", 1 << 4),
    ("slightly_left", 1 << 5),
    ("sharply_right", 1 << 6),
    ("sharply_left", 1 << 7),
    ("right_with_left_turn", 1 << 8),
    ("on_circle", 1 << 9),
    ("turnover", 1 << 10),
];

/// Separator between direction tokens in an icon filename.
const TOKEN_SEPARATOR: char = '-';

/// Returns the bit of a direction token, or 0 if the token is not recognized.
pub fn token_bit(token: &str) -> u32 {
    DIRECTION_TOKENS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, bit)| *bit)
        .unwrap_or(0)
}

/// Computes the direction code of an icon filename.
///
/// The extension (if any) is ignored. Unrecognized tokens, like the numeric
/// suffixes some icon sets carry (`left-0.svg`), contribute nothing.
pub fn direction_code(filename: &str) -> u32 {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);

    stem.split(TOKEN_SEPARATOR)
        .map(token_bit)
        .fold(0, |code, bit| code | bit)
}

/// Builds the icon-selection expression for lane direction markings.
///
/// ```text
/// ["match", ["get", "db_lane_directions"], [2], "icon-a", [4], "icon-b", ..., ""]
/// ```
///
/// Codes appear in ascending order; features with an unknown code get the
/// empty icon.
pub fn directions_matcher(lane_icons: &BTreeMap<u32, String>) -> Value {
    let mut expression = vec![json!("match"), json!(["get", LANE_DIRECTIONS_ATTRIBUTE])];

    for (code, icon) in lane_icons {
        expression.push(json!([code]));
        expression.push(json!(icon));
    }
    expression.push(json!(""));

    Value::Array(expression)
}

/// An icon file and its direction code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneIconCode {
    pub code: u32,
    pub file_name: String,
}

impl LaneIconCode {
    /// Returns true if none of the filename's tokens were recognized.
    pub fn is_unrecognized(&self) -> bool {
        self.code == 0
    }
}

/// Computes direction codes for every `.svg` file in `dir`.
///
/// Results are sorted by code, then by filename, so icons sharing a code are
/// listed next to each other.
pub fn code_names(dir: &Path) -> io::Result<Vec<LaneIconCode>> {
    let mut codes = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("svg") {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        codes.push(LaneIconCode {
            code: direction_code(&file_name),
            file_name,
        });
    }

    codes.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| a.file_name.cmp(&b.file_name)));
    Ok(codes)
}
