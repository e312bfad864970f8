//! Style document model.
//!
//! A style document is a JSON object with an ordered `layers` tree and two
//! asset maps (`icons` and `models`). Only the fields the composer and
//! uploader act on are typed; every other property is carried through
//! verbatim, in its original key order.

mod document;
mod error;

pub use document::{AssetGroup, Layer, StyleDocument, GROUP_LAYER_TYPE, UPLOAD_NAME_PREFIX};
pub use error::StyleError;
