//! immersive-style - Immersive road layers for map styles
//!
//! This library turns a base map style into an "immersive" style carrying
//! road markings, overpasses and roadbeds, and publishes the result to the
//! styles-editor backend.
//!
//! # Components
//!
//! - [`compose`] - the offline Style Composer: hashes and copies catalog
//!   assets, injects slot layers into the base style, writes `out/<name>/`.
//! - [`upload`] - the online Style Uploader: authenticates, opens an edit
//!   session, uploads new assets, submits and publishes the draft.
//!
//! The two components share nothing but the filesystem layout described by
//! [`layout::StyleLayout`].
//!
//! ```ignore
//! use immersive_style::assets::Sha256Hasher;
//! use immersive_style::catalog::StyleCatalog;
//! use immersive_style::compose::Composer;
//! use immersive_style::layout::StyleLayout;
//!
//! let composer = Composer::new(StyleLayout::new("."), StyleCatalog::immersive(), Sha256Hasher);
//! let report = composer.compose("online")?;
//! println!("{} layers injected", report.injected_layers);
//! ```

pub mod assets;
pub mod catalog;
pub mod compose;
pub mod config;
pub mod lanes;
pub mod layout;
pub mod logging;
pub mod slots;
pub mod style;
pub mod upload;

/// Version of the immersive-style library and CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
