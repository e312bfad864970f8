//! Argument types for style commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build out/<name> from styles/<name> with assets and slot layers injected
    Compose(ComposeArgs),

    /// Publish a composed style to its registered backend project
    Upload(UploadArgs),

    /// Print the direction bit-code of every lane icon in a directory
    LaneCodes(LaneCodesArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ComposeArgs {
    /// Style name (directory under styles/)
    pub name: String,
}

#[derive(Debug, Clone, Args)]
pub struct UploadArgs {
    /// Style name (directory under out/, registered in [targets])
    pub name: String,
}

#[derive(Debug, Clone, Args)]
pub struct LaneCodesArgs {
    /// Directory of lane icon SVGs
    pub dir: PathBuf,
}
