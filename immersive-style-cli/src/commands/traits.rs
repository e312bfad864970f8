//! Core traits for the command handler pattern.
//!
//! Handlers depend only on these interfaces, so they can run against mocks.

use std::path::Path;

use crate::error::CliError;
use immersive_style::compose::ComposeReport;
use immersive_style::config::ConfigFile;
use immersive_style::lanes::LaneIconCode;
use immersive_style::upload::{Credentials, UploadReport};

/// Trait for outputting messages to the user.
pub trait Output: Send + Sync {
    /// Print a line of text.
    fn println(&self, message: &str);

    /// Print an empty line.
    fn newline(&self) {
        self.println("");
    }

    /// Print an indented line.
    fn indented(&self, message: &str) {
        self.println(&format!("  {}", message));
    }
}

/// Style operations used by the handlers.
pub trait StyleService: Send + Sync {
    /// Compose `styles/<name>` into `out/<name>`.
    fn compose(&self, name: &str) -> Result<ComposeReport, CliError>;

    /// Upload `out/<name>` to `project_id`.
    fn upload(
        &self,
        name: &str,
        project_id: &str,
        credentials: &Credentials,
    ) -> Result<UploadReport, CliError>;

    /// Direction codes of the lane icons in `dir`.
    fn lane_codes(&self, dir: &Path) -> Result<Vec<LaneIconCode>, CliError>;

    /// Backend credentials from the environment.
    fn credentials(&self) -> Result<Credentials, CliError>;
}

/// Dependencies handed to every command handler.
pub struct CommandContext<'a> {
    pub output: &'a dyn Output,
    pub styles: &'a dyn StyleService,
    pub config: &'a ConfigFile,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        output: &'a dyn Output,
        styles: &'a dyn StyleService,
        config: &'a ConfigFile,
    ) -> Self {
        Self {
            output,
            styles,
            config,
        }
    }
}

/// Trait for command handlers.
pub trait CommandHandler {
    /// The arguments type for this handler.
    type Args;

    /// Execute the command with the given arguments and context.
    fn execute(args: Self::Args, ctx: &CommandContext<'_>) -> Result<(), CliError>;
}
