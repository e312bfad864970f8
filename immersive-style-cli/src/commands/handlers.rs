//! Command handlers.
//!
//! Each handler implements `CommandHandler` and depends only on the
//! interfaces in `CommandContext`.

use super::args::{ComposeArgs, LaneCodesArgs, UploadArgs};
use super::traits::{CommandContext, CommandHandler};
use crate::error::CliError;

/// Handler for `compose <name>`.
pub struct ComposeHandler;

impl CommandHandler for ComposeHandler {
    type Args = ComposeArgs;

    fn execute(args: Self::Args, ctx: &CommandContext<'_>) -> Result<(), CliError> {
        let report = ctx.styles.compose(&args.name)?;

        ctx.output.println(&format!(
            "Composed '{}' into {}",
            report.style_name,
            report.output.display()
        ));
        ctx.output
            .indented(&format!("Assets copied:   {}", report.assets.len()));
        ctx.output
            .indented(&format!("Layers injected: {}", report.injected_layers));

        Ok(())
    }
}

/// Handler for `upload <name>`.
pub struct UploadHandler;

impl CommandHandler for UploadHandler {
    type Args = UploadArgs;

    fn execute(args: Self::Args, ctx: &CommandContext<'_>) -> Result<(), CliError> {
        // Resolved before touching credentials or the network.
        let project_id = ctx.config.target(&args.name).ok_or_else(|| {
            CliError::Config(format!(
                "No upload target registered for style '{}'. Add it to the [targets] section.",
                args.name
            ))
        })?;

        let credentials = ctx.styles.credentials()?;
        let report = ctx.styles.upload(&args.name, project_id, &credentials)?;

        ctx.output.println(&format!(
            "Published '{}' to project {}",
            report.style_name, report.project_id
        ));
        if report.assets.is_empty() {
            ctx.output.indented("No new assets");
        }
        for asset in &report.assets {
            ctx.output
                .indented(&format!("[{}] {}={}", asset.group, asset.name, asset.filename));
        }

        Ok(())
    }
}

/// Handler for `lane-codes <dir>`.
pub struct LaneCodesHandler;

impl CommandHandler for LaneCodesHandler {
    type Args = LaneCodesArgs;

    fn execute(args: Self::Args, ctx: &CommandContext<'_>) -> Result<(), CliError> {
        let codes = ctx.styles.lane_codes(&args.dir)?;

        for icon in &codes {
            if icon.is_unrecognized() {
                ctx.output.println(&format!(
                    "{}  {}  (no direction tokens recognized)",
                    icon.code, icon.file_name
                ));
            } else {
                ctx.output
                    .println(&format!("{}  {}", icon.code, icon.file_name));
            }
        }

        Ok(())
    }
}
