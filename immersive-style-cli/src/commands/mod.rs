//! Style commands.
//!
//! Command pattern with trait-based dependency injection:
//!
//! - `traits`: Core interfaces (`Output`, `StyleService`, `CommandHandler`)
//! - `services`: Concrete implementations of the traits
//! - `args`: clap-derived argument types
//! - `handlers`: One handler per subcommand
//!
//! ```ignore
//! let output = ConsoleOutput::new();
//! let styles = DefaultStyleService::new(layout, config.backend_config());
//! let ctx = CommandContext::new(&output, &styles, &config);
//! ComposeHandler::execute(args, &ctx)?;
//! ```

mod args;
mod handlers;
mod services;
mod traits;

#[cfg(test)]
mod tests;

pub use args::Commands;
pub use handlers::{ComposeHandler, LaneCodesHandler, UploadHandler};
pub use services::{ConsoleOutput, DefaultStyleService};
pub use traits::{CommandContext, CommandHandler};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Dispatch a subcommand with production services.
pub fn run(command: Commands, runner: &CliRunner) -> Result<(), CliError> {
    let output = ConsoleOutput::new();
    let styles = DefaultStyleService::new(
        runner.layout().clone(),
        runner.config().backend_config(),
    );
    let ctx = CommandContext::new(&output, &styles, runner.config());

    match command {
        Commands::Compose(args) => {
            runner.log_startup("compose");
            ComposeHandler::execute(args, &ctx)
        }
        Commands::Upload(args) => {
            runner.log_startup("upload");
            UploadHandler::execute(args, &ctx)
        }
        Commands::LaneCodes(args) => {
            runner.log_startup("lane-codes");
            LaneCodesHandler::execute(args, &ctx)
        }
    }
}
