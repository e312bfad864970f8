//! immersive-style CLI
//!
//! Composes immersive map styles and publishes them to the styles backend.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::Parser;

use commands::Commands;
use runner::{CliRunner, RunnerOptions};

#[derive(Parser)]
#[command(name = "immersive-style")]
#[command(version = immersive_style::VERSION)]
#[command(about = "Compose and publish immersive map styles", long_about = None)]
struct Cli {
    /// Workspace root containing styles/, assets/ and out/
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Config file (default: <root>/immersive-style.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(long, global = true)]
    debug: bool,

    /// Only write logs to the log file
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    let options = RunnerOptions {
        root: cli.root,
        config: cli.config,
        debug: cli.debug,
        quiet: cli.quiet,
    };

    let result = CliRunner::new(&options).and_then(|runner| commands::run(cli.command, &runner));

    if let Err(e) = result {
        e.exit();
    }
}
