//! CLI runner for common setup.
//!
//! Loads the configuration and initializes logging once for every command.

use std::path::{Path, PathBuf};

use crate::error::CliError;
use immersive_style::config::{ConfigFile, DEFAULT_CONFIG_FILE};
use immersive_style::layout::StyleLayout;
use immersive_style::logging::{init_logging, LoggingGuard};
use tracing::info;

/// Global options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct RunnerOptions {
    /// Workspace root holding `styles/`, `out/` and `assets/`
    pub root: Option<PathBuf>,
    /// Config file path; defaults to `<root>/immersive-style.ini`
    pub config: Option<PathBuf>,
    pub debug: bool,
    /// Suppress log output on stdout
    pub quiet: bool,
}

/// Runner that manages CLI lifecycle.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    config: ConfigFile,
    layout: StyleLayout,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    pub fn new(options: &RunnerOptions) -> Result<Self, CliError> {
        let root = options.root.clone().unwrap_or_else(|| PathBuf::from("."));
        let config_path = options
            .config
            .clone()
            .unwrap_or_else(|| root.join(DEFAULT_CONFIG_FILE));

        // Load config file (or use defaults if not present)
        let config = ConfigFile::load_from(&config_path)?;

        let log_file = resolve(&root, &config.logging.file);
        let logging_guard = init_logging(&log_file, !options.quiet, options.debug)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
            layout: StyleLayout::new(root),
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn layout(&self) -> &StyleLayout {
        &self.layout
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("immersive-style v{}", immersive_style::VERSION);
        info!(root = %self.layout.root().display(), "immersive-style CLI: {} command", command);
    }
}

/// Resolves a relative path against the workspace root.
fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
