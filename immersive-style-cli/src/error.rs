//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use immersive_style::compose::ComposeError;
use immersive_style::config::ConfigFileError;
use immersive_style::upload::{BackendError, UploadError, PASSWORD_VAR, USERNAME_VAR};

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error (config file, unknown style, credentials)
    Config(String),
    /// Composing a style failed
    Compose(ComposeError),
    /// Uploading a style failed
    Upload(UploadError),
    /// Failed to list lane icon codes
    LaneCodes { path: PathBuf, error: std::io::Error },
    /// Failed to create the HTTP client
    HttpClient(BackendError),
    /// Failed to start the async runtime
    Runtime(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Compose(e) if e.is_validation() => {
                eprintln!();
                eprintln!("Each slot needs an anchor layer with the same id in the base style,");
                eprintln!("either at the top level or directly inside a group layer.");
            }
            CliError::Upload(UploadError::Credentials(_)) => {
                eprintln!();
                eprintln!("Set both credential variables before uploading:");
                eprintln!("  export {}=<username>", USERNAME_VAR);
                eprintln!("  export {}=<password>", PASSWORD_VAR);
            }
            CliError::Upload(UploadError::Style(_)) => {
                eprintln!();
                eprintln!("Run `immersive-style compose <name>` before uploading.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Compose(e) => write!(f, "Failed to compose style: {}", e),
            CliError::Upload(e) => write!(f, "Failed to upload style: {}", e),
            CliError::LaneCodes { path, error } => {
                write!(f, "Failed to read lane icons in '{}': {}", path.display(), error)
            }
            CliError::HttpClient(e) => write!(f, "{}", e),
            CliError::Runtime(msg) => write!(f, "Failed to start async runtime: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Compose(e) => Some(e),
            CliError::Upload(e) => Some(e),
            CliError::HttpClient(e) => Some(e),
            CliError::LaneCodes { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<ComposeError> for CliError {
    fn from(e: ComposeError) -> Self {
        CliError::Compose(e)
    }
}

impl From<UploadError> for CliError {
    fn from(e: UploadError) -> Self {
        CliError::Upload(e)
    }
}
