//! Settings structs, one per `[section]` of the config file.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::upload::BackendConfig;

/// Complete configuration loaded from the INI file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub backend: BackendSettings,
    /// Upload registry: style name → backend project id.
    pub targets: BTreeMap<String, String>,
    pub logging: LoggingSettings,
}

/// `[backend]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSettings {
    /// OAuth endpoint root
    pub auth_url: String,
    /// Styles-editor API root
    pub styles_url: String,
    pub client_id: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Log file path; relative paths are resolved against the working directory.
    pub file: PathBuf,
}

impl ConfigFile {
    /// Project id registered for `style_name`.
    pub fn target(&self, style_name: &str) -> Option<&str> {
        self.targets.get(style_name).map(String::as_str)
    }

    /// Backend connection settings for the uploader.
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            auth_url: self.backend.auth_url.clone(),
            styles_url: self.backend.styles_url.clone(),
            client_id: self.backend.client_id.clone(),
            timeout_secs: self.backend.timeout_secs,
        }
    }
}
