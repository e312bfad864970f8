//! Default values for all configuration settings.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::settings::*;
use crate::upload::{DEFAULT_AUTH_URL, DEFAULT_CLIENT_ID, DEFAULT_STYLES_URL};

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "immersive-style.ini";

/// Log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "logs/immersive-style.log";

/// Request timeout for backend calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Built-in upload targets: style name → project id.
pub const DEFAULT_TARGETS: [(&str, &str); 1] = [("online", "9c73b6cf-5d37-44a2-9a3e-68737b72d9a4")];

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            styles_url: DEFAULT_STYLES_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            backend: BackendSettings::default(),
            targets: DEFAULT_TARGETS
                .iter()
                .map(|(name, id)| (name.to_string(), id.to_string()))
                .collect::<BTreeMap<_, _>>(),
            logging: LoggingSettings::default(),
        }
    }
}
