//! Configuration for the immersive-style tools.
//!
//! Settings come from an INI file (default `./immersive-style.ini`). Every
//! key is optional; a missing file yields the defaults.
//!
//! ```ini
//! [backend]
//! auth_url = https://api.auth.2gis.com/2.1
//! styles_url = https://styles-editor.api.2gis.com
//! client_id = online
//! timeout_secs = 60
//!
//! [targets]
//! online = 9c73b6cf-5d37-44a2-9a3e-68737b72d9a4
//!
//! [logging]
//! file = logs/immersive-style.log
//! ```

mod defaults;
mod file;
mod parser;
mod settings;

pub use defaults::{
    DEFAULT_CONFIG_FILE, DEFAULT_LOG_FILE, DEFAULT_TARGETS, DEFAULT_TIMEOUT_SECS,
};
pub use file::ConfigFileError;
pub use settings::{BackendSettings, ConfigFile, LoggingSettings};
