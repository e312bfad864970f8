//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
/// `[targets]` entries are added to the built-in registry, overriding a
/// built-in target of the same name.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [backend] section
    if let Some(section) = ini.section(Some("backend")) {
        if let Some(v) = section.get("auth_url") {
            config.backend.auth_url = parse_url("auth_url", v)?;
        }
        if let Some(v) = section.get("styles_url") {
            config.backend.styles_url = parse_url("styles_url", v)?;
        }
        if let Some(v) = section.get("client_id") {
            let v = v.trim();
            if !v.is_empty() {
                config.backend.client_id = v.to_string();
            }
        }
        if let Some(v) = section.get("timeout_secs") {
            config.backend.timeout_secs = match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigFileError::InvalidValue {
                        section: "backend".to_string(),
                        key: "timeout_secs".to_string(),
                        value: v.to_string(),
                        reason: "must be a positive integer (seconds)".to_string(),
                    });
                }
            };
        }
    }

    // [targets] section
    if let Some(section) = ini.section(Some("targets")) {
        for (name, id) in section.iter() {
            let id = id.trim();
            if id.is_empty() {
                return Err(ConfigFileError::InvalidValue {
                    section: "targets".to_string(),
                    key: name.to_string(),
                    value: id.to_string(),
                    reason: "project id must not be empty".to_string(),
                });
            }
            config.targets.insert(name.trim().to_string(), id.to_string());
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = PathBuf::from(v);
            }
        }
    }

    Ok(config)
}

/// Trims trailing slashes so paths can be appended with `/`.
fn parse_url(key: &str, value: &str) -> Result<String, ConfigFileError> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigFileError::InvalidValue {
            section: "backend".to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "must be an http:// or https:// URL".to_string(),
        })
    }
}
