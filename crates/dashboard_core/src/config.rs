use std::{fs, path::Path};

use serde::Deserialize;
use shared::error::ConfigError;
use tracing::{debug, warn};
use url::Url;

pub const SETTINGS_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub api_base: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base: Option<String>,
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file, then `API_BASE` and `APP__API_BASE`.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.api_base {
                    settings.api_base = Some(v);
                }
            }
            Err(err) => warn!("config: ignoring unreadable {}: {err}", path.display()),
        },
        Err(_) => debug!("config: no settings file at {}", path.display()),
    }

    if let Some(v) = env("API_BASE") {
        settings.api_base = Some(v);
    }
    if let Some(v) = env("APP__API_BASE") {
        settings.api_base = Some(v);
    }

    settings.api_base = non_blank(settings.api_base.as_deref());
    settings
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Immutable API configuration built once at startup. The origin is derived
/// from the base URL at construction and never recomputed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Option<String>,
    origin: Option<String>,
}

impl ApiConfig {
    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::from_base_url(settings.api_base.as_deref())
    }

    /// Never fails: a malformed base URL leaves the origin empty.
    pub fn from_base_url(raw: Option<&str>) -> Self {
        let base_url = non_blank(raw);
        let origin = base_url
            .as_deref()
            .and_then(|raw| match extract_origin(raw) {
                Ok(origin) => Some(origin),
                Err(err) => {
                    warn!("config: {err}; falling back to root-relative urls");
                    None
                }
            });

        Self { base_url, origin }
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }
}

/// Scheme, host and port of `raw`, with the default port elided.
pub fn extract_origin(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|err| ConfigError::InvalidBaseUrl {
        raw: raw.to_string(),
        reason: err.to_string(),
    })?;

    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(ConfigError::OpaqueOrigin {
            raw: raw.to_string(),
        });
    }

    Ok(origin.ascii_serialization())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
