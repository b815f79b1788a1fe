//! Configuration loading.
//!
//! Layers, lowest precedence first: built-in defaults, optional TOML file,
//! provider keys. Backend URLs are resolved from the provider last, then the
//! result is validated.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::config::provider::ConfigProvider;
use crate::config::schema::{GatewayConfig, LogFormat};
use crate::config::validation::{validate_config, ValidationError};

/// Provider key naming an optional TOML config file.
pub const CONFIG_FILE_KEY: &str = "GATEWAY_CONFIG";

/// Error type for configuration loading. Always fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("route '{route}' requires configuration key {key}")]
    MissingKey { route: String, key: String },

    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load, resolve and validate configuration.
///
/// `file` takes precedence over the `GATEWAY_CONFIG` provider key.
pub fn load_config(
    provider: &dyn ConfigProvider,
    file: Option<&Path>,
) -> Result<GatewayConfig, ConfigError> {
    let file = file
        .map(Path::to_path_buf)
        .or_else(|| provider.get(CONFIG_FILE_KEY).map(PathBuf::from));

    let mut config = match file {
        Some(path) => load_file(&path)?,
        None => GatewayConfig::default(),
    };

    apply_overrides(&mut config, provider)?;
    resolve_backends(&mut config, provider)?;

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Parse a TOML file without validating it.
pub fn load_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Apply scalar overrides from provider keys.
pub fn apply_overrides(
    config: &mut GatewayConfig,
    provider: &dyn ConfigProvider,
) -> Result<(), ConfigError> {
    if let Some(port) = parse_key(provider, "PORT")? {
        config.listener.port = port;
    }

    let rl = &mut config.rate_limit;
    if let Some(enabled) = parse_key(provider, "RATE_LIMIT_ENABLED")? {
        rl.enabled = enabled;
    }
    if let Some(secs) = parse_key(provider, "RATE_LIMIT_WINDOW_SECS")? {
        rl.window_secs = secs;
    }
    if let Some(max) = parse_key(provider, "RATE_LIMIT_MAX_REQUESTS")? {
        rl.max_requests = max;
    }
    if let Some(hops) = parse_key(provider, "TRUST_PROXY_HOPS")? {
        rl.trusted_proxy_hops = hops;
    }

    if let Some(secs) = parse_key(provider, "UPSTREAM_TIMEOUT_SECS")? {
        config.timeouts.upstream_secs = Some(secs);
    }
    if let Some(secs) = parse_key(provider, "UPSTREAM_CONNECT_TIMEOUT_SECS")? {
        config.timeouts.connect_secs = Some(secs);
    }

    let obs = &mut config.observability;
    if let Some(level) = provider.get("LOG_LEVEL") {
        obs.log_level = level;
    }
    if let Some(format) = provider.get("LOG_FORMAT") {
        obs.log_format = match format.to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: "LOG_FORMAT".to_string(),
                    value: format,
                    reason: "expected 'pretty' or 'json'".to_string(),
                })
            }
        };
    }
    if let Some(addr) = provider.get("METRICS_ADDRESS") {
        obs.metrics_address = Some(addr);
    }

    Ok(())
}

/// Fill each route's `backend_url` from its `backend_key`.
///
/// A route that names a key the provider does not have is a fatal error.
pub fn resolve_backends(
    config: &mut GatewayConfig,
    provider: &dyn ConfigProvider,
) -> Result<(), ConfigError> {
    for route in &mut config.routes {
        let Some(key) = &route.backend_key else {
            continue;
        };
        match provider.get(key) {
            Some(url) => route.backend_url = Some(url),
            None if route.backend_url.is_some() => {}
            None => {
                return Err(ConfigError::MissingKey {
                    route: route.name.clone(),
                    key: key.clone(),
                })
            }
        }
    }
    Ok(())
}

fn parse_key<T>(provider: &dyn ConfigProvider, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match provider.get(key) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                reason: e.to_string(),
                value,
            }),
    }
}
