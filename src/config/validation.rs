//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (0 < window <= one day, quota > 0, port > 0)
//! - Detect duplicate and malformed route prefixes
//! - Check every route has a usable backend URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::config::schema::{GatewayConfig, RouteConfig};

/// Longest accepted rate-limit window (one day).
pub const MAX_WINDOW_SECS: u64 = 86_400;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener port must be non-zero")]
    ZeroPort,

    #[error("no routes configured")]
    NoRoutes,

    #[error("route '{route}': prefix '{prefix}' must start with '/' and not end with '/'")]
    BadPrefix { route: String, prefix: String },

    #[error("route '{route}': prefix '{prefix}' is already used by an earlier route")]
    DuplicatePrefix { route: String, prefix: String },

    #[error("route '{route}': suffix '{suffix}' must be empty or start with '/'")]
    BadSuffix { route: String, suffix: String },

    #[error("route '{route}': no backend URL (set backend_url or backend_key)")]
    MissingBackend { route: String },

    #[error("route '{route}': backend URL '{url}' is invalid: {reason}")]
    BadBackendUrl {
        route: String,
        url: String,
        reason: String,
    },

    #[error("rate_limit.window_secs must be greater than zero")]
    ZeroWindow,

    #[error("rate_limit.window_secs must be at most {max}, got {value}")]
    WindowTooLong { value: u64, max: u64 },

    #[error("rate_limit.max_requests must be greater than zero")]
    ZeroQuota,
}

/// Validate a fully resolved configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    let mut seen = HashSet::new();
    for route in &config.routes {
        validate_route(route, &mut seen, &mut errors);
    }

    if config.rate_limit.enabled {
        if config.rate_limit.window_secs == 0 {
            errors.push(ValidationError::ZeroWindow);
        } else if config.rate_limit.window_secs > MAX_WINDOW_SECS {
            errors.push(ValidationError::WindowTooLong {
                value: config.rate_limit.window_secs,
                max: MAX_WINDOW_SECS,
            });
        }
        if config.rate_limit.max_requests == 0 {
            errors.push(ValidationError::ZeroQuota);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_route<'a>(
    route: &'a RouteConfig,
    seen: &mut HashSet<&'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let prefix = route.prefix.as_str();
    if !prefix.starts_with('/') || (prefix.len() > 1 && prefix.ends_with('/')) {
        errors.push(ValidationError::BadPrefix {
            route: route.name.clone(),
            prefix: route.prefix.clone(),
        });
    } else if !seen.insert(prefix) {
        errors.push(ValidationError::DuplicatePrefix {
            route: route.name.clone(),
            prefix: route.prefix.clone(),
        });
    }

    if !route.suffix.is_empty() && !route.suffix.starts_with('/') {
        errors.push(ValidationError::BadSuffix {
            route: route.name.clone(),
            suffix: route.suffix.clone(),
        });
    }

    match &route.backend_url {
        None => errors.push(ValidationError::MissingBackend {
            route: route.name.clone(),
        }),
        Some(url) => {
            if let Err(reason) = check_backend_url(url) {
                errors.push(ValidationError::BadBackendUrl {
                    route: route.name.clone(),
                    url: url.clone(),
                    reason,
                });
            }
        }
    }
}

/// Backends are plain HTTP origins with an optional base path.
pub(crate) fn check_backend_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if url.scheme() != "http" {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("query and fragment are not allowed".to_string());
    }
    Ok(())
}
