//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up matching route for request path
//! - Return matched route or explicit no-match
//! - Build the backend target URI for a matched request
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) path prefix scan in registration order (acceptable for typical route counts)
//! - Explicit RouteNotFound rather than silent default

use axum::http::uri::{InvalidUri, Uri};
use thiserror::Error;

use crate::config::{ConfigError, RouteConfig, ValidationError};
use crate::routing::matcher::PathPrefixMatcher;

/// No configured prefix matches the request path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No route for {path}")]
pub struct RouteNotFound {
    pub path: String,
}

/// A compiled prefix route.
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    matcher: PathPrefixMatcher,
    base_url: String,
    suffix: String,
}

impl Route {
    /// Create a route. Trailing slashes on `base_url` are dropped.
    pub fn new(
        name: impl Into<String>,
        prefix: impl Into<String>,
        base_url: &str,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            matcher: PathPrefixMatcher::new(prefix),
            base_url: base_url.trim_end_matches('/').to_string(),
            suffix: suffix.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        self.matcher.prefix()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Backend URI for an inbound request URI.
    ///
    /// `base_url + suffix + remainder`, where the remainder is the inbound path
    /// with this route's prefix removed ("/" when nothing is left). The query
    /// string is carried over untouched.
    pub fn target_uri(&self, inbound: &Uri) -> Result<Uri, InvalidUri> {
        let path = inbound.path();
        let remainder = match self.matcher.remainder(path) {
            Some("") | None => "/",
            Some(rest) => rest,
        };

        let mut target = String::with_capacity(
            self.base_url.len() + self.suffix.len() + remainder.len() + 16,
        );
        target.push_str(&self.base_url);
        target.push_str(&self.suffix);
        target.push_str(remainder);
        if let Some(query) = inbound.query() {
            target.push('?');
            target.push_str(query);
        }

        target.parse()
    }
}

/// Ordered, immutable route table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Compile resolved route configs. Every route must carry a backend URL.
    pub fn from_config(routes: &[RouteConfig]) -> Result<Self, ConfigError> {
        let mut compiled = Vec::with_capacity(routes.len());
        let mut errors = Vec::new();

        for cfg in routes {
            match &cfg.backend_url {
                Some(url) => compiled.push(Route::new(&cfg.name, &cfg.prefix, url, &cfg.suffix)),
                None => errors.push(ValidationError::MissingBackend {
                    route: cfg.name.clone(),
                }),
            }
        }

        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }
        Ok(Self::new(compiled))
    }

    /// First route, in registration order, whose prefix matches `path`.
    pub fn resolve(&self, path: &str) -> Result<&Route, RouteNotFound> {
        self.routes
            .iter()
            .find(|route| route.matcher.matches(path))
            .ok_or_else(|| RouteNotFound {
                path: path.to_string(),
            })
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

}
