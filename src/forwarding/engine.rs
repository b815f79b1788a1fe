//! Forwarding engine.
//!
//! # Responsibilities
//! - Rewrite the inbound request URI to the route's backend target
//! - Hand the request to the upstream transport exactly once
//! - Relay the backend response untouched, including 4xx/5xx statuses
//!
//! # Design Decisions
//! - At-most-once: no retries, the proxied request may not be idempotent
//! - Method, headers and body stream through unchanged
//! - Failures come back as `GatewayError`, reported by the caller

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Extensions, Request, Response, Uri, Version};

use crate::config::TimeoutConfig;
use crate::forwarding::error::{ForwardErrorKind, GatewayError};
use crate::forwarding::upstream::{HttpUpstream, Upstream};
use crate::resilience::timeouts::with_timeout;
use crate::routing::Route;

pub struct ForwardingEngine {
    upstream: Arc<dyn Upstream>,
    upstream_timeout: Option<Duration>,
}

impl ForwardingEngine {
    pub fn new(upstream: Arc<dyn Upstream>, upstream_timeout: Option<Duration>) -> Self {
        Self {
            upstream,
            upstream_timeout,
        }
    }

    /// Engine backed by the pooled hyper client.
    pub fn from_config(timeouts: &TimeoutConfig) -> Self {
        Self::new(
            Arc::new(HttpUpstream::new(timeouts)),
            timeouts.upstream_secs.map(Duration::from_secs),
        )
    }

    /// Proxy `request` to `route`'s backend.
    pub async fn forward(
        &self,
        request: Request<Body>,
        route: &Route,
    ) -> Result<Response<Body>, GatewayError> {
        let path = request.uri().path().to_string();

        let target = route.target_uri(request.uri()).map_err(|e| {
            GatewayError::new(
                ForwardErrorKind::InvalidTarget,
                format!("invalid target for route {}: {}", route.name(), e),
                path.as_str(),
            )
        })?;

        tracing::debug!(
            route = route.name(),
            method = %request.method(),
            target = %target,
            "Forwarding request"
        );

        let outbound = into_outbound(request, target);
        with_timeout(self.upstream_timeout, self.upstream.send(outbound))
            .await
            .map_err(|e| GatewayError::from_upstream(&e, path))
    }
}

impl std::fmt::Debug for ForwardingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForwardingEngine")
            .field("upstream_timeout", &self.upstream_timeout)
            .finish_non_exhaustive()
    }
}

/// Re-target a request. The outbound leg always speaks HTTP/1.1; inbound
/// extensions (connect info, matched path) stay behind.
fn into_outbound(request: Request<Body>, target: Uri) -> Request<Body> {
    let (mut parts, body) = request.into_parts();
    parts.uri = target;
    parts.version = Version::HTTP_11;
    parts.extensions = Extensions::new();
    Request::from_parts(parts, body)
}
