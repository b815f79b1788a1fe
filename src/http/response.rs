//! Gateway-generated responses.
//!
//! # Responsibilities
//! - Report forwarding failures: one error event, one uniform 500
//! - Build the explicit no-route 404
//! - Build the 429 rate-limit rejection
//!
//! # Design Decisions
//! - Plain-text bodies; clients never see a backend-specific format for
//!   transport failures
//! - Backend responses are never rewritten here (see forwarding::engine)

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::forwarding::GatewayError;
use crate::observability::metrics;
use crate::routing::RouteNotFound;

/// Convert a forwarding failure into the client response.
///
/// Emits exactly one error-level event. Terminal for the request.
pub fn report(error: &GatewayError) -> Response {
    tracing::error!(
        kind = %error.kind,
        path = %error.path,
        "{}",
        error
    );
    metrics::record_forward_error(error.kind);
    (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()).into_response()
}

/// 404 for a path no route claims.
pub fn no_route(error: &RouteNotFound) -> Response {
    (StatusCode::NOT_FOUND, error.to_string()).into_response()
}

/// 429 with the fixed message and a `Retry-After` hint in whole seconds.
pub fn rate_limited(message: &str, retry_after: Duration) -> Response {
    let secs = retry_after
        .as_secs()
        .saturating_add(u64::from(retry_after.subsec_nanos() > 0));
    let mut response = (StatusCode::TOO_MANY_REQUESTS, message.to_string()).into_response();
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(secs));
    response
}
