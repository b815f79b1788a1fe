//! Per-request spans.
//!
//! Every inbound request gets a span carrying a fresh UUID v4 request ID, so
//! the events emitted while forwarding it can be correlated. The ID lives in
//! the span only: forwarded headers stay untouched.

use axum::body::Body;
use axum::http::Request;
use tracing::Span;
use uuid::Uuid;

/// `make_span_with` hook for `TraceLayer`.
pub fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %request.method(),
        path = %request.uri().path(),
    )
}
