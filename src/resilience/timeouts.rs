//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap backend calls with an optional response timeout
//! - Cancel operations cleanly on timeout
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - `None` means the transport default applies (no extra deadline)
//! - Timeout errors are distinct from other upstream errors

use std::future::Future;
use std::time::Duration;

use crate::forwarding::error::UpstreamError;

/// Await `call`, failing with `UpstreamError::Timeout` after `limit`.
///
/// Dropping the inner future on expiry releases its backend connection.
pub async fn with_timeout<F, T>(limit: Option<Duration>, call: F) -> Result<T, UpstreamError>
where
    F: Future<Output = Result<T, UpstreamError>>,
{
    match limit {
        None => call.await,
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| UpstreamError::Timeout(limit))?,
    }
}
