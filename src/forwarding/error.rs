//! Forwarding failure types.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Transport-level failure talking to a backend.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Could not establish a connection (refused, DNS, connect timeout).
    #[error("{0}")]
    Connect(String),

    /// The backend did not answer within the configured upstream timeout.
    #[error("upstream timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The connection broke or the backend spoke invalid HTTP.
    #[error("{0}")]
    Protocol(String),
}

impl UpstreamError {
    pub fn kind(&self) -> ForwardErrorKind {
        match self {
            UpstreamError::Connect(_) => ForwardErrorKind::Connect,
            UpstreamError::Timeout(_) => ForwardErrorKind::Timeout,
            UpstreamError::Protocol(_) => ForwardErrorKind::Protocol,
        }
    }
}

/// Classification of a forwarding failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForwardErrorKind {
    InvalidTarget,
    Connect,
    Timeout,
    Protocol,
}

impl ForwardErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForwardErrorKind::InvalidTarget => "invalid_target",
            ForwardErrorKind::Connect => "connect",
            ForwardErrorKind::Timeout => "timeout",
            ForwardErrorKind::Protocol => "protocol",
        }
    }
}

impl fmt::Display for ForwardErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed forwarding attempt, ready for the error reporter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Proxy Error: {message}")]
pub struct GatewayError {
    pub kind: ForwardErrorKind,
    pub message: String,
    /// Inbound request path that was being forwarded.
    pub path: String,
}

impl GatewayError {
    pub fn new(kind: ForwardErrorKind, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: path.into(),
        }
    }

    pub fn from_upstream(err: &UpstreamError, path: impl Into<String>) -> Self {
        Self::new(err.kind(), err.to_string(), path)
    }
}

/// Flatten an error and its sources into one line.
///
/// hyper's top-level errors ("client error (Connect)") carry the useful
/// detail in their source chain.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
