//! Forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Admitted request + matched Route
//!     → engine.rs (rewrite URI to base_url + suffix + remainder)
//!     → resilience::timeouts (optional response deadline)
//!     → upstream.rs (single hyper client call)
//!     → backend Response relayed, or GatewayError
//! ```
//!
//! # Design Decisions
//! - Streaming both ways; nothing is buffered by the gateway
//! - Exactly one upstream call per request
//! - Errors are values, not callbacks: the HTTP layer reports them

pub mod engine;
pub mod error;
pub mod upstream;

pub use engine::ForwardingEngine;
pub use error::{ForwardErrorKind, GatewayError, UpstreamError};
pub use upstream::{HttpUpstream, Upstream, UpstreamFuture};
