//! Resilience subsystem.
//!
//! # Responsibilities
//! - Bound how long a request may wait on its backend
//!
//! # Design Decisions
//! - No retries: forwarding is at-most-once
//! - No circuit breaking: every admitted request reaches its backend
//! - Deadlines are opt-in; by default the transport's own behavior applies

pub mod timeouts;

pub use timeouts::with_timeout;
