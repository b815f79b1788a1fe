//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → forwarded.rs (derive client address, one trusted hop)
//!     → rate_limit.rs (fixed-window quota per client)
//!     → Pass to routing
//! ```
//!
//! # Design Decisions
//! - Admission runs before routing: the quota is global, not per backend
//! - Rejections are expected traffic shaping, logged at warn
//! - No trust in client input beyond the configured proxy depth

pub mod forwarded;
pub mod rate_limit;

pub use rate_limit::{rate_limit_middleware, Admission, FixedWindowLimiter, RateLimiterState};
