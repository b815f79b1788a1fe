//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, query)
//!     → router.rs (route lookup, registration order)
//!     → matcher.rs (segment-aware prefix test)
//!     → Return: matched Route or RouteNotFound
//!
//! Route Compilation (at startup):
//!     RouteConfig[] (backend URLs resolved)
//!     → Compile prefix matchers
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by registration)

pub mod matcher;
pub mod router;

pub use router::{Route, RouteNotFound, RouteTable};
