//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (axum::serve, connect info attached)
//!     → server.rs (TraceLayer span, rate-limit middleware)
//!     → server.rs gateway_handler (route lookup)
//!     → forwarding engine (backend call)
//!     → backend response relayed, or response.rs (404 / 429 / 500)
//!     → Send to client
//! ```

pub mod response;
pub mod server;

pub use server::{AppState, GatewayServer};
