//! Edge gateway library.
//!
//! Prefix-routed HTTP gateway: admits requests through a per-client
//! fixed-window limiter, resolves a backend by path prefix and streams the
//! request there, relaying the backend's response unchanged.

pub mod config;
pub mod forwarding;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod routing;
pub mod security;

pub use config::{load_config, ConfigError, ConfigProvider, EnvProvider, GatewayConfig};
pub use forwarding::{ForwardingEngine, GatewayError};
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
pub use routing::{Route, RouteTable};
