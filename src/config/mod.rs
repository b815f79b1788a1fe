//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults (storefront route table)
//!     → loader.rs (optional TOML file)
//!     → provider.rs (PORT, *_MICROSERVICE, RATE_LIMIT_* keys)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → consumed once by GatewayServer at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults to allow minimal configs
//! - Any missing or invalid key is fatal before the listener binds
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod provider;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use provider::{ConfigProvider, EnvProvider};
pub use schema::{
    GatewayConfig, ListenerConfig, LogFormat, ObservabilityConfig, RateLimitConfig, RouteConfig,
    TimeoutConfig,
};
pub use validation::ValidationError;
