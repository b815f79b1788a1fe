//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive `Deserialize` so config files can be read with serde.

use serde::Deserialize;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Route definitions, evaluated in order.
    pub routes: Vec<RouteConfig>,

    /// Rate limiting configuration.
    pub rate_limit: RateLimitConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            routes: default_routes(),
            rate_limit: RateLimitConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// A prefix route binding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteConfig {
    /// Route identifier for logging/metrics.
    pub name: String,

    /// Literal path prefix to match (e.g., "/api/v1/auth").
    pub prefix: String,

    /// Provider key holding the backend base URL.
    #[serde(default)]
    pub backend_key: Option<String>,

    /// Backend base URL. Filled from `backend_key` at load time when absent.
    #[serde(default)]
    pub backend_url: Option<String>,

    /// Fixed path segment appended to the backend base URL (e.g., "/auth").
    #[serde(default)]
    pub suffix: String,
}

impl RouteConfig {
    /// Route whose base URL is read from `backend_key`.
    pub fn keyed(
        name: impl Into<String>,
        prefix: impl Into<String>,
        backend_key: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            backend_key: Some(backend_key.into()),
            backend_url: None,
            suffix: suffix.into(),
        }
    }

    /// Route with a literal base URL.
    pub fn direct(
        name: impl Into<String>,
        prefix: impl Into<String>,
        backend_url: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            backend_key: None,
            backend_url: Some(backend_url.into()),
            suffix: suffix.into(),
        }
    }
}

/// The complete storefront route set.
pub fn default_routes() -> Vec<RouteConfig> {
    [
        ("auth", "BASE_MICROSERVICE"),
        ("banners", "BASE_MICROSERVICE"),
        ("categories", "BASE_MICROSERVICE"),
        ("brands", "BRANDS_MICROSERVICE"),
        ("products", "PRODUCTS_MICROSERVICE"),
        ("blogs", "BLOGS_MICROSERVICE"),
        ("instagrams", "INSTAGRAM_MICROSERVICE"),
        ("orders", "ORDERS_MICROSERVICE"),
        ("services", "SERVICES_MICROSERVICE"),
        ("contacpime", "CONTACPIME_MICROSERVICE"),
    ]
    .into_iter()
    .map(|(name, key)| {
        RouteConfig::keyed(name, format!("/api/v1/{name}"), key, format!("/{name}"))
    })
    .collect()
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting.
    pub enabled: bool,

    /// Fixed window length in seconds.
    pub window_secs: u64,

    /// Maximum admitted requests per client per window.
    pub max_requests: u32,

    /// Number of `X-Forwarded-For` hops to trust when identifying clients.
    pub trusted_proxy_hops: usize,

    /// Body returned with 429 responses.
    pub message: String,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_secs: 120,
            max_requests: 100,
            trusted_proxy_hops: 1,
            message: "Too many requests, please try again later.".to_string(),
        }
    }
}

/// Timeout configuration for upstream calls. `None` keeps the transport default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: Option<u64>,

    /// Time allowed for the backend to produce response headers, in seconds.
    pub upstream_secs: Option<u64>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Prometheus exporter bind address; disabled when unset.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_address: None,
        }
    }
}
