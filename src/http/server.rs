//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all gateway handler
//! - Wire up middleware (tracing span, rate limiting)
//! - Dispatch requests to the route table
//! - Forward requests to backends and report failures
//! - Serve until the shutdown signal fires

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::{DefaultOnFailure, TraceLayer};
use tracing::Level;

use crate::config::{ConfigError, GatewayConfig};
use crate::forwarding::ForwardingEngine;
use crate::http::response;
use crate::observability::metrics;
use crate::observability::spans::request_span;
use crate::routing::RouteTable;
use crate::security::{rate_limit_middleware, RateLimiterState};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub engine: Arc<ForwardingEngine>,
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
    routes: Arc<RouteTable>,
    limiter: Option<RateLimiterState>,
}

impl GatewayServer {
    /// Create a server that forwards through the pooled hyper client.
    pub fn new(config: GatewayConfig) -> Result<Self, ConfigError> {
        let engine = ForwardingEngine::from_config(&config.timeouts);
        Self::with_engine(config, engine)
    }

    /// Create a server around an existing forwarding engine.
    pub fn with_engine(config: GatewayConfig, engine: ForwardingEngine) -> Result<Self, ConfigError> {
        let routes = Arc::new(RouteTable::from_config(&config.routes)?);
        let limiter = config
            .rate_limit
            .enabled
            .then(|| RateLimiterState::from_config(&config.rate_limit));

        let state = AppState {
            routes: routes.clone(),
            engine: Arc::new(engine),
        };

        let router = Self::build_router(state, limiter.clone());
        Ok(Self {
            router,
            config,
            routes,
            limiter,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState, limiter: Option<RateLimiterState>) -> Router {
        let mut router = Router::new()
            .route("/{*path}", any(gateway_handler))
            .route("/", any(gateway_handler))
            .with_state(state);

        // Admission runs before route resolution.
        if let Some(limiter) = limiter {
            router = router.layer(middleware::from_fn_with_state(limiter, rate_limit_middleware));
        }

        router.layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_failure(DefaultOnFailure::new().level(Level::WARN)),
        )
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.routes.routes().len(),
            rate_limit = self.limiter.is_some(),
            "HTTP server starting"
        );

        let sweeper = self
            .limiter
            .as_ref()
            .map(|state| tokio::spawn(state.limiter.clone().run_sweeper()));

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();
        let served = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await;

        if let Some(sweeper) = sweeper {
            sweeper.abort();
        }
        served?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: resolve the route, forward, report failures.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let path = request.uri().path().to_string();

    let route = match state.routes.resolve(&path) {
        Ok(route) => route,
        Err(err) => {
            tracing::warn!(method = %request.method(), path = %path, "No route matched");
            metrics::record_request(metrics::NO_ROUTE, 404, start_time);
            return response::no_route(&err);
        }
    };

    match state.engine.forward(request, route).await {
        Ok(upstream) => {
            metrics::record_request(route.name(), upstream.status().as_u16(), start_time);
            upstream
        }
        Err(err) => {
            metrics::record_request(route.name(), 500, start_time);
            response::report(&err)
        }
    }
}
