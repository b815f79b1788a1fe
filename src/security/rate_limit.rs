//! Fixed-window rate limiting middleware.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;

use crate::config::RateLimitConfig;
use crate::http::response;
use crate::observability::metrics;
use crate::security::forwarded::client_identity;

/// Counter for one client's current window.
#[derive(Debug, Clone, Copy)]
struct Window {
    start: Instant,
    count: u32,
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted { remaining: u32 },
    Rejected { retry_after: Duration },
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted { .. })
    }
}

/// Per-client fixed-window counter.
///
/// The counter update for a key happens under its DashMap shard lock, so
/// concurrent requests from one client see a strict increment-and-compare.
/// Rejected requests still count against the window.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    windows: DashMap<String, Window>,
    window: Duration,
    max_requests: u32,
}

impl FixedWindowLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            windows: DashMap::new(),
            window,
            max_requests,
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(Duration::from_secs(config.window_secs), config.max_requests)
    }

    pub fn admit(&self, client: &str) -> Admission {
        self.admit_at(client, Instant::now())
    }

    /// Admission check against an explicit clock reading.
    pub fn admit_at(&self, client: &str, now: Instant) -> Admission {
        let mut entry = self
            .windows
            .entry(client.to_string())
            .or_insert(Window { start: now, count: 0 });

        if now.saturating_duration_since(entry.start) > self.window {
            entry.start = now;
            entry.count = 0;
        }

        entry.count = entry.count.saturating_add(1);

        if entry.count > self.max_requests {
            // Windows too long to land on the clock report their full length.
            let retry_after = entry
                .start
                .checked_add(self.window)
                .map_or(self.window, |resets_at| resets_at.saturating_duration_since(now));
            Admission::Rejected { retry_after }
        } else {
            Admission::Admitted {
                remaining: self.max_requests - entry.count,
            }
        }
    }

    /// Drop windows that have fully elapsed. Returns how many were removed.
    pub fn purge_expired(&self, now: Instant) -> usize {
        let before = self.windows.len();
        self.windows
            .retain(|_, w| now.saturating_duration_since(w.start) <= self.window);
        before.saturating_sub(self.windows.len())
    }

    /// Number of clients with a live window.
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }

    /// Periodically purge expired windows until the task is aborted.
    pub async fn run_sweeper(self: Arc<Self>) {
        let mut ticker = tokio::time::interval(self.window);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = self.purge_expired(Instant::now());
            if removed > 0 {
                tracing::debug!(removed, remaining = self.tracked_clients(), "Purged expired rate-limit windows");
            }
        }
    }
}

/// State for the rate limiting middleware.
#[derive(Debug, Clone)]
pub struct RateLimiterState {
    pub limiter: Arc<FixedWindowLimiter>,
    pub trusted_proxy_hops: usize,
    pub message: Arc<str>,
}

impl RateLimiterState {
    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self {
            limiter: Arc::new(FixedWindowLimiter::from_config(config)),
            trusted_proxy_hops: config.trusted_proxy_hops,
            message: Arc::from(config.message.as_str()),
        }
    }
}

/// Middleware function for per-client rate limiting. Runs before routing.
pub async fn rate_limit_middleware(
    State(state): State<RateLimiterState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let client = client_identity(request.headers(), peer, state.trusted_proxy_hops);

    match state.limiter.admit(&client) {
        Admission::Admitted { remaining } => {
            tracing::debug!(client = %client, remaining, "Request admitted");
            next.run(request).await
        }
        Admission::Rejected { retry_after } => {
            tracing::warn!(client = %client, path = %request.uri().path(), "Rate limit exceeded");
            metrics::record_rate_limited();
            response::rate_limited(&state.message, retry_after)
        }
    }
}
