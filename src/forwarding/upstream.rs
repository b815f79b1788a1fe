//! Outbound HTTP transport.
//!
//! # Responsibilities
//! - Send a prepared request to a backend and hand back its streaming response
//! - Classify transport failures (connect vs protocol)
//!
//! # Design Decisions
//! - `Upstream` is a trait object so the engine can be exercised without sockets
//! - One pooled hyper client shared by all routes
//! - No retries at this layer or above

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::TimeoutConfig;
use crate::forwarding::error::{error_chain, UpstreamError};

pub type UpstreamFuture =
    Pin<Box<dyn Future<Output = Result<Response<Body>, UpstreamError>> + Send + 'static>>;

/// A transport that performs exactly one backend call per `send`.
pub trait Upstream: Send + Sync {
    fn send(&self, request: Request<Body>) -> UpstreamFuture;
}

/// hyper-util legacy client over plain HTTP.
#[derive(Clone)]
pub struct HttpUpstream {
    client: Client<HttpConnector, Body>,
}

impl HttpUpstream {
    pub fn new(timeouts: &TimeoutConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(timeouts.connect_secs.map(Duration::from_secs));
        connector.set_nodelay(true);

        let client = Client::builder(TokioExecutor::new()).build(connector);
        Self { client }
    }
}

impl Default for HttpUpstream {
    fn default() -> Self {
        Self::new(&TimeoutConfig::default())
    }
}

impl Upstream for HttpUpstream {
    fn send(&self, request: Request<Body>) -> UpstreamFuture {
        let response = self.client.request(request);
        Box::pin(async move {
            match response.await {
                Ok(response) => Ok(relay(response)),
                Err(e) => Err(classify(&e)),
            }
        })
    }
}

/// The backend body streams through as-is.
fn relay(response: Response<Incoming>) -> Response<Body> {
    response.map(Body::new)
}

fn classify(err: &hyper_util::client::legacy::Error) -> UpstreamError {
    let message = error_chain(err);
    if err.is_connect() {
        UpstreamError::Connect(message)
    } else {
        UpstreamError::Protocol(message)
    }
}
