//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!     → spans.rs (per-request span with request ID)
//!
//! Consumers:
//!     → Log sinks (stdout, file, aggregation): outside the gateway
//!     → Metrics endpoint (Prometheus scrape), when configured
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON or pretty) for machine parsing
//! - Forwarding failures are the only error-level events on the request path
//! - Metrics are cheap (no-ops when no recorder is installed)

pub mod logging;
pub mod metrics;
pub mod spans;
