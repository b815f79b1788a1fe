//! Edge gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────────┐
//!                         │                   EDGE GATEWAY                    │
//!                         │                                                   │
//!   Client Request        │  ┌──────────┐   ┌──────────┐   ┌─────────────┐   │
//!   ──────────────────────┼─▶│ security │──▶│ routing  │──▶│ forwarding  │───┼──▶ Backend
//!                         │  │rate limit│   │  prefix  │   │   engine    │   │    Service
//!                         │  └────┬─────┘   └────┬─────┘   └──────┬──────┘   │
//!                         │       │ 429          │ 404            │ error    │
//!                         │       ▼              ▼                ▼          │
//!   Client Response       │  ┌─────────────────────────────────────────────┐ │
//!   ◀─────────────────────┼──│ http::response (reporter) / relayed backend │◀┼─── Backend
//!                         │  └─────────────────────────────────────────────┘ │    Response
//!                         │                                                   │
//!                         │  config · observability · lifecycle · resilience  │
//!                         └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use edge_gateway::config::{load_config, EnvProvider};
use edge_gateway::lifecycle::{signals, startup, Shutdown};
use edge_gateway::observability::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "edge-gateway")]
#[command(about = "Prefix-routed HTTP gateway with per-client rate limiting", long_about = None)]
struct Args {
    /// TOML config file (overrides GATEWAY_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Validate configuration, print the route table and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Fatal before anything binds.
    let config = load_config(&EnvProvider, args.config.as_deref())?;

    init_logging(&config.observability)?;

    if args.check {
        for route in &config.routes {
            println!(
                "{:<12} {:<24} -> {}{}",
                route.name,
                route.prefix,
                route.backend_url.as_deref().unwrap_or_default(),
                route.suffix
            );
        }
        return Ok(());
    }

    tracing::info!(
        port = config.listener.port,
        routes = config.routes.len(),
        rate_limit_window_secs = config.rate_limit.window_secs,
        rate_limit_max_requests = config.rate_limit.max_requests,
        "edge-gateway v0.1.0 starting"
    );

    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        trigger.trigger();
    });

    startup::start(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
