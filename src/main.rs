//! Service gateway
//!
//! A small reverse proxy in front of a fixed set of backend services.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                   GATEWAY                    │
//!   Client Request       │  ┌────────┐   ┌──────────┐   ┌───────────┐   │
//!   ─────────────────────┼─▶│  http  │──▶│ routing  │──▶│   proxy   │───┼──▶ Backend
//!                        │  │ server │   │ /api/<s> │   │ forwarder │   │    /<s>/...
//!   Client Response      │  └────────┘   └──────────┘   └───────────┘   │
//!   ◀────────────────────┼──── JSON body, upstream status or 503/504/500│
//!                        │                                              │
//!   GET /health ─────────┼─▶ health aggregator ── one probe per backend ┼──▶ /health
//!                        └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use service_gateway::config::{load_from_env, validation::validate_config, ConfigError};
use service_gateway::lifecycle::startup;
use service_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "service-gateway")]
#[command(about = "Reverse proxy routing /api/<service> to backend services", long_about = None)]
struct Args {
    /// TOML configuration file; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = load_from_env(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init(&config.observability.log_level);
    tracing::info!("service-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await?;
    Ok(())
}
