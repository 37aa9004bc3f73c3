//! Test Backend (v1)
//!
//! A demonstration user API built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ handlers ──▶ users::UserStore
//!                       (middleware)      │
//!     ◀────────────── JSON response ◀─────┘
//!
//!     lifecycle::startup
//!         ├─ config (TOML + env overrides)
//!         ├─ agent (register, heartbeat, deregister)
//!         └─ signals (SIGINT/SIGTERM → bounded drain)
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use test_backend::config::load_or_default;
use test_backend::observability::{logging, metrics};
use test_backend::Application;

#[derive(Parser)]
#[command(name = "test-backend")]
#[command(about = "Demonstration user API with agent registration", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "TEST_BACKEND_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener port
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return Err(e.into());
        }
    };
    if let Some(port) = args.port {
        config.listener.port = port;
    }

    logging::init_logging(&config.observability);
    tracing::info!("test-backend v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        agent_enabled = config.agent.enabled,
        request_timeout_secs = config.timeouts.request_secs,
        drain_timeout_secs = config.shutdown.drain_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let app = match Application::from_config(config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize service");
            return Err(e.into());
        }
    };

    if let Err(e) = app.serve().await {
        tracing::error!(error = %e, "Service terminated");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
