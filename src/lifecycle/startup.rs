//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging and metrics
//! - Bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listeners start last (traffic only when handlers are compiled)

use std::error::Error;
use std::path::Path;

use tokio::net::TcpListener;

use super::{signals, Shutdown};
use crate::config::{load_config, AppConfig};
use crate::http::HttpServer;
use crate::observability::{logging, metrics};

/// Resolve the configuration: file if given, defaults otherwise.
pub fn resolve_config(
    config_path: Option<&Path>,
    bind_override: Option<String>,
) -> Result<AppConfig, crate::config::ConfigError> {
    let mut config = match config_path {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = bind_override {
        config.listener.bind_address = bind;
    }
    Ok(config)
}

/// Start the server and block until it shuts down.
pub async fn run(
    config_path: Option<&Path>,
    bind_override: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(config_path, bind_override)?;
    logging::init(&config.observability);

    tracing::info!("content-redirect v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config = ?config_path,
        base_url = %config.base_url,
        bind_address = %config.listener.bind_address,
        store_root = %config.store.root,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config)?;
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::wait_for_shutdown(shutdown));

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
