//! content-redirect server.
//!
//! Redirects extensionless resource paths to the representation that best
//! matches the client's `Accept` header.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────▶ http server ─▶ handler chain
//!                    (request ID,    ├─ rewrite redirect   (pattern → 308)
//!                     timeout,       ├─ content selection  (Accept → 30x / serve)
//!                     tracing)       └─ static fallback    (store → 200 / 404)
//!     Client Response                        │
//!     ◀──────────────────────────────────────┘
//!
//!     Cross-cutting: config (TOML) · observability (tracing, Prometheus) · lifecycle
//! ```

use std::path::PathBuf;

use clap::Parser;

use content_redirect::lifecycle::startup;

#[derive(Parser)]
#[command(name = "content-redirect")]
#[command(about = "Content-negotiation redirect server", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    startup::run(args.config.as_deref(), args.bind).await
}
