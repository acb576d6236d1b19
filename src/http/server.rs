//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router that feeds every request to the handler chain
//! - Wire up middleware (timeout, request ID, tracing)
//! - Bind the server to a listener and stop on shutdown
//! - Record per-request metrics

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::Instrument;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{AppConfig, ConfigError};
use crate::handlers::HandlerChain;
use crate::http::request::{handler_input, request_id, MakeRequestUuid, X_REQUEST_ID};
use crate::observability::metrics;
use crate::routing::BaseUrl;
use crate::store::{FsStore, ResourceStore};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<HandlerChain>,
    pub base_url: Arc<BaseUrl>,
}

/// HTTP server for content-negotiated redirects.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a server serving documents from `config.store.root`.
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let store: Arc<dyn ResourceStore> = Arc::new(FsStore::new(&config.store.root));
        Self::with_store(config, store)
    }

    /// Create a server backed by an explicit store.
    pub fn with_store(config: AppConfig, store: Arc<dyn ResourceStore>) -> Result<Self, ConfigError> {
        let base_url = BaseUrl::parse(&config.base_url)?;
        let chain = HandlerChain::from_config(&config, store)?;

        tracing::info!(
            base_url = %base_url.as_str(),
            handlers = ?chain.names(),
            "Handler chain compiled"
        );

        let state = AppState {
            chain: Arc::new(chain),
            base_url: Arc::new(base_url),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), MakeRequestUuid))
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Feed a request through the handler chain.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request);
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let (response, handler) = match handler_input(&request, &state.base_url) {
        Ok(input) => {
            let span = tracing::info_span!("dispatch", request_id = %request_id);
            state.chain.dispatch(&input).instrument(span).await
        }
        Err(e) => {
            tracing::debug!(request_id = %request_id, reason = %e, "Request outside base URL");
            (e.into_response(), "none")
        }
    };
    let status = response.status().as_u16();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        handler = handler,
        status = status,
        "Request handled"
    );
    metrics::record_request(handler, status, start_time);

    response
}
