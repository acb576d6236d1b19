//! Request handlers and the chain that dispatches to them.
//!
//! # Data Flow
//! ```text
//! HandlerInput (method, path, relative path, preferences)
//!     → rewrite.rs   (pattern-substitution redirect)
//!     → redirect.rs  (content selection: 30x to path + extension)
//!       or serve.rs  (content selection: serve path + extension)
//!     → fallback.rs  (static resource or 404)
//! ```
//!
//! # Design Decisions
//! - `can_handle` is a side-effect-free gate; refusals are routine values
//! - The first handler whose gate passes produces the response
//! - When every gate refuses, the last refusal is rendered
//! - Store failures are never swallowed as refusals

pub mod fallback;
pub mod redirect;
pub mod rewrite;
pub mod serve;

use std::sync::Arc;

use axum::http::Method;
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;

use crate::config::{AppConfig, ConfigError, SelectionMode};
use crate::error::{SelectionError, SelectionResult};
use crate::negotiation::PreferenceList;
use crate::routing::BaseUrl;
use crate::store::ResourceStore;

pub use fallback::StaticHandler;
pub use redirect::{ContentSelectionRedirect, RedirectDecision};
pub use rewrite::RewriteRedirect;
pub use serve::ContentSelectionServe;

/// What handlers see of a request.
#[derive(Debug, Clone)]
pub struct HandlerInput {
    pub method: Method,
    /// Raw request path (no query).
    pub path: String,
    /// Path relative to the configured base URL.
    pub relative_path: String,
    pub query: Option<String>,
    pub preferences: PreferenceList,
}

impl HandlerInput {
    /// Convenience constructor for a base URL without a path component.
    pub fn new(method: Method, path: impl Into<String>, preferences: PreferenceList) -> Self {
        let path = path.into();
        Self {
            method,
            relative_path: path.clone(),
            path,
            query: None,
            preferences,
        }
    }

    /// Append the query string, if any, to `path`.
    pub fn with_query(&self, path: &str) -> String {
        match &self.query {
            Some(query) => format!("{path}?{query}"),
            None => path.to_string(),
        }
    }
}

/// A step in the handler chain.
pub trait RequestHandler: Send + Sync {
    /// Name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Decide whether this handler applies.
    fn can_handle<'a>(&'a self, input: &'a HandlerInput) -> BoxFuture<'a, SelectionResult<()>>;

    /// Produce the response. Only called after `can_handle` succeeded.
    fn handle<'a>(&'a self, input: &'a HandlerInput) -> BoxFuture<'a, SelectionResult<Response>>;
}

/// Ordered handlers; the first that accepts a request handles it.
#[derive(Default)]
pub struct HandlerChain {
    handlers: Vec<Box<dyn RequestHandler>>,
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile the configured chain: rewrites, content selection, static fallback.
    pub fn from_config(config: &AppConfig, store: Arc<dyn ResourceStore>) -> Result<Self, ConfigError> {
        let base_url = BaseUrl::parse(&config.base_url)?;
        let mut chain = Self::new();

        if !config.redirects.rules.is_empty() {
            chain.push(RewriteRedirect::from_config(&config.redirects, base_url.clone())?);
        }

        let selection = &config.content_selection;
        if selection.enabled {
            match selection.mode {
                SelectionMode::Redirect => {
                    chain.push(ContentSelectionRedirect::from_config(selection, base_url)?);
                }
                SelectionMode::Serve => {
                    chain.push(ContentSelectionServe::from_config(
                        selection,
                        base_url,
                        store.clone(),
                    )?);
                }
            }
        }

        chain.push(StaticHandler::new(store, config.store.index_file.clone()));
        Ok(chain)
    }

    pub fn push(&mut self, handler: impl RequestHandler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Dispatch a request. Returns the response and the handler that produced it.
    pub async fn dispatch(&self, input: &HandlerInput) -> (Response, &'static str) {
        let mut refusal = None;

        for handler in &self.handlers {
            match handler.can_handle(input).await {
                Ok(()) => {
                    let response = match handler.handle(input).await {
                        Ok(response) => response,
                        Err(e) => e.into_response(),
                    };
                    return (response, handler.name());
                }
                Err(e) if e.is_pass_through() => {
                    tracing::trace!(handler = handler.name(), reason = %e, "Handler declined");
                    refusal = Some(e);
                }
                Err(e) => return (e.into_response(), handler.name()),
            }
        }

        let response = refusal
            .unwrap_or_else(|| SelectionError::NotImplemented("No handler configured".to_string()))
            .into_response();
        (response, "none")
    }
}
