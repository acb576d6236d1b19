//! Content-selection redirect.
//!
//! Redirects `GET /sensor-1/data` to `/sensor-1/data.html` (or `.ttl`, …)
//! depending on the client's `Accept` header.

use axum::response::{IntoResponse, Response};
use futures_util::future::{ready, BoxFuture};
use futures_util::FutureExt;
use serde::Serialize;

use super::{HandlerInput, RequestHandler};
use crate::config::{ConfigError, ContentSelectionConfig};
use crate::error::{SelectionError, SelectionResult};
use crate::http::response::RedirectStatus;
use crate::negotiation::NegotiationMatcher;
use crate::observability::metrics;
use crate::routing::{ActivePaths, BaseUrl, PathFilter};

/// The outcome of a successful negotiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectDecision {
    pub status: RedirectStatus,
    pub location: String,
    pub extension: String,
    pub media_type: String,
}

/// Redirects extensionless paths to their negotiated representation.
#[derive(Debug, Clone)]
pub struct ContentSelectionRedirect {
    filter: PathFilter,
    matcher: NegotiationMatcher,
    status: RedirectStatus,
    base_url: BaseUrl,
}

impl ContentSelectionRedirect {
    pub fn new(
        filter: PathFilter,
        matcher: NegotiationMatcher,
        status: RedirectStatus,
        base_url: BaseUrl,
    ) -> Self {
        Self {
            filter,
            matcher,
            status,
            base_url,
        }
    }

    /// Compile from configuration.
    pub fn from_config(config: &ContentSelectionConfig, base_url: BaseUrl) -> Result<Self, ConfigError> {
        Ok(Self::new(
            PathFilter::new(ActivePaths::from_config(config.active_paths.as_deref())?),
            compile_matcher(config)?,
            config.status_code,
            base_url,
        ))
    }

    /// Gate only.
    pub fn check(&self, input: &HandlerInput) -> SelectionResult<()> {
        self.filter
            .check(&input.method, Some(&input.path), &input.relative_path)
    }

    /// Negotiate the redirect for an input that passed the gate.
    pub fn decide(&self, input: &HandlerInput) -> SelectionResult<RedirectDecision> {
        let matched = self.matcher.select(&input.preferences)?;
        let target = input.with_query(&format!("{}{}", input.relative_path, matched.extension));
        Ok(RedirectDecision {
            status: self.status,
            location: self.base_url.join(&target),
            extension: matched.extension,
            media_type: matched.media_type,
        })
    }

    /// Gate and negotiate in one step.
    pub fn evaluate(&self, input: &HandlerInput) -> SelectionResult<RedirectDecision> {
        self.check(input)?;
        self.decide(input)
    }
}

/// Compile the configured type mappings in order.
pub(crate) fn compile_matcher(config: &ContentSelectionConfig) -> Result<NegotiationMatcher, regex::Error> {
    NegotiationMatcher::compile(
        config
            .type_mappings
            .iter()
            .map(|m| (m.media_type.as_str(), m.extension.as_str())),
    )
}

impl RequestHandler for ContentSelectionRedirect {
    fn name(&self) -> &'static str {
        "content_selection_redirect"
    }

    fn can_handle<'a>(&'a self, input: &'a HandlerInput) -> BoxFuture<'a, SelectionResult<()>> {
        ready(self.check(input)).boxed()
    }

    fn handle<'a>(&'a self, input: &'a HandlerInput) -> BoxFuture<'a, SelectionResult<Response>> {
        let response = match self.decide(input) {
            Ok(decision) => {
                metrics::record_negotiation("matched");
                tracing::info!(
                    path = %input.path,
                    media_type = %decision.media_type,
                    status = %decision.status,
                    "Redirecting {} to {}",
                    input.path,
                    decision.location
                );
                Ok(decision.status.redirect(&decision.location))
            }
            Err(e @ SelectionError::NotAcceptable { .. }) => {
                metrics::record_negotiation("not_acceptable");
                tracing::info!(path = %input.path, "{}", e);
                Ok(e.into_response())
            }
            Err(e) => Err(e),
        };
        ready(response).boxed()
    }
}
