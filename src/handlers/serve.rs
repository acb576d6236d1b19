//! Content-selection by internal re-target.
//!
//! Instead of redirecting, serve the negotiated representation directly under
//! the extensionless URL and point at it with `Location`.

use std::io;
use std::sync::Arc;

use axum::response::Response;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use super::redirect::compile_matcher;
use super::{HandlerInput, RequestHandler};
use crate::config::{ConfigError, ContentSelectionConfig};
use crate::error::{SelectionError, SelectionResult};
use crate::http::response::representation_response;
use crate::negotiation::NegotiationMatcher;
use crate::observability::metrics;
use crate::routing::{ActivePaths, BaseUrl, PathFilter};
use crate::store::ResourceStore;

/// Serves `path + extension` from the store for extensionless requests.
#[derive(Debug, Clone)]
pub struct ContentSelectionServe {
    filter: PathFilter,
    matcher: NegotiationMatcher,
    base_url: BaseUrl,
    store: Arc<dyn ResourceStore>,
}

impl ContentSelectionServe {
    pub fn new(
        filter: PathFilter,
        matcher: NegotiationMatcher,
        base_url: BaseUrl,
        store: Arc<dyn ResourceStore>,
    ) -> Self {
        Self {
            filter,
            matcher,
            base_url,
            store,
        }
    }

    /// Compile from configuration.
    pub fn from_config(
        config: &ContentSelectionConfig,
        base_url: BaseUrl,
        store: Arc<dyn ResourceStore>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(
            PathFilter::new(ActivePaths::from_config(config.active_paths.as_deref())?),
            compile_matcher(config)?,
            base_url,
            store,
        ))
    }

    async fn gate(&self, input: &HandlerInput) -> SelectionResult<()> {
        self.filter
            .check(&input.method, Some(&input.path), &input.relative_path)?;

        let exists = match self.store.has_resource(&input.relative_path).await {
            Ok(exists) => exists,
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => {
                return Err(SelectionError::BadRequest(e.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        // An existing extensionless document is served as-is by the fallback.
        if exists {
            return Err(SelectionError::NotImplemented(format!(
                "Existing resource for {}.",
                input.relative_path
            )));
        }
        Ok(())
    }

    async fn serve(&self, input: &HandlerInput) -> SelectionResult<Response> {
        let matched = match self.matcher.select(&input.preferences) {
            Ok(matched) => matched,
            Err(e) => {
                metrics::record_negotiation("not_acceptable");
                return Err(e);
            }
        };

        let candidate = format!("{}{}", input.relative_path, matched.extension);
        tracing::info!(path = %input.path, candidate = %candidate, "Try to fetch resource");

        match self.store.get_representation(&candidate).await {
            Ok(representation) => {
                metrics::record_negotiation("matched");
                let location = self.base_url.join(&candidate);
                Ok(representation_response(representation, &location))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                metrics::record_negotiation("missing_representation");
                tracing::info!(candidate = %candidate, "Negotiated representation does not exist");
                Err(SelectionError::NotAcceptable {
                    attempted: vec![matched.media_type],
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl RequestHandler for ContentSelectionServe {
    fn name(&self) -> &'static str {
        "content_selection_serve"
    }

    fn can_handle<'a>(&'a self, input: &'a HandlerInput) -> BoxFuture<'a, SelectionResult<()>> {
        self.gate(input).boxed()
    }

    fn handle<'a>(&'a self, input: &'a HandlerInput) -> BoxFuture<'a, SelectionResult<Response>> {
        self.serve(input).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::negotiation::PreferenceList;
    use crate::store::MemoryStore;
    use axum::http::{header, Method, StatusCode};

    fn handler() -> ContentSelectionServe {
        let store = MemoryStore::new()
            .with("/sensor-1/data.ttl", "<a> <b> <c> .")
            .with("/sensor-1/data.html", "<html></html>")
            .with("/sensor-1/readme", "plain");
        ContentSelectionServe::new(
            PathFilter::new(ActivePaths::scoped([r"^/sensor-\d+/"]).unwrap()),
            NegotiationMatcher::compile([
                ("text/html", "html"),
                ("text/csv", "csv"),
                (r"\*/\*", "ttl"),
            ])
            .unwrap(),
            BaseUrl::parse("http://localhost:3000").unwrap(),
            Arc::new(store),
        )
    }

    fn get(path: &str, accept: Option<&str>) -> HandlerInput {
        HandlerInput::new(Method::GET, path, PreferenceList::from_accept_header(accept))
    }

    #[tokio::test]
    async fn test_serves_negotiated_representation() {
        let h = handler();
        let input = get("/sensor-1/data", Some("text/html"));
        h.can_handle(&input).await.unwrap();

        let response = h.handle(&input).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "http://localhost:3000/sensor-1/data.html"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_missing_representation_is_not_acceptable() {
        let h = handler();
        let result = h.handle(&get("/sensor-1/data", Some("text/csv"))).await;
        assert!(matches!(result, Err(SelectionError::NotAcceptable { .. })));
    }

    #[tokio::test]
    async fn test_no_mapping_is_not_acceptable() {
        let h = handler();
        let result = h.handle(&get("/sensor-1/data", Some("image/png"))).await;
        assert!(matches!(result, Err(SelectionError::NotAcceptable { .. })));
    }

    #[tokio::test]
    async fn test_existing_resource_declined() {
        let h = handler();
        let result = h.can_handle(&get("/sensor-1/readme", None)).await;
        assert!(matches!(result, Err(SelectionError::NotImplemented(_))));
    }
}
