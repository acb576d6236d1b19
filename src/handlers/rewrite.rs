//! Pattern-substitution redirect handler.

use axum::response::Response;
use futures_util::future::{ready, BoxFuture};
use futures_util::FutureExt;

use super::{HandlerInput, RequestHandler};
use crate::config::{ConfigError, RedirectConfig};
use crate::error::SelectionResult;
use crate::http::response::RedirectStatus;
use crate::routing::{BaseUrl, RewriteRule, Rewriter};

/// Redirects paths matched by a rewrite rule.
#[derive(Debug, Clone)]
pub struct RewriteRedirect {
    rewriter: Rewriter,
    status: RedirectStatus,
    base_url: BaseUrl,
}

impl RewriteRedirect {
    pub fn new(rewriter: Rewriter, status: RedirectStatus, base_url: BaseUrl) -> Self {
        Self {
            rewriter,
            status,
            base_url,
        }
    }

    /// Compile from configuration.
    pub fn from_config(config: &RedirectConfig, base_url: BaseUrl) -> Result<Self, ConfigError> {
        let rules = config
            .rules
            .iter()
            .map(|rule| RewriteRule::new(&rule.pattern, rule.target.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(Rewriter::new(rules), config.status_code, base_url))
    }

    /// Absolute redirect location for a request, or why there is none.
    ///
    /// The query string is carried over to the rewritten target.
    pub fn location(&self, input: &HandlerInput) -> SelectionResult<String> {
        let target = self.rewriter.rewrite(&input.relative_path)?;
        Ok(self.base_url.join(&input.with_query(&target)))
    }

    pub fn status(&self) -> RedirectStatus {
        self.status
    }
}

impl RequestHandler for RewriteRedirect {
    fn name(&self) -> &'static str {
        "rewrite_redirect"
    }

    fn can_handle<'a>(&'a self, input: &'a HandlerInput) -> BoxFuture<'a, SelectionResult<()>> {
        ready(self.location(input).map(|_| ())).boxed()
    }

    fn handle<'a>(&'a self, input: &'a HandlerInput) -> BoxFuture<'a, SelectionResult<Response>> {
        let response = self.location(input).map(|location| {
            tracing::info!(path = %input.path, "Redirecting {} to {}", input.path, location);
            self.status.redirect(&location)
        });
        ready(response).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectionError;
    use crate::negotiation::PreferenceList;
    use axum::http::{header, Method, StatusCode};

    fn handler() -> RewriteRedirect {
        RewriteRedirect::new(
            Rewriter::new(vec![
                RewriteRule::new(r"^/old/(.*)$", "/new/$1").unwrap(),
                RewriteRule::new(r"^/ext/(.*)$", "https://example.org/$1").unwrap(),
            ]),
            RedirectStatus::PermanentRedirect,
            BaseUrl::parse("http://localhost:3000/").unwrap(),
        )
    }

    fn get(path: &str) -> HandlerInput {
        HandlerInput::new(Method::GET, path, PreferenceList::default())
    }

    #[tokio::test]
    async fn test_redirects_matching_path() {
        let h = handler();
        let input = get("/old/foo");
        h.can_handle(&input).await.unwrap();

        let response = h.handle(&input).await.unwrap();
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "http://localhost:3000/new/foo"
        );
    }

    #[tokio::test]
    async fn test_absolute_target_not_joined() {
        let location = handler().location(&get("/ext/page")).unwrap();
        assert_eq!(location, "https://example.org/page");
    }

    #[test]
    fn test_query_carried_over() {
        let mut input = get("/old/foo");
        input.query = Some("x=1&y=2".into());
        let location = handler().location(&input).unwrap();
        assert_eq!(location, "http://localhost:3000/new/foo?x=1&y=2");
    }

    #[tokio::test]
    async fn test_unmatched_path_declined() {
        let result = handler().can_handle(&get("/new/foo")).await;
        assert!(matches!(result, Err(SelectionError::NotImplemented(_))));
    }
}
