//! Static resource fallback.
//!
//! Last handler in the chain: serves documents from the store as they are.

use std::io;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderValue, Method};
use axum::response::Response;
use futures_util::future::{ready, BoxFuture};
use futures_util::FutureExt;

use super::{HandlerInput, RequestHandler};
use crate::error::{SelectionError, SelectionResult};
use crate::routing::path::is_directory;
use crate::store::ResourceStore;

/// Serves `GET`/`HEAD` requests straight from the store.
#[derive(Debug, Clone)]
pub struct StaticHandler {
    store: Arc<dyn ResourceStore>,
    index_file: String,
}

impl StaticHandler {
    pub fn new(store: Arc<dyn ResourceStore>, index_file: impl Into<String>) -> Self {
        Self {
            store,
            index_file: index_file.into(),
        }
    }

    fn check(&self, input: &HandlerInput) -> SelectionResult<()> {
        if input.method != Method::GET && input.method != Method::HEAD {
            return Err(SelectionError::MethodNotAllowed {
                allowed: vec![Method::GET, Method::HEAD],
                reason: "Only GET and HEAD are supported.".to_string(),
            });
        }
        Ok(())
    }

    fn document_path(&self, relative_path: &str) -> String {
        if relative_path.is_empty() || is_directory(relative_path) {
            format!("{}/{}", relative_path.trim_end_matches('/'), self.index_file)
        } else {
            relative_path.to_string()
        }
    }

    async fn serve(&self, input: &HandlerInput) -> SelectionResult<Response> {
        let path = self.document_path(&input.relative_path);
        let representation = match self.store.get_representation(&path).await {
            Ok(representation) => representation,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SelectionError::NotImplemented(format!(
                    "No resource at {}",
                    input.relative_path
                )));
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => {
                return Err(SelectionError::BadRequest(e.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let length = representation.data.len();
        let body = if input.method == Method::HEAD {
            Body::empty()
        } else {
            Body::from(representation.data)
        };

        let mut response = Response::new(body);
        let headers = response.headers_mut();
        if let Ok(value) = HeaderValue::from_str(&representation.content_type) {
            headers.insert(header::CONTENT_TYPE, value);
        }
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
        Ok(response)
    }
}

impl RequestHandler for StaticHandler {
    fn name(&self) -> &'static str {
        "static"
    }

    fn can_handle<'a>(&'a self, input: &'a HandlerInput) -> BoxFuture<'a, SelectionResult<()>> {
        ready(self.check(input)).boxed()
    }

    fn handle<'a>(&'a self, input: &'a HandlerInput) -> BoxFuture<'a, SelectionResult<Response>> {
        self.serve(input).boxed()
    }
}
