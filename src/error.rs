//! Request-time error taxonomy.
//!
//! Every outcome a handler can refuse with is a variant here. Most of them are
//! routine (the request is simply not for this handler) and the handler chain
//! treats them as "try the next one". Only `Store` carries a genuine failure.

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors produced while gating or handling a request.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The method is not supported by this handler.
    #[error("{reason}")]
    MethodNotAllowed {
        allowed: Vec<Method>,
        reason: String,
    },

    /// The target is malformed for this handler's purpose.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The handler does not apply to this target.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// The target is in scope but no mapping accepts any offered media type.
    #[error("No type mapping configured for '{}'", .attempted.join(","))]
    NotAcceptable { attempted: Vec<String> },

    /// A collaborator failed.
    #[error("Store error: {0}")]
    Store(#[from] std::io::Error),
}

/// Result type for request handling.
pub type SelectionResult<T> = Result<T, SelectionError>;

impl SelectionError {
    /// Shorthand for the GET-only method rejection.
    pub fn get_only(reason: impl Into<String>) -> Self {
        Self::MethodNotAllowed {
            allowed: vec![Method::GET],
            reason: reason.into(),
        }
    }

    /// HTTP status this error is surfaced as.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotImplemented(_) => StatusCode::NOT_FOUND,
            Self::NotAcceptable { .. } => StatusCode::NOT_ACCEPTABLE,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the handler chain may move on to the next handler.
    pub fn is_pass_through(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}

impl IntoResponse for SelectionError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::MethodNotAllowed { allowed, reason } => {
                let allow = allowed
                    .iter()
                    .map(Method::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                let mut response = (status, reason).into_response();
                if let Ok(value) = HeaderValue::from_str(&allow) {
                    response.headers_mut().insert(header::ALLOW, value);
                }
                response
            }
            Self::Store(e) => {
                tracing::error!(error = %e, "Resource store failure");
                (status, "Internal server error").into_response()
            }
            // Pass-through outcomes surface as a plain not-found.
            Self::NotImplemented(_) => (status, "Not found").into_response(),
            other => (status, other.to_string()).into_response(),
        }
    }
}
