//! Request identification and decoding.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) unless the client sent one
//! - Extract what the handlers need from an incoming request
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Handlers see a plain `HandlerInput`, never the raw request

use axum::body::Body;
use axum::http::{header, HeaderName, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::error::{SelectionError, SelectionResult};
use crate::handlers::HandlerInput;
use crate::negotiation::PreferenceList;
use crate::routing::BaseUrl;

/// Header carrying the request ID.
pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// UUID v4 request ID generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        id.parse().ok().map(RequestId::new)
    }
}

/// Read the request ID set by the request-id layer.
pub fn request_id(request: &Request<Body>) -> String {
    request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Decode a request into handler input.
///
/// Requests outside the base URL are refused with `NotImplemented`.
pub fn handler_input(request: &Request<Body>, base_url: &BaseUrl) -> SelectionResult<HandlerInput> {
    let path = request.uri().path().to_string();
    let target = base_url.target_for(&path);
    let relative_path = base_url.relative(&target).ok_or_else(|| {
        SelectionError::NotImplemented(format!("{target} is outside {}", base_url.as_str()))
    })?;
    let accept = request
        .headers()
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok());

    Ok(HandlerInput {
        method: request.method().clone(),
        relative_path,
        query: request.uri().query().map(str::to_string),
        preferences: PreferenceList::from_accept_header(accept),
        path,
    })
}
