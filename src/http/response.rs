//! Response construction for redirect decisions.
//!
//! # Responsibilities
//! - Model the supported 30x codes as a closed enum
//! - Build redirect responses with a `Location` header
//! - Build the 200 response for a substituted representation
//!
//! # Design Decisions
//! - Configuration carries the numeric code; unsupported codes are rejected
//!   at deserialization time
//! - Each variant maps explicitly to its status code and reason

use std::fmt;

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::store::Representation;

/// Supported redirect status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum RedirectStatus {
    /// 301
    MovedPermanently,
    /// 302
    Found,
    /// 303
    SeeOther,
    /// 307
    TemporaryRedirect,
    /// 308
    PermanentRedirect,
}

impl RedirectStatus {
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::MovedPermanently => StatusCode::MOVED_PERMANENTLY,
            Self::Found => StatusCode::FOUND,
            Self::SeeOther => StatusCode::SEE_OTHER,
            Self::TemporaryRedirect => StatusCode::TEMPORARY_REDIRECT,
            Self::PermanentRedirect => StatusCode::PERMANENT_REDIRECT,
        }
    }

    /// Name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::MovedPermanently => "MovedPermanently",
            Self::Found => "Found",
            Self::SeeOther => "SeeOther",
            Self::TemporaryRedirect => "TemporaryRedirect",
            Self::PermanentRedirect => "PermanentRedirect",
        }
    }

    /// Build the redirect response for `location`.
    pub fn redirect(self, location: &str) -> Response {
        match HeaderValue::from_str(location) {
            Ok(value) => (self.status_code(), [(header::LOCATION, value)]).into_response(),
            Err(_) => {
                tracing::error!(location = %location, "Redirect location is not a valid header value");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl Default for RedirectStatus {
    fn default() -> Self {
        Self::TemporaryRedirect
    }
}

impl TryFrom<u16> for RedirectStatus {
    type Error = UnsupportedRedirectStatus;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            301 => Ok(Self::MovedPermanently),
            302 => Ok(Self::Found),
            303 => Ok(Self::SeeOther),
            307 => Ok(Self::TemporaryRedirect),
            308 => Ok(Self::PermanentRedirect),
            other => Err(UnsupportedRedirectStatus(other)),
        }
    }
}

impl From<RedirectStatus> for u16 {
    fn from(status: RedirectStatus) -> Self {
        status.status_code().as_u16()
    }
}

impl fmt::Display for RedirectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", u16::from(*self), self.name())
    }
}

/// A status code outside 301/302/303/307/308.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unsupported redirect status {0} (expected one of 301, 302, 303, 307, 308)")]
pub struct UnsupportedRedirectStatus(pub u16);

/// 200 response carrying a substituted representation.
pub fn representation_response(representation: Representation, location: &str) -> Response {
    let mut response = Response::new(Body::from(representation.data));
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&representation.content_type) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    if let Ok(value) = HeaderValue::from_str(location) {
        headers.insert(header::LOCATION, value);
    }
    response
}
