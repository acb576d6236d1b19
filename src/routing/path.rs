//! Path and URL helpers.
//!
//! # Responsibilities
//! - Compute a request path relative to the configured base URL
//! - Join the base URL with relative paths for `Location` headers
//! - Classify paths (directory-like, has file extension, absolute URL)

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

static ABSOLUTE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[a-z][a-z0-9+.\-]*:)?//").expect("absolute URL pattern is valid")
});

/// The externally visible base URL of the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    /// Base URL with all trailing slashes removed.
    trimmed: String,
    /// `scheme://host[:port]` of the base URL.
    origin: String,
}

impl BaseUrl {
    /// Parse and normalize a base URL.
    pub fn parse(base_url: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(base_url)?;
        Ok(Self {
            trimmed: base_url.trim_end_matches('/').to_string(),
            origin: url.origin().ascii_serialization(),
        })
    }

    /// The absolute target for a request path received by this server.
    pub fn target_for(&self, request_path: &str) -> String {
        format!("{}{}", self.origin, request_path)
    }

    /// Strip the base URL from an absolute target.
    ///
    /// The prefix only counts on a segment boundary, so `/app` is not a base of
    /// `/application`. Targets outside the base URL give `None`.
    pub fn relative(&self, target: &str) -> Option<String> {
        let rest = target.strip_prefix(self.trimmed.as_str())?;
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest.to_string())
        } else {
            None
        }
    }

    /// Join a path onto the base URL, leaving absolute URLs untouched.
    pub fn join(&self, path: &str) -> String {
        if is_absolute_url(path) {
            return path.to_string();
        }
        format!("{}/{}", self.trimmed, path.trim_start_matches('/'))
    }

    pub fn as_str(&self) -> &str {
        &self.trimmed
    }
}

/// Whether `path` is an absolute URL (`scheme://…` or protocol-relative `//…`).
pub fn is_absolute_url(path: &str) -> bool {
    ABSOLUTE_URL.is_match(path)
}

/// Whether the final path segment contains a `.`.
pub fn has_file_extension(path: &str) -> bool {
    let segment = match path.rfind('/') {
        Some(i) => &path[i + 1..],
        None => path,
    };
    segment.contains('.')
}

/// Whether the path names a container rather than a document.
pub fn is_directory(path: &str) -> bool {
    path.ends_with('/')
}
