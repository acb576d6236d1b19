//! Eligibility gate for content selection.
//!
//! # Responsibilities
//! - Only `GET` requests
//! - Only paths inside the configured active scope
//! - Only extensionless, non-directory paths
//!
//! # Design Decisions
//! - Checks run in that order; the first failing check decides the error
//! - Active patterns are case-insensitive and unanchored (union semantics)
//! - An unscoped filter accepts every path

use axum::http::Method;
use regex::{Regex, RegexBuilder};

use crate::error::{SelectionError, SelectionResult};
use crate::routing::path::{has_file_extension, is_directory};

/// The set of relative paths a component is active on.
#[derive(Debug, Clone)]
pub enum ActivePaths {
    /// Active everywhere.
    Unscoped,
    /// Active where any pattern matches.
    Scoped(Vec<Regex>),
}

impl ActivePaths {
    /// Compile activation patterns (case-insensitive).
    pub fn scoped<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let compiled = patterns
            .into_iter()
            .map(|p| RegexBuilder::new(p.as_ref()).case_insensitive(true).build())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::Scoped(compiled))
    }

    /// Compile from an optional pattern list; `None` means unscoped.
    pub fn from_config(patterns: Option<&[String]>) -> Result<Self, regex::Error> {
        match patterns {
            Some(patterns) => Self::scoped(patterns),
            None => Ok(Self::Unscoped),
        }
    }

    pub fn is_active(&self, relative_path: &str) -> bool {
        match self {
            Self::Unscoped => true,
            Self::Scoped(patterns) => patterns.iter().any(|p| p.is_match(relative_path)),
        }
    }
}

/// Decides whether a request falls under content selection.
#[derive(Debug, Clone)]
pub struct PathFilter {
    active: ActivePaths,
}

impl PathFilter {
    pub fn new(active: ActivePaths) -> Self {
        Self { active }
    }

    /// Check a request. Succeeds with no output when the request is eligible.
    pub fn check(
        &self,
        method: &Method,
        request_path: Option<&str>,
        relative_path: &str,
    ) -> SelectionResult<()> {
        if *method != Method::GET {
            return Err(SelectionError::get_only(
                "Content selection redirect only for GET requests.",
            ));
        }

        if !self.active.is_active(relative_path) {
            return Err(SelectionError::NotImplemented(format!(
                "No redirect configured for {relative_path}"
            )));
        }

        match request_path {
            Some(path) if !path.is_empty() && !is_directory(path) && !has_file_extension(path) => {
                Ok(())
            }
            _ => Err(SelectionError::BadRequest(
                "Content selection redirect only for files without extensions.".to_string(),
            )),
        }
    }

    pub fn active_paths(&self) -> &ActivePaths {
        &self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sensor_filter() -> PathFilter {
        PathFilter::new(ActivePaths::scoped([r"^/sensor-\d+/", r"^/stations/"]).unwrap())
    }

    #[test]
    fn test_eligible_path() {
        let filter = sensor_filter();
        assert!(filter
            .check(&Method::GET, Some("/sensor-1/data"), "/sensor-1/data")
            .is_ok());
        // Case-insensitive scope.
        assert!(filter
            .check(&Method::GET, Some("/STATIONS/x"), "/STATIONS/x")
            .is_ok());
    }

    #[test]
    fn test_path_with_extension_is_bad_request() {
        let result = sensor_filter().check(&Method::GET, Some("/sensor-1/b.html"), "/sensor-1/b.html");
        assert!(matches!(result, Err(SelectionError::BadRequest(_))));
    }

    #[test]
    fn test_directory_is_bad_request() {
        let result = sensor_filter().check(&Method::GET, Some("/sensor-1/b/"), "/sensor-1/b/");
        assert!(matches!(result, Err(SelectionError::BadRequest(_))));
    }

    #[test]
    fn test_absent_path_is_bad_request() {
        let filter = PathFilter::new(ActivePaths::Unscoped);
        assert!(matches!(
            filter.check(&Method::GET, None, ""),
            Err(SelectionError::BadRequest(_))
        ));
        assert!(matches!(
            filter.check(&Method::GET, Some(""), ""),
            Err(SelectionError::BadRequest(_))
        ));
    }

    #[test]
    fn test_post_is_method_not_allowed() {
        let result = sensor_filter().check(&Method::POST, Some("/sensor-1/b"), "/sensor-1/b");
        match result {
            Err(SelectionError::MethodNotAllowed { allowed, .. }) => {
                assert_eq!(allowed, vec![Method::GET]);
            }
            other => panic!("expected MethodNotAllowed, got {:?}", other),
        }
    }

    #[test]
    fn test_inactive_path_is_not_implemented() {
        let result = sensor_filter().check(
            &Method::GET,
            Some("/this/is/not/active/data"),
            "/this/is/not/active/data",
        );
        assert!(matches!(result, Err(SelectionError::NotImplemented(_))));
    }

    #[test]
    fn test_method_checked_before_scope() {
        let result = sensor_filter().check(&Method::PUT, Some("/elsewhere"), "/elsewhere");
        assert!(matches!(result, Err(SelectionError::MethodNotAllowed { .. })));
    }

    #[test]
    fn test_unscoped_and_empty_scope() {
        let unscoped = PathFilter::new(ActivePaths::from_config(None).unwrap());
        assert!(unscoped.check(&Method::GET, Some("/any/thing"), "/any/thing").is_ok());

        let empty: Vec<String> = Vec::new();
        let nothing = PathFilter::new(ActivePaths::from_config(Some(&empty)).unwrap());
        assert!(matches!(
            nothing.check(&Method::GET, Some("/any/thing"), "/any/thing"),
            Err(SelectionError::NotImplemented(_))
        ));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(ActivePaths::scoped(["(unclosed"]).is_err());
    }
}
