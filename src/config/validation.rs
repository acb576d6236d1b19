//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Compile every regular expression once so bad patterns fail at startup
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("base_url '{url}' is not a valid URL: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("{field} '{address}' is not a valid socket address")]
    InvalidAddress { field: &'static str, address: String },

    #[error("{field} pattern '{pattern}' is invalid: {reason}")]
    InvalidPattern {
        field: &'static str,
        pattern: String,
        reason: String,
    },

    #[error("type mapping for '{media_type}' has an empty extension")]
    EmptyExtension { media_type: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("store.index_file must not be empty")]
    EmptyIndexFile,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = Url::parse(&config.base_url) {
        errors.push(ValidationError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        });
    }

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.store.index_file.trim().is_empty() {
        errors.push(ValidationError::EmptyIndexFile);
    }

    let selection = &config.content_selection;
    for pattern in selection.active_paths.iter().flatten() {
        check_pattern(&mut errors, "content_selection.active_paths", pattern);
    }
    for mapping in &selection.type_mappings {
        check_pattern(&mut errors, "content_selection.type_mappings", &mapping.media_type);
        if mapping.extension.trim_start_matches('.').is_empty() {
            errors.push(ValidationError::EmptyExtension {
                media_type: mapping.media_type.clone(),
            });
        }
    }

    for rule in &config.redirects.rules {
        check_pattern(&mut errors, "redirects.rules", &rule.pattern);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, address: &str) {
    if address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            address: address.to_string(),
        });
    }
}

fn check_pattern(errors: &mut Vec<ValidationError>, field: &'static str, pattern: &str) {
    if let Err(e) = Regex::new(pattern) {
        errors.push(ValidationError::InvalidPattern {
            field,
            pattern: pattern.to_string(),
            reason: e.to_string(),
        });
    }
}
