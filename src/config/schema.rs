//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.
//! Rule lists are arrays so that their configured order is their priority.

use serde::{Deserialize, Serialize};

use crate::http::response::RedirectStatus;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Externally visible base URL of the server.
    pub base_url: String,

    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Resource store settings.
    pub store: StoreConfig,

    /// Content-negotiation redirect settings.
    pub content_selection: ContentSelectionConfig,

    /// Pattern-substitution redirect settings.
    pub redirects: RedirectConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/".to_string(),
            listener: ListenerConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
            store: StoreConfig::default(),
            content_selection: ContentSelectionConfig::default(),
            redirects: RedirectConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Resource store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory documents are served from.
    pub root: String,

    /// Document served for directory paths.
    pub index_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: "./data".to_string(),
            index_file: "index.html".to_string(),
        }
    }
}

/// How content selection answers an extensionless request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Redirect to the extension-qualified path.
    #[default]
    Redirect,
    /// Serve the extension-qualified resource under the original path.
    Serve,
}

/// Content-negotiation redirect configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentSelectionConfig {
    /// Enable content selection.
    pub enabled: bool,

    /// Redirect or serve.
    pub mode: SelectionMode,

    /// Redirect status code (301, 302, 303, 307 or 308).
    pub status_code: RedirectStatus,

    /// Patterns (relative to the base URL) where content selection is active.
    /// Absent means active everywhere.
    pub active_paths: Option<Vec<String>>,

    /// Media-type pattern to extension rules, in priority order.
    pub type_mappings: Vec<TypeMappingConfig>,
}

impl Default for ContentSelectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: SelectionMode::Redirect,
            status_code: RedirectStatus::TemporaryRedirect,
            active_paths: None,
            type_mappings: Vec::new(),
        }
    }
}

/// A single media-type rule.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TypeMappingConfig {
    /// Regular expression matched against offered media types.
    pub media_type: String,

    /// File extension, with or without the leading dot.
    pub extension: String,
}

/// Pattern-substitution redirect configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedirectConfig {
    /// Redirect status code (301, 302, 303, 307 or 308).
    pub status_code: RedirectStatus,

    /// Rewrite rules, in priority order.
    pub rules: Vec<RewriteRuleConfig>,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            status_code: RedirectStatus::PermanentRedirect,
            rules: Vec::new(),
        }
    }
}

/// A single rewrite rule.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RewriteRuleConfig {
    /// Regular expression matched against the relative path.
    pub pattern: String,

    /// Replacement with `$0`, `$1`, … capture references.
    pub target: String,
}
