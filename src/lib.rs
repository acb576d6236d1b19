//! Content-negotiation redirect library.
//!
//! Maps an extensionless resource path plus an `Accept` header onto the
//! extension-qualified path of the best matching representation.

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod negotiation;
pub mod observability;
pub mod routing;
pub mod store;

pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
