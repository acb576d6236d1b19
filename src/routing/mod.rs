//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → path.rs (absolute target, path relative to base URL)
//!     → filter.rs (is content selection eligible?)
//!     → rewrite.rs (does a substitution rule redirect it?)
//!
//! Rule Compilation (at startup):
//!     active_paths[], redirects.rules[]
//!     → Compile regexes in configured order
//!     → Freeze as immutable PathFilter / Rewriter
//! ```
//!
//! # Design Decisions
//! - Patterns compiled at startup, immutable at runtime
//! - Deterministic: same input always gives the same decision
//! - Rewrite rules: first match wins (configured order)

pub mod filter;
pub mod path;
pub mod rewrite;

pub use filter::{ActivePaths, PathFilter};
pub use path::BaseUrl;
pub use rewrite::{RewriteRule, Rewriter};
