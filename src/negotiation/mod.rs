//! Content negotiation subsystem.
//!
//! # Data Flow
//! ```text
//! Accept header
//!     → preferences.rs (ranked PreferenceList, most preferred first)
//!     → matcher.rs (scan preferences × TypeMappings)
//!     → MatchResult { extension, media_type } or NotAcceptable
//!
//! Mapping Compilation (at startup):
//!     [content_selection.type_mappings]
//!     → mapping.rs (compile regex, normalize extension)
//!     → Freeze as immutable NegotiationMatcher
//! ```

pub mod mapping;
pub mod matcher;
pub mod preferences;

pub use mapping::TypeMapping;
pub use matcher::{MatchResult, NegotiationMatcher};
pub use preferences::{Preference, PreferenceList};
