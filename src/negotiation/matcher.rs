//! Preference-to-extension matching.
//!
//! # Responsibilities
//! - Walk client preferences most-preferred first
//! - For each media type, find the first configured mapping that matches
//! - Stop at the first media type that has a mapping
//!
//! # Design Decisions
//! - Preference order beats mapping order: a less-preferred media type never
//!   wins over a more-preferred one, whatever the mapping priority
//! - Mapping order only breaks ties within a single media type
//! - No state; the same inputs always give the same result

use crate::error::{SelectionError, SelectionResult};
use crate::negotiation::mapping::TypeMapping;
use crate::negotiation::preferences::PreferenceList;

/// The chosen extension and the media type it was chosen for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub extension: String,
    pub media_type: String,
}

/// Picks the best extension for a preference list.
#[derive(Debug, Clone, Default)]
pub struct NegotiationMatcher {
    mappings: Vec<TypeMapping>,
}

impl NegotiationMatcher {
    /// Create a matcher over mappings in priority order.
    pub fn new(mappings: Vec<TypeMapping>) -> Self {
        Self { mappings }
    }

    /// Compile `(pattern, extension)` pairs in priority order.
    pub fn compile<'a, I>(rules: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mappings = rules
            .into_iter()
            .map(|(pattern, extension)| TypeMapping::new(pattern, extension))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(mappings))
    }

    /// Select the extension for the most preferred media type that has one.
    pub fn select(&self, preferences: &PreferenceList) -> SelectionResult<MatchResult> {
        for media_type in preferences.media_types() {
            if let Some(mapping) = self.mappings.iter().find(|m| m.matches(media_type)) {
                return Ok(MatchResult {
                    extension: mapping.extension().to_string(),
                    media_type: media_type.to_string(),
                });
            }
        }

        Err(SelectionError::NotAcceptable {
            attempted: preferences.media_types().map(str::to_string).collect(),
        })
    }

    pub fn mappings(&self) -> &[TypeMapping] {
        &self.mappings
    }
}
