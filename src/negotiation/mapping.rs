//! Media-type to file-extension rules.

use regex::{Regex, RegexBuilder};

/// A configured rule associating a media-type pattern with a file extension.
#[derive(Debug, Clone)]
pub struct TypeMapping {
    media_type: Regex,
    extension: String,
}

impl TypeMapping {
    /// Compile a mapping. The pattern is case-insensitive and the extension
    /// is normalized to start with `.`.
    pub fn new(pattern: &str, extension: &str) -> Result<Self, regex::Error> {
        let media_type = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            media_type,
            extension: normalize_extension(extension),
        })
    }

    /// Whether this mapping applies to the given media type (unanchored search).
    pub fn matches(&self, media_type: &str) -> bool {
        self.media_type.is_match(media_type)
    }

    /// The extension, always starting with `.`.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn pattern(&self) -> &str {
        self.media_type.as_str()
    }
}

/// Prefix an extension with `.` unless it already has one.
pub fn normalize_extension(extension: &str) -> String {
    if extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{extension}")
    }
}
