//! Ranked media-type preferences.
//!
//! # Ordering contract
//! A `PreferenceList` always iterates most-preferred first. Lists built from an
//! `Accept` header are stably sorted by weight (descending), so entries with
//! equal weight keep the order the client sent them in. Lists built with
//! [`PreferenceList::from_ranked`] are taken as already ranked.

/// Media type substituted when a request carries no type preferences.
pub const ANY_MEDIA_TYPE: &str = "*/*";

/// A single media type and its weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Preference {
    pub media_type: String,
    pub weight: f32,
}

/// Ordered media-type preferences, most preferred first.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceList {
    entries: Vec<Preference>,
}

impl PreferenceList {
    /// Build from entries that are already ranked most-preferred first.
    ///
    /// Duplicate media types keep their first position. An empty input yields
    /// the default list.
    pub fn from_ranked<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        let mut list: Vec<Preference> = Vec::new();
        for (media_type, weight) in entries {
            let media_type = media_type.into();
            if list.iter().any(|p| p.media_type == media_type) {
                continue;
            }
            list.push(Preference { media_type, weight });
        }

        if list.is_empty() {
            return Self::default();
        }
        Self { entries: list }
    }

    /// Build from a raw `Accept` header value.
    ///
    /// Media-type parameters other than `q` are dropped, entries with `q=0`
    /// are not acceptable and are removed. A missing, empty or entirely
    /// unparsable header yields the default list.
    pub fn from_accept_header(header: Option<&str>) -> Self {
        let Some(header) = header else {
            return Self::default();
        };

        let mut parsed: Vec<(String, f32)> = header
            .split(',')
            .filter_map(parse_media_range)
            .filter(|(_, weight)| *weight > 0.0)
            .collect();

        // Stable: equal weights keep header order.
        parsed.sort_by(|a, b| b.1.total_cmp(&a.1));

        Self::from_ranked(parsed)
    }

    /// Media types, most preferred first.
    pub fn media_types(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|p| p.media_type.as_str())
    }

    /// Entries, most preferred first.
    pub fn iter(&self) -> std::slice::Iter<'_, Preference> {
        self.entries.iter()
    }

    /// Weight of a media type, if present.
    pub fn weight(&self, media_type: &str) -> Option<f32> {
        self.entries
            .iter()
            .find(|p| p.media_type == media_type)
            .map(|p| p.weight)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PreferenceList {
    fn default() -> Self {
        Self {
            entries: vec![Preference {
                media_type: ANY_MEDIA_TYPE.to_string(),
                weight: 1.0,
            }],
        }
    }
}

impl<'a> IntoIterator for &'a PreferenceList {
    type Item = &'a Preference;
    type IntoIter = std::slice::Iter<'a, Preference>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Parse one `type/subtype;param=value;q=0.5` range.
fn parse_media_range(range: &str) -> Option<(String, f32)> {
    let mut parts = range.split(';');
    let media_type = parts.next()?.trim();
    if media_type.is_empty() || !media_type.contains('/') {
        return None;
    }

    let mut weight = 1.0;
    for param in parts {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        if key.trim().eq_ignore_ascii_case("q") {
            // An unreadable weight invalidates the whole range.
            weight = value.trim().parse::<f32>().ok()?.clamp(0.0, 1.0);
        }
    }

    Some((media_type.to_ascii_lowercase(), weight))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(list: &PreferenceList) -> Vec<&str> {
        list.media_types().collect()
    }

    #[test]
    fn test_missing_header_defaults_to_any() {
        let list = PreferenceList::from_accept_header(None);
        assert_eq!(types(&list), vec!["*/*"]);
        assert_eq!(list.weight("*/*"), Some(1.0));

        let empty = PreferenceList::from_accept_header(Some(""));
        assert_eq!(types(&empty), vec!["*/*"]);
    }

    #[test]
    fn test_header_order_kept_for_equal_weights() {
        let list = PreferenceList::from_accept_header(Some("text/html,text/turtle"));
        assert_eq!(types(&list), vec!["text/html", "text/turtle"]);
    }

    #[test]
    fn test_sorted_by_weight() {
        let list = PreferenceList::from_accept_header(Some(
            "text/html;q=0.8, application/json+ld",
        ));
        assert_eq!(types(&list), vec!["application/json+ld", "text/html"]);
        assert_eq!(list.weight("text/html"), Some(0.8));
    }

    #[test]
    fn test_browser_header() {
        let list = PreferenceList::from_accept_header(Some(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,*/*;q=0.8",
        ));
        assert_eq!(
            types(&list),
            vec![
                "text/html",
                "application/xhtml+xml",
                "image/avif",
                "application/xml",
                "*/*"
            ]
        );
    }

    #[test]
    fn test_zero_weight_and_garbage_are_dropped() {
        let list = PreferenceList::from_accept_header(Some(
            "text/csv;q=0, nonsense, application/json;q=abc, text/plain;level=1",
        ));
        assert_eq!(types(&list), vec!["text/plain"]);
    }

    #[test]
    fn test_from_ranked_keeps_first_duplicate() {
        let list = PreferenceList::from_ranked([
            ("application/json", 1.0),
            ("text/html", 1.0),
            ("application/json", 0.5),
        ]);
        assert_eq!(types(&list), vec!["application/json", "text/html"]);
        assert_eq!(list.weight("application/json"), Some(1.0));
    }

    #[test]
    fn test_from_ranked_empty_is_default() {
        let list = PreferenceList::from_ranked(Vec::<(String, f32)>::new());
        assert_eq!(list, PreferenceList::default());
    }
}
