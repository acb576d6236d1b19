//! Pattern-substitution redirects.
//!
//! Rules are tried in configured order and the first pattern that matches the
//! relative path wins. `$0`, `$1`, … in the replacement are substituted with
//! the corresponding capture groups; groups that did not participate are
//! substituted with the empty string.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{SelectionError, SelectionResult};

static GROUP_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\d+)").expect("group reference pattern is valid"));

/// A single `pattern → replacement` rule.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pattern: Regex,
    replacement: String,
}

impl RewriteRule {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }

    /// Apply the rule, or `None` if the pattern does not match.
    pub fn apply(&self, path: &str) -> Option<String> {
        let captures = self.pattern.captures(path)?;
        Some(substitute(&self.replacement, &captures))
    }
}

/// Ordered list of rewrite rules.
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    rules: Vec<RewriteRule>,
}

impl Rewriter {
    pub fn new(rules: Vec<RewriteRule>) -> Self {
        Self { rules }
    }

    /// Compute the rewritten target for a relative path.
    pub fn rewrite(&self, relative_path: &str) -> SelectionResult<String> {
        let rewritten = self
            .rules
            .iter()
            .find_map(|rule| rule.apply(relative_path))
            .ok_or_else(|| {
                SelectionError::NotImplemented(format!("No redirect configured for {relative_path}"))
            })?;

        if rewritten == relative_path {
            return Err(SelectionError::NotImplemented(format!(
                "Target {relative_path} is already correct."
            )));
        }

        Ok(rewritten)
    }
}

fn substitute(replacement: &str, captures: &Captures<'_>) -> String {
    GROUP_REFERENCE
        .replace_all(replacement, |reference: &Captures<'_>| {
            reference[1]
                .parse::<usize>()
                .ok()
                .and_then(|n| captures.get(n))
                .map_or_else(String::new, |m| m.as_str().to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewriter(rules: &[(&str, &str)]) -> Rewriter {
        Rewriter::new(
            rules
                .iter()
                .map(|(p, r)| RewriteRule::new(p, *r).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_rewrites_capture_group() {
        let rw = rewriter(&[(r"^/old/(.*)$", "/new/$1")]);
        assert_eq!(rw.rewrite("/old/foo").unwrap(), "/new/foo");
    }

    #[test]
    fn test_no_matching_rule() {
        let rw = rewriter(&[(r"^/old/(.*)$", "/new/$1")]);
        assert!(matches!(
            rw.rewrite("/new/foo"),
            Err(SelectionError::NotImplemented(_))
        ));
    }

    #[test]
    fn test_rewrite_to_itself_is_already_correct() {
        let rw = rewriter(&[(r"^/(new|old)/(.*)$", "/new/$2")]);
        assert_eq!(rw.rewrite("/old/foo").unwrap(), "/new/foo");
        match rw.rewrite("/new/foo") {
            Err(SelectionError::NotImplemented(msg)) => assert!(msg.contains("already correct")),
            other => panic!("expected NotImplemented, got {:?}", other),
        }
    }

    #[test]
    fn test_first_rule_wins() {
        let rw = rewriter(&[(r"^/a/(.*)$", "/first/$1"), (r"^/a/b$", "/second")]);
        assert_eq!(rw.rewrite("/a/b").unwrap(), "/first/b");
    }

    #[test]
    fn test_whole_match_and_missing_groups() {
        let rw = rewriter(&[(r"^/x(/y)?$", "/moved$0$1$9")]);
        assert_eq!(rw.rewrite("/x").unwrap(), "/moved/x");
        assert_eq!(rw.rewrite("/x/y").unwrap(), "/moved/x/y/y");
    }

    #[test]
    fn test_absolute_replacement_kept() {
        let rw = rewriter(&[(r"^/docs/(.*)$", "https://docs.example.org/$1")]);
        assert_eq!(rw.rewrite("/docs/intro").unwrap(), "https://docs.example.org/intro");
    }
}
