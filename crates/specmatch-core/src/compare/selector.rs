//! Path selection by case-insensitive regular expressions.

use crate::errors::{ExError, SpecMatchError};
use regex::{RegexBuilder, RegexSet, RegexSetBuilder};

/// Compiled set of path patterns naming the leaves that take part in a
/// comparison.
///
/// Patterns are full regular expressions matched case-insensitively anywhere
/// in the canonical path; anchor with `^`/`$` for prefix or exact matches.
/// A selector with no patterns selects nothing.
#[derive(Debug, Clone)]
pub struct Selector {
    patterns: Vec<String>,
    set: RegexSet,
}

impl Selector {
    /// Compile `patterns`.
    ///
    /// # Errors
    ///
    /// `InvalidPattern` naming the first pattern that fails to compile.
    pub fn new<I, S>(patterns: I) -> Result<Self, ExError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns: Vec<String> = patterns
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .collect();

        for pattern in &patterns {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| invalid(pattern, e))?;
        }

        let set = RegexSetBuilder::new(&patterns)
            .case_insensitive(true)
            .build()
            .map_err(|e| invalid(&patterns.join(" | "), e))?;

        Ok(Self { patterns, set })
    }

    /// Compile `patterns`, or `default` when `patterns` is empty.
    ///
    /// Call sites own their defaults (e.g. [`crate::scope::SECRET`]).
    ///
    /// # Errors
    ///
    /// `InvalidPattern` naming the first pattern that fails to compile.
    pub fn with_default<S: AsRef<str>>(patterns: &[S], default: &[&str]) -> Result<Self, ExError> {
        if patterns.is_empty() {
            Self::new(default)
        } else {
            Self::new(patterns)
        }
    }

    /// Selector that matches no path.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            set: RegexSet::empty(),
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// `path` matches at least one pattern.
    pub fn matches(&self, path: &str) -> bool {
        self.set.is_match(path)
    }
}

fn invalid(pattern: &str, err: regex::Error) -> ExError {
    ExError::from(SpecMatchError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: err.to_string(),
    })
    .with_op("compile_selector")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;

    #[test]
    fn test_matches_case_insensitively() {
        let selector = Selector::new(["^Template\\.Spec\\.Containers\\.\\d+\\.Image$"]).unwrap();
        assert!(selector.matches("template.spec.containers.0.image"));
        assert!(!selector.matches("template.spec.containers.0.imagepullpolicy"));
    }

    #[test]
    fn test_escape_classes_survive_case_folding() {
        // `\D` must keep meaning "non-digit"; lower-casing the pattern text would turn it into `\d`
        let selector = Selector::new(["^tags\\.\\D"]).unwrap();
        assert!(!selector.matches("tags.0"));
        assert!(selector.matches("tags.x"));
    }

    #[test]
    fn test_unanchored_pattern_matches_anywhere() {
        let selector = Selector::new(["image"]).unwrap();
        assert!(selector.matches("template.spec.containers.0.image"));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = Selector::new(["^spec\\.", "(unclosed"]).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidPattern);
        assert_eq!(err.pattern(), Some("(unclosed"));
    }

    #[test]
    fn test_with_default_only_when_empty() {
        let none: [&str; 0] = [];
        let selector = Selector::with_default(&none, &["^spec\\."]).unwrap();
        assert_eq!(selector.patterns(), &["^spec\\.".to_string()]);

        let selector = Selector::with_default(&["^metadata\\."], &["^spec\\."]).unwrap();
        assert_eq!(selector.patterns(), &["^metadata\\.".to_string()]);
    }

    #[test]
    fn test_empty_selects_nothing() {
        let selector = Selector::empty();
        assert!(selector.is_empty());
        assert!(!selector.matches("spec.replicas"));
        assert!(!selector.matches(""));
    }
}
