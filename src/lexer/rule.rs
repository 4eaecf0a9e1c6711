//! Patterns used by the [`Lexer`](super::Lexer) to recognise tokens and skippable text.

use std::sync::Arc;

use regex::Regex;

use super::LexError;

/// Something that can be matched at the start of the remaining input.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches exactly this text, compared as a plain prefix.
    Literal(String),
    /// Matches a regex anchored at the start of the input.
    Regex(Regex),
}

impl Pattern {
    /// Compiles `pattern` into a [`Pattern::Regex`] anchored at the start of the input.
    pub fn regex(pattern: &str) -> Result<Self, LexError> {
        Regex::new(&format!("^(?:{pattern})"))
            .map(Self::Regex)
            .map_err(|source| LexError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Returns the length in bytes of the non-empty prefix of `input` matched
    /// by `self`, if any.
    ///
    /// Empty matches are reported as `None`, since they would never advance
    /// the lexer.
    pub fn match_len(&self, input: &str) -> Option<usize> {
        let len = match self {
            Pattern::Literal(text) => input.starts_with(text.as_str()).then_some(text.len())?,
            Pattern::Regex(regex) => regex.find(input)?.end(),
        };

        (len > 0).then_some(len)
    }
}

/// A named token rule.
#[derive(Debug, Clone)]
pub struct Rule {
    /// The name given to tokens produced by this rule.
    pub name: Arc<str>,
    /// The pattern recognising those tokens.
    pub pattern: Pattern,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_literal_pattern() {
        let pattern = Pattern::Literal("fn".to_string());
        assert_eq!(pattern.match_len("fn main"), Some(2));
        assert_eq!(pattern.match_len("f"), None);
        assert_eq!(pattern.match_len(" fn"), None);
    }

    #[test]
    fn check_regex_pattern_is_anchored() {
        let pattern = Pattern::regex(r"\d+").unwrap();
        assert_eq!(pattern.match_len("123abc"), Some(3));
        assert_eq!(pattern.match_len("abc123"), None);
    }

    #[test]
    fn check_alternation_is_anchored_as_a_whole() {
        let pattern = Pattern::regex("a|b").unwrap();
        assert_eq!(pattern.match_len("ba"), Some(1));
        assert_eq!(pattern.match_len("cb"), None);
    }

    #[test]
    fn check_empty_matches_are_rejected() {
        let pattern = Pattern::regex(r"\s*").unwrap();
        assert_eq!(pattern.match_len("abc"), None);
        assert_eq!(pattern.match_len("  abc"), Some(2));
    }

    #[test]
    fn check_invalid_regex_is_reported() {
        let error = Pattern::regex("(unclosed").unwrap_err();
        assert!(matches!(error, LexError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }
}
