//! Parse failures and their rendering.

use thiserror::Error;

use crate::location::Location;

/// The `got` value reported when the input ran out.
pub const EOF: &str = "EOF";

/// A failed match: what was expected, what was found, and where.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{location}: SYNTAX ERROR: Expected {}, but got '{got}' instead", render_expected(.expected))]
pub struct ParseError {
    /// The token names that would have allowed parsing to continue, in
    /// insertion order. May contain duplicates, which are dropped when rendering.
    expected: Vec<String>,
    /// The text of the offending token, or [`EOF`].
    got: String,
    /// The location of the offending token.
    location: Location,
}

impl ParseError {
    /// Constructs a new [`ParseError`].
    pub fn new(expected: Vec<String>, got: impl Into<String>, location: Location) -> Self {
        Self {
            expected,
            got: got.into(),
            location,
        }
    }

    /// The expected token names, in insertion order (possibly with duplicates).
    pub fn expected(&self) -> &[String] {
        &self.expected
    }

    /// The expected token names with duplicates removed, keeping the first occurrence.
    pub fn unique_expected(&self) -> Vec<&str> {
        dedup(&self.expected)
    }

    /// The text of the offending token, or [`EOF`].
    pub fn got(&self) -> &str {
        &self.got
    }

    /// The location of the offending token.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Consumes `self` and returns the same error reported at `location`.
    pub fn relocated(self, location: Location) -> Self {
        Self { location, ..self }
    }

    /// Folds `candidate` into `self`, the best error found so far among a set
    /// of failed alternatives.
    ///
    /// Errors at the same line and column are equally plausible, so their
    /// expected sets are unioned. An error anywhere else replaces `self`
    /// outright, whichever of the two got further; only its location is kept
    /// from `self` when the candidate's is [unknown](Location::is_unknown).
    pub fn merge(&mut self, candidate: ParseError) {
        if self.location.same_position(&candidate.location) {
            self.expected.extend(candidate.expected);
        } else {
            self.expected = candidate.expected;
            self.got = candidate.got;
            if !candidate.location.is_unknown() {
                self.location = candidate.location;
            }
        }
    }
}

/// Removes duplicates from `names`, keeping first occurrences in order.
fn dedup(names: &[String]) -> Vec<&str> {
    let mut unique: Vec<&str> = Vec::with_capacity(names.len());
    for name in names {
        if !unique.contains(&name.as_str()) {
            unique.push(name);
        }
    }
    unique
}

/// Renders the expected set as `'a'`, `'a' or 'b'`, or `'a', 'b' or 'c'`.
fn render_expected(expected: &[String]) -> String {
    match dedup(expected).split_last() {
        None => String::new(),
        Some((last, [])) => format!("'{last}'"),
        Some((last, init)) => {
            let init = init
                .iter()
                .map(|name| format!("'{name}'"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{init} or '{last}'")
        }
    }
}

/// The failure of a top-level [`Parser::parse`](super::Parser::parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// The grammar rejected the input.
    #[error(transparent)]
    Unexpected(#[from] ParseError),
    /// The grammar matched a prefix of the input, but tokens were left over.
    #[error("{location}: SYNTAX ERROR: Expected EOF, but got '{got}' instead")]
    TrailingInput {
        /// The text of the first leftover token.
        got: String,
        /// The location of the first leftover token.
        location: Location,
    },
}

impl SyntaxError {
    /// The location this error points at.
    pub fn location(&self) -> &Location {
        match self {
            SyntaxError::Unexpected(error) => error.location(),
            SyntaxError::TrailingInput { location, .. } => location,
        }
    }

    /// Moves `self` to `location` if it points at no real input, as happens
    /// when the token stream was empty.
    pub fn located_or(self, location: Location) -> Self {
        if !self.location().is_unknown() {
            return self;
        }

        match self {
            SyntaxError::Unexpected(error) => SyntaxError::Unexpected(error.relocated(location)),
            SyntaxError::TrailingInput { got, .. } => SyntaxError::TrailingInput { got, location },
        }
    }
}
