//! Source positions attached to tokens, trees and diagnostics.

use std::{fmt::Display, sync::Arc};

/// The file name carried by [`Location::unknown`].
const UNKNOWN_FILE: &str = "?";

/// The line and column carried by [`Location::unknown`].
const UNKNOWN_POSITION: i32 = -1;

/// An immutable position in some source file.
///
/// Lines and columns are 1-based and count characters rather than bytes. The
/// sentinel produced by [`Location::unknown`] marks positions that do not
/// correspond to real input (e.g. the point after the last token); it only
/// takes part in comparisons while merging errors. Callers that know the file
/// being parsed replace it with [`SyntaxError::located_or`](crate::parser::SyntaxError::located_or)
/// before showing a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    /// The name of the file this location points into.
    file: Arc<str>,
    /// The 1-based line number, or `-1` for the sentinel.
    line: i32,
    /// The 1-based column number, or `-1` for the sentinel.
    column: i32,
}

impl Location {
    /// Constructs a new [`Location`].
    pub fn new(file: impl Into<Arc<str>>, line: i32, column: i32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Returns the sentinel location `?:-1:-1`.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_FILE, UNKNOWN_POSITION, UNKNOWN_POSITION)
    }

    /// Returns `true` if `self` is the sentinel produced by [`Location::unknown`].
    #[inline(always)]
    pub fn is_unknown(&self) -> bool {
        self.line == UNKNOWN_POSITION
    }

    /// Returns `true` if `self` and `other` share a line and column.
    ///
    /// The file is deliberately ignored: a grammar only ever sees tokens from
    /// one file at a time.
    #[inline(always)]
    pub fn same_position(&self, other: &Self) -> bool {
        self.line == other.line && self.column == other.column
    }

    /// The name of the file.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// The 1-based line number.
    pub fn line(&self) -> i32 {
        self.line
    }

    /// The 1-based column number.
    pub fn column(&self) -> i32 {
        self.column
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_unknown_location() {
        let unknown = Location::unknown();
        assert!(unknown.is_unknown());
        assert_eq!(unknown.to_string(), "?:-1:-1");
        assert!(!Location::new("<test>", 1, 1).is_unknown());
    }

    #[test]
    fn check_same_position_ignores_file() {
        let a = Location::new("a.txt", 3, 7);
        let b = Location::new("b.txt", 3, 7);
        assert!(a.same_position(&b));
        assert_ne!(a, b);
        assert!(!a.same_position(&Location::new("a.txt", 3, 8)));
    }
}
