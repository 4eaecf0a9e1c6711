//! The [`Token`] type produced by the [`Lexer`](super::Lexer).

use std::{fmt::Display, sync::Arc};

use crate::location::Location;

/// A named, positioned lexeme.
///
/// The `name` is the name of the rule that produced the token (e.g. `INT` or
/// `(`), and `value` is the exact text it matched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// The name of the rule that matched this token.
    name: Arc<str>,
    /// The matched text.
    value: String,
    /// The position of the first character of `value`.
    location: Location,
}

impl Token {
    /// Constructs a new [`Token`].
    pub fn new(name: impl Into<Arc<str>>, value: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            location,
        }
    }

    /// The name of the rule that produced this token.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The text matched by this token.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The location of the first character of this token.
    pub fn location(&self) -> &Location {
        &self.location
    }
}

/// Literal tokens (where the value repeats the name) print as `[name]`,
/// everything else prints as `[name:value]`.
impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.value.is_empty() || *self.value == *self.name {
            write!(f, "[{}]", self.name)
        } else {
            write!(f, "[{}:{}]", self.name, self.value)
        }
    }
}
