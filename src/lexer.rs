//! A configurable, regex-driven lexer.
//!
//! A [`Lexer`] is an ordered list of named token [`Rule`]s together with an
//! ordered list of skip patterns. Lexing is a single left-to-right scan: at
//! each position every skip pattern is tried (and its match discarded), then
//! the token rules are tried **in registration order** and the first one that
//! matches wins. This is first-match rather than longest-match, so keywords
//! must be registered before the more general rules (e.g. identifiers) that
//! would otherwise shadow them.
//!
//! ```
//! use descent::lexer::Lexer;
//!
//! let mut lexer = Lexer::new();
//! lexer.add_token("fn");
//! lexer.add_regex("IDENTIFIER", "[a-zA-Z_][a-zA-Z_0-9]*").unwrap();
//! lexer.skip(r"\s+").unwrap();
//!
//! let tokens = lexer.lex("<doc>", "fn main").unwrap();
//! assert_eq!(tokens[0].name(), "fn");
//! assert_eq!(tokens[1].name(), "IDENTIFIER");
//! ```

use thiserror::Error;
use tracing::{debug, trace};

use crate::location::Location;

use self::{
    rule::{Pattern, Rule},
    token::Token,
};

pub mod rule;
pub mod token;

/// The errors produced while configuring a [`Lexer`] or lexing with it.
#[derive(Debug, Error)]
pub enum LexError {
    /// No skip pattern and no token rule matched at `location`.
    #[error("{location}: SYNTAX ERROR: Unknown character: '{character}'")]
    UnknownCharacter {
        /// The first character that could not be lexed.
        character: char,
        /// The position of `character`.
        location: Location,
    },
    /// A regex given to [`Lexer::add_regex`] or [`Lexer::skip`] failed to compile.
    #[error("invalid token pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The pattern as written by the caller.
        pattern: String,
        /// The underlying [`regex`] error.
        source: regex::Error,
    },
}

/// An ordered set of token rules and skip patterns.
#[derive(Debug, Clone, Default)]
pub struct Lexer {
    /// Token rules, in registration order.
    rules: Vec<Rule>,
    /// Skip patterns, in registration order.
    skips: Vec<Pattern>,
}

impl Lexer {
    /// Returns a new [`Lexer`] with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token rule matching the literal text `name`.
    pub fn add_token(&mut self, name: &str) -> &mut Self {
        trace!(name, "registered literal token rule");
        self.rules.push(Rule {
            name: name.into(),
            pattern: Pattern::Literal(name.to_string()),
        });
        self
    }

    /// Registers a token rule named `name` matching the regex `pattern`.
    ///
    /// A `pattern` identical to `name` is registered as a literal, exactly
    /// as if [`Lexer::add_token`] had been called.
    pub fn add_regex(&mut self, name: &str, pattern: &str) -> Result<&mut Self, LexError> {
        if name == pattern {
            return Ok(self.add_token(name));
        }

        trace!(name, pattern, "registered regex token rule");
        self.rules.push(Rule {
            name: name.into(),
            pattern: Pattern::regex(pattern)?,
        });
        Ok(self)
    }

    /// Registers a pattern whose matches are discarded (e.g. whitespace or comments).
    pub fn skip(&mut self, pattern: &str) -> Result<&mut Self, LexError> {
        trace!(pattern, "registered skip pattern");
        self.skips.push(Pattern::regex(pattern)?);
        Ok(self)
    }

    /// Scans `text` into a sequence of [`Token`]s, labelling their locations with `file`.
    ///
    /// Fails with [`LexError::UnknownCharacter`] at the first position where
    /// neither a skip pattern nor a token rule matches.
    pub fn lex(&self, file: &str, text: &str) -> Result<Vec<Token>, LexError> {
        let mut cursor = Cursor::new(file, text);
        let mut tokens = Vec::new();

        while !cursor.is_empty() {
            let mut matched = false;

            for skip in &self.skips {
                if let Some(len) = skip.match_len(cursor.remaining()) {
                    cursor.advance(len);
                    matched = true;
                }
            }

            let location = cursor.location();
            let rule = self
                .rules
                .iter()
                .find_map(|rule| Some((rule, rule.pattern.match_len(cursor.remaining())?)));

            if let Some((rule, len)) = rule {
                let value = cursor.advance(len);
                tokens.push(Token::new(rule.name.clone(), value, location));
                matched = true;
            }

            if !matched {
                return Err(cursor.unknown_character());
            }
        }

        debug!(file, count = tokens.len(), "lexed tokens");
        Ok(tokens)
    }
}

/// The scanning state of [`Lexer::lex`]: the unconsumed input and the
/// line/column of its first character.
struct Cursor<'src> {
    /// The file name stamped onto every [`Location`].
    file: std::sync::Arc<str>,
    /// The unconsumed input.
    rest: &'src str,
    /// The 1-based line of the first character of `rest`.
    line: i32,
    /// The 1-based column of the first character of `rest`.
    column: i32,
}

impl<'src> Cursor<'src> {
    /// Returns a cursor at the start of `text`.
    fn new(file: &str, text: &'src str) -> Self {
        Self {
            file: file.into(),
            rest: text,
            line: 1,
            column: 1,
        }
    }

    /// Returns `true` once all input has been consumed.
    fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    /// The unconsumed input.
    fn remaining(&self) -> &'src str {
        self.rest
    }

    /// The current position.
    fn location(&self) -> Location {
        Location::new(self.file.clone(), self.line, self.column)
    }

    /// Consumes `len` bytes, updating the line and column, and returns the consumed text.
    fn advance(&mut self, len: usize) -> &'src str {
        let (consumed, rest) = self.rest.split_at(len);

        for c in consumed.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        self.rest = rest;
        consumed
    }

    /// Builds the error reported when nothing matches at the current position.
    fn unknown_character(&self) -> LexError {
        LexError::UnknownCharacter {
            // only ever called while `rest` is non-empty
            character: self.rest.chars().next().unwrap_or_default(),
            location: self.location(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The token rules of a small arithmetic language.
    fn math_lexer() -> Lexer {
        let mut lexer = Lexer::new();
        lexer.add_regex("INT", r"\d+").unwrap();
        lexer.add_regex("OPERATOR", r"[+\-*/^]").unwrap();
        lexer.add_token("(").add_token(")");
        lexer
    }

    /// Renders `tokens` in the `[name:value]` list format.
    fn render(tokens: &[Token]) -> String {
        tokens
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    const MATH_TOKENS: &str = "[(], [INT:1], [OPERATOR:+], [INT:3], [(], [INT:2], [OPERATOR:/], \
                               [INT:4], [)], [OPERATOR:^], [INT:2], [)], [OPERATOR:/], [INT:10]";

    #[test]
    fn check_math_grammar() {
        let mut lexer = math_lexer();
        let tokens = lexer.lex("<test>", "(1+3(2/4)^2)/10").unwrap();
        assert_eq!(render(&tokens), MATH_TOKENS);

        lexer.skip(r"\s+").unwrap();
        let tokens = lexer.lex("<test>", "(1 + 3(2 / 4)^2) / 10").unwrap();
        assert_eq!(render(&tokens), MATH_TOKENS);

        let tokens = lexer.lex("<test>", "  ( 1+3 (2/ 4 ) ^2\n)\t/10  ").unwrap();
        assert_eq!(render(&tokens), MATH_TOKENS);
    }

    #[test]
    fn check_first_match_wins() {
        let mut lexer = Lexer::new();
        lexer.add_token("fn");
        lexer.add_regex("IDENTIFIER", "[a-zA-Z_][a-zA-Z_0-9]*").unwrap();

        let tokens = lexer.lex("<test>", "fn").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].name(), "fn");

        // first-match, not longest-match: the keyword shadows the prefix of `fnord`
        let tokens = lexer.lex("<test>", "fnord").unwrap();
        assert_eq!(render(&tokens), "[fn], [IDENTIFIER:ord]");
    }

    #[test]
    fn check_positions_across_newlines() {
        let mut lexer = Lexer::new();
        lexer.add_regex("CHAR", "[a-z]").unwrap();
        lexer.skip(r"\n").unwrap();

        let tokens = lexer.lex("<test>", "a\nb").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(*tokens[0].location(), Location::new("<test>", 1, 1));
        assert_eq!(*tokens[1].location(), Location::new("<test>", 2, 1));
    }

    #[test]
    fn check_columns_count_characters() {
        let mut lexer = Lexer::new();
        lexer.add_regex("WORD", r"\w+").unwrap();
        lexer.skip(r"\s+").unwrap();

        let tokens = lexer.lex("<test>", "héllo wörld").unwrap();
        assert_eq!(tokens[1].location().column(), 7);
    }

    #[test]
    fn check_unknown_character() {
        let mut lexer = math_lexer();
        lexer.skip(r"\s+").unwrap();

        let error = lexer.lex("<test>", "(7 ~ 2").unwrap_err();
        assert_eq!(
            error.to_string(),
            "<test>:1:4: SYNTAX ERROR: Unknown character: '~'"
        );
        assert!(matches!(
            error,
            LexError::UnknownCharacter { character: '~', ref location } if location.line() == 1
        ));
    }

    #[test]
    fn check_literal_registered_through_add_regex() {
        let mut lexer = Lexer::new();
        // `+` would be an invalid regex, but a pattern equal to its name is a literal
        lexer.add_regex("+", "+").unwrap();
        let tokens = lexer.lex("<test>", "++").unwrap();
        assert_eq!(render(&tokens), "[+], [+]");
    }

    #[test]
    fn check_empty_input() {
        let tokens = math_lexer().lex("<test>", "").unwrap();
        assert!(tokens.is_empty());
    }
}
