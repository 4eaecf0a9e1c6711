//! A small recursive-descent parsing toolkit.
//!
//! The toolkit has two halves:
//!
//! 1. A [`Lexer`](lexer::Lexer), configured with named token rules (literal
//!    text or regexes) and skip patterns, turning text into positioned
//!    [`Token`](lexer::token::Token)s;
//! 2. A set of backtracking [parser combinators](parser) that compose
//!    token-level matchers into grammars, producing either a generic
//!    [`Tree`](parser::Tree) or a positioned [`ParseError`](parser::ParseError).
//!
//! On top of those sit the pieces a small compiler needs: a dispatch trait
//! for turning trees into typed representations ([`transform`]), a C code
//! generator ([`backend::c`]), and a demonstration language using all of them
//! ([`calc`]).
//!
//! ```text
//! text ─[Lexer]→ tokens ─[Parser]→ Tree ─[Transform]→ CNode ─[generate_c]→ C
//! ```

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use thiserror::Error;

extern crate static_assertions as sa;

pub mod backend;
pub mod calc;
pub mod lexer;
pub mod location;
pub mod parser;
pub mod transform;

/// Any failure of the lex → parse → transform pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// The text could not be split into tokens.
    #[error(transparent)]
    Lex(#[from] lexer::LexError),
    /// The tokens did not match the grammar.
    #[error(transparent)]
    Syntax(#[from] parser::SyntaxError),
    /// The tree could not be transformed.
    #[error(transparent)]
    Transform(#[from] transform::TransformError),
}

sa::assert_impl_all!(location::Location: Clone, Eq, std::hash::Hash, std::fmt::Display);
sa::assert_impl_all!(Error: std::error::Error, Send, Sync, From<lexer::LexError>, From<parser::SyntaxError>);
