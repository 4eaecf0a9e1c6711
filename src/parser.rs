//! Backtracking parser combinators operating on token slices.
//!
//! # Parsers
//! A [`Parser`] is a handle to a grammar rule. Running it against a slice of
//! [`Token`]s yields either a [`Tree`] (whose [`rest`](Tree::rest) is the
//! unconsumed suffix of the slice) or a [`ParseError`]. Parsers hold no
//! mutable parse state, so alternatives can be retried from the same slice
//! without undoing anything, and the same grammar can be run any number of
//! times with identical results.
//!
//! # Recursive grammars
//! Grammar rules are written as plain functions returning a [`Parser`].
//! Because a rule that refers to itself (directly or through other rules)
//! would otherwise be constructed forever, references to such rules go
//! through [`Parser::lazy`], which defers building the rule until the first
//! time it actually has to parse something.
//!
//! ```
//! use descent::{inline_alt, seq};
//! use descent::lexer::Lexer;
//! use descent::parser::Parser;
//!
//! fn expr() -> Parser {
//!     inline_alt!(seq!("Paren", "(", [Parser::lazy(expr)], ")"), "INT")
//! }
//!
//! let mut lexer = Lexer::new();
//! lexer.add_regex("INT", r"\d+").unwrap();
//! lexer.add_token("(").add_token(")");
//!
//! let tokens = lexer.lex("<doc>", "((7))").unwrap();
//! let tree = expr().parse(&tokens).unwrap();
//! assert_eq!(tree.to_string(), "Paren(Paren(INT(7)))");
//! ```

use std::{cell::OnceCell, rc::Rc};

use tracing::debug;

use crate::lexer::token::Token;

pub use self::{
    combinators::{alt, inline_alt, many, seq, some, token, Element},
    error::{ParseError, SyntaxError, EOF},
    tree::{Node, Tree},
};

mod combinators;
pub mod error;
pub mod tree;

/// The result of running a [`Parser`] against a token slice.
pub type ParseResult<'t> = Result<Tree<'t>, ParseError>;

/// The type of the functions wrapped by a [`Parser`].
type ParseFn = dyn for<'t> Fn(&'t [Token]) -> ParseResult<'t>;

/// The two ways a [`Parser`] can be defined.
enum Rule {
    /// A token-consuming function.
    Direct(Box<ParseFn>),
    /// A parser built on first use, and cached thereafter.
    Lazy {
        /// Builds the parser this rule delegates to.
        thunk: Box<dyn Fn() -> Parser>,
        /// The result of `thunk`, once forced.
        resolved: OnceCell<Parser>,
    },
}

/// A cheaply clonable handle to a grammar rule.
#[derive(Clone)]
pub struct Parser(Rc<Rule>);

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &*self.0 {
            Rule::Direct(_) => f.write_str("Parser::Direct"),
            Rule::Lazy { resolved, .. } => match resolved.get() {
                Some(parser) => f.debug_tuple("Parser::Lazy").field(parser).finish(),
                None => f.write_str("Parser::Lazy(<unforced>)"),
            },
        }
    }
}

impl Parser {
    /// Wraps a token-consuming function in a [`Parser`].
    pub fn new<F>(parse: F) -> Self
    where
        F: for<'t> Fn(&'t [Token]) -> ParseResult<'t> + 'static,
    {
        Self(Rc::new(Rule::Direct(Box::new(parse))))
    }

    /// Returns a [`Parser`] that delegates to the parser returned by `thunk`.
    ///
    /// `thunk` is not invoked until the returned parser first runs, which is
    /// what allows rules to refer to themselves and to each other.
    pub fn lazy<F>(thunk: F) -> Self
    where
        F: Fn() -> Parser + 'static,
    {
        Self(Rc::new(Rule::Lazy {
            thunk: Box::new(thunk),
            resolved: OnceCell::new(),
        }))
    }

    /// Runs `self` against `tokens`, leaving any unconsumed tokens in the
    /// [`rest`](Tree::rest) of the result.
    pub fn raw_parse<'t>(&self, tokens: &'t [Token]) -> ParseResult<'t> {
        let mut parser = self;
        loop {
            match &*parser.0 {
                Rule::Direct(parse) => return parse(tokens),
                Rule::Lazy { thunk, resolved } => parser = resolved.get_or_init(|| thunk()),
            }
        }
    }

    /// Runs `self` against `tokens`, requiring that every token is consumed.
    ///
    /// Leftover tokens are reported as [`SyntaxError::TrailingInput`] at the
    /// location of the first of them.
    pub fn parse<'t>(&self, tokens: &'t [Token]) -> Result<Tree<'t>, SyntaxError> {
        let tree = self.raw_parse(tokens).map_err(|error| {
            debug!(%error, "parse failed");
            error
        })?;

        match tree.rest().first() {
            None => {
                debug!(kind = tree.kind(), count = tokens.len(), "parsed all tokens");
                Ok(tree)
            }
            Some(leftover) => {
                debug!(
                    kind = tree.kind(),
                    leftover = tree.rest().len(),
                    "parse stopped before end of input"
                );
                Err(SyntaxError::TrailingInput {
                    got: leftover.value().to_string(),
                    location: leftover.location().clone(),
                })
            }
        }
    }
}

/// A string converts to the [`token`] parser matching tokens with that name.
impl From<&str> for Parser {
    fn from(name: &str) -> Self {
        token(name)
    }
}

sa::assert_impl_all!(Parser: Clone, std::fmt::Debug, From<&'static str>);
sa::assert_impl_all!(ParseError: std::error::Error, Clone, Eq);
sa::assert_impl_all!(SyntaxError: std::error::Error, From<ParseError>);
