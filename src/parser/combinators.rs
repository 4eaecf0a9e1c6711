//! The combinators from which grammars are built.
//!
//! | combinator     | matches                                   | produces                          |
//! |----------------|-------------------------------------------|-----------------------------------|
//! | [`token`]      | one token with the given name             | `name(value)`                     |
//! | [`seq`]        | each element in turn                      | `kind(bound elements...)`         |
//! | [`alt`]        | the first alternative that succeeds       | `label(winner)`                   |
//! | [`inline_alt`] | the first alternative that succeeds       | `winner`                          |
//! | [`some`]       | one or more repetitions                   | `name(matches...)`                |
//! | [`many`]       | zero or more repetitions                  | `name(matches...)`, never fails   |
//!
//! The [`seq!`](crate::seq), [`alt!`](crate::alt) and [`inline_alt!`](crate::inline_alt)
//! macros accept token names, parsers and bound (`[x]`) elements directly.

use std::rc::Rc;

use crate::{lexer::token::Token, location::Location};

use super::{ParseError, ParseResult, Parser, Node, Tree, EOF};

/// One element of a [`seq`].
///
/// Elements are converted from token names (`"("`), parsers, or either of
/// those wrapped in a one-element array (`[expr()]`). Only the wrapped form
/// is _bound_: its tree becomes a child of the sequence's tree, while the
/// other forms are matched purely to advance past their tokens.
#[derive(Debug, Clone)]
pub struct Element {
    /// The parser matching this element.
    parser: Parser,
    /// Whether the match is kept as a child of the sequence.
    bound: bool,
}

impl Element {
    /// An element matched and discarded.
    pub fn skip(parser: impl Into<Parser>) -> Self {
        Self {
            parser: parser.into(),
            bound: false,
        }
    }

    /// An element matched and kept as a child.
    pub fn bind(parser: impl Into<Parser>) -> Self {
        Self {
            parser: parser.into(),
            bound: true,
        }
    }

    /// Returns `true` if the match is kept as a child.
    pub fn is_bound(&self) -> bool {
        self.bound
    }
}

impl From<&str> for Element {
    fn from(name: &str) -> Self {
        Self::skip(name)
    }
}

impl From<Parser> for Element {
    fn from(parser: Parser) -> Self {
        Self::skip(parser)
    }
}

impl From<[&str; 1]> for Element {
    fn from([name]: [&str; 1]) -> Self {
        Self::bind(name)
    }
}

impl From<[Parser; 1]> for Element {
    fn from([parser]: [Parser; 1]) -> Self {
        Self::bind(parser)
    }
}

/// Returns the location of the first token in `tokens`, or the unknown location if there is none.
fn start_of(tokens: &[Token]) -> Location {
    tokens
        .first()
        .map_or_else(Location::unknown, |token| token.location().clone())
}

/// Returns a [`Parser`] matching exactly one token named `name`.
///
/// The produced tree is tagged `name` and holds the token's text as its only
/// child. On mismatch, the error expects `name` and reports the text of the
/// next token, or [`EOF`] at the unknown location when the input is exhausted.
pub fn token(name: &str) -> Parser {
    let name: Rc<str> = name.into();
    Parser::new(move |tokens| match tokens.split_first() {
        Some((head, tail)) if head.name() == &*name => Ok(Tree::new(
            name.clone(),
            vec![Node::Value(head.value().to_string())],
            head.location().clone(),
            tail,
        )),
        Some((head, _)) => Err(ParseError::new(
            vec![name.to_string()],
            head.value(),
            head.location().clone(),
        )),
        None => Err(ParseError::new(
            vec![name.to_string()],
            EOF,
            Location::unknown(),
        )),
    })
}

/// Returns a [`Parser`] matching each of `elements` in order, producing a
/// tree tagged `kind` whose children are the matches of the bound elements.
///
/// The first failing element fails the whole sequence with its error. When
/// that element failed because the tokens ran out, the error is moved to the
/// last token the sequence was given, so that "missing token at end of
/// input" diagnostics point at real input.
pub fn seq(kind: &str, elements: impl IntoIterator<Item = Element>) -> Parser {
    let kind: Rc<str> = kind.into();
    let elements: Vec<Element> = elements.into_iter().collect();

    Parser::new(move |tokens| {
        let mut rest = tokens;
        let mut nodes = Vec::new();

        for element in &elements {
            let tree = match element.parser.raw_parse(rest) {
                Ok(tree) => tree,
                Err(error) => {
                    return Err(match tokens.last() {
                        Some(last) if rest.is_empty() => error.relocated(last.location().clone()),
                        _ => error,
                    })
                }
            };

            rest = tree.rest();
            if element.bound {
                nodes.push(Node::Tree(tree));
            }
        }

        Ok(Tree::new(kind.clone(), nodes, start_of(tokens), rest))
    })
}

/// Tries each of `parsers` against `tokens`, returning the first success or
/// the merged errors of all of them.
///
/// See [`ParseError::merge`] for how the errors are combined.
fn first_success<'t>(parsers: &[Parser], tokens: &'t [Token]) -> ParseResult<'t> {
    let mut best = ParseError::new(
        Vec::new(),
        tokens.first().map_or(EOF, Token::value),
        start_of(tokens),
    );

    for parser in parsers {
        match parser.raw_parse(tokens) {
            Ok(tree) => return Ok(tree),
            Err(error) => best.merge(error),
        }
    }

    Err(best)
}

/// Returns a [`Parser`] trying each of `parsers` from the same position and
/// wrapping the first success in a tree tagged `label`.
///
/// Alternatives are tried in order with full backtracking, so earlier
/// alternatives take precedence over later ones that would also match.
pub fn alt(label: &str, parsers: impl IntoIterator<Item = Parser>) -> Parser {
    let label: Rc<str> = label.into();
    let parsers: Vec<Parser> = parsers.into_iter().collect();

    Parser::new(move |tokens| {
        let tree = first_success(&parsers, tokens)?;
        let (location, rest) = (tree.location().clone(), tree.rest());
        Ok(Tree::new(label.clone(), vec![Node::Tree(tree)], location, rest))
    })
}

/// Like [`alt`], but returns the winning tree unchanged instead of wrapping it.
pub fn inline_alt(parsers: impl IntoIterator<Item = Parser>) -> Parser {
    let parsers: Vec<Parser> = parsers.into_iter().collect();
    Parser::new(move |tokens| first_success(&parsers, tokens))
}

/// Returns a [`Parser`] matching `parser` one or more times, producing a
/// tree tagged `name` whose children are the individual matches.
///
/// Fails with the error of the first attempt if there is not at least one
/// match. Repetition stops at the first failure, or at a match that consumes
/// no tokens.
pub fn some(name: &str, parser: Parser) -> Parser {
    let name: Rc<str> = name.into();

    Parser::new(move |tokens| {
        let head = parser.raw_parse(tokens)?;
        let location = head.location().clone();
        let mut rest = head.rest();
        let mut nodes = vec![Node::Tree(head)];

        while let Ok(tree) = parser.raw_parse(rest) {
            if tree.rest().len() == rest.len() {
                break;
            }

            rest = tree.rest();
            nodes.push(Node::Tree(tree));
        }

        Ok(Tree::new(name.clone(), nodes, location, rest))
    })
}

/// Returns a [`Parser`] matching `parser` zero or more times.
///
/// Behaves like [`some`], except that zero matches produce an empty tree
/// located at the next token (consuming nothing) instead of an error.
pub fn many(name: &str, parser: Parser) -> Parser {
    let some = some(name, parser);
    let name: Rc<str> = name.into();

    Parser::new(move |tokens| {
        some.raw_parse(tokens)
            .or_else(|_| Ok(Tree::new(name.clone(), Vec::new(), start_of(tokens), tokens)))
    })
}

/// Builds a [`seq`] from a tag followed by any mix of token names, parsers
/// and bound (`[x]`) elements.
///
/// ```
/// use descent::{lexer::Lexer, seq};
///
/// let mut lexer = Lexer::new();
/// lexer.add_regex("INT", r"\d+").unwrap();
/// lexer.add_token("(").add_token(",").add_token(")");
///
/// let pair = seq!("Pair", "(", ["INT"], ",", ["INT"], ")");
/// let tokens = lexer.lex("<doc>", "(1,2)").unwrap();
/// assert_eq!(pair.parse(&tokens).unwrap().to_string(), "Pair(INT(1), INT(2))");
/// ```
#[macro_export]
macro_rules! seq {
    ($kind:expr $(, $element:expr)* $(,)?) => {
        $crate::parser::seq($kind, [$($crate::parser::Element::from($element)),*])
    };
}

/// Builds an [`alt`] from a label followed by any mix of token names and parsers.
#[macro_export]
macro_rules! alt {
    ($label:expr $(, $parser:expr)* $(,)?) => {
        $crate::parser::alt($label, [$($crate::parser::Parser::from($parser)),*])
    };
}

/// Builds an [`inline_alt`] from any mix of token names and parsers.
#[macro_export]
macro_rules! inline_alt {
    ($($parser:expr),* $(,)?) => {
        $crate::parser::inline_alt([$($crate::parser::Parser::from($parser)),*])
    };
}
