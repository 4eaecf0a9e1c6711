//! A tiny expression language compiled to C, built entirely from the
//! toolkit's combinators.
//!
//! # Grammar
//! ```raw
//! start ::= func* expr
//! func  ::= `fn` IDENTIFIER `(` IDENTIFIER `)` `=` expr `;`
//! expr  ::= plus
//! plus  ::= minus `+` minus | minus
//! minus ::= mult `-` mult | mult
//! mult  ::= atom `*` atom | atom
//! atom  ::= call | IDENTIFIER | INT
//! call  ::= IDENTIFIER `(` expr `)`
//! ```
//!
//! Operators do not chain (`1 + 2 + 3` is rejected): each level takes
//! exactly two operands from the level below, and parentheses only appear
//! in calls.
//!
//! # Semantics
//! Every function takes and returns an `int`. The trailing expression is
//! evaluated as the body of `main`, and the builtin `print(x)` becomes
//! `printf("%d\n", x)`.
//!
//! ```
//! let c = descent::calc::compile("<doc>", "fn double(x) = x * 2; print(double(21))").unwrap();
//! assert!(c.contains("int v0(int v1) {"));
//! ```

use strum::EnumString;
use tracing::debug;

use crate::{
    backend::c::{generate_c, CNode, Operator},
    inline_alt,
    lexer::{token::Token, LexError, Lexer},
    location::Location,
    parser::{many, Parser, SyntaxError, Tree},
    seq,
    transform::{children, value, Transform, TransformError},
    Error,
};

/// The symbols and keywords of the language, in lexing order.
const SYMBOLS: [&str; 8] = ["+", "-", "*", "=", "(", ")", "fn", ";"];

/// The name of the builtin that prints an integer.
const PRINT: &str = "print";

/// Returns a [`Lexer`] for the language.
///
/// Keywords are matched before identifiers, so an identifier may not begin
/// with `fn`.
pub fn lexer() -> Result<Lexer, LexError> {
    let mut lexer = Lexer::new();
    for symbol in SYMBOLS {
        lexer.add_token(symbol);
    }
    lexer
        .add_regex("IDENTIFIER", "[a-zA-Z_][a-zA-Z_0-9]*")?
        .add_regex("INT", r"\d+")?
        .skip(r"\s+")?;
    Ok(lexer)
}

/// The root rule of the grammar, producing a `Start` tree.
pub fn start() -> Parser {
    seq!("Start", [many("Funcs", func())], [expr()])
}

/// `func ::= fn IDENTIFIER ( IDENTIFIER ) = expr ;`
fn func() -> Parser {
    seq!(
        "Func",
        "fn",
        ["IDENTIFIER"],
        "(",
        ["IDENTIFIER"],
        ")",
        "=",
        [Parser::lazy(expr)],
        ";"
    )
}

/// `expr ::= plus`
fn expr() -> Parser {
    inline_alt!(plus())
}

/// Builds `operand op operand | operand`, tagging the binary case with `kind`.
fn binary(kind: &str, operand: Parser, op: &str) -> Parser {
    inline_alt!(
        seq!(kind, [operand.clone()], op, [operand.clone()]),
        operand
    )
}

/// `plus ::= minus + minus | minus`
fn plus() -> Parser {
    binary("Plus", minus(), "+")
}

/// `minus ::= mult - mult | mult`
fn minus() -> Parser {
    binary("Minus", mult(), "-")
}

/// `mult ::= atom * atom | atom`
fn mult() -> Parser {
    binary("Mult", atom(), "*")
}

/// `atom ::= call | IDENTIFIER | INT`
fn atom() -> Parser {
    inline_alt!(call(), "IDENTIFIER", "INT")
}

/// `call ::= IDENTIFIER ( expr )`
fn call() -> Parser {
    seq!("Call", ["IDENTIFIER"], "(", [Parser::lazy(expr)], ")")
}

/// The tags produced by [`start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum Kind {
    /// An integer token.
    #[strum(serialize = "INT")]
    Int,
    /// An identifier token.
    #[strum(serialize = "IDENTIFIER")]
    Identifier,
    /// `f(x)`
    Call,
    /// `a * b`
    Mult,
    /// `a - b`
    Minus,
    /// `a + b`
    Plus,
    /// A function definition.
    Func,
    /// All function definitions.
    Funcs,
    /// The whole program.
    Start,
}

/// Translates `Start` trees into C syntax trees.
#[derive(Debug, Default)]
pub struct ToC;

impl ToC {
    /// Transforms both operands of a binary tree and joins them with `op`.
    fn binary(&mut self, tree: &Tree<'_>, op: Operator) -> Result<CNode, TransformError> {
        let [lhs, rhs] = children(tree)?;
        Ok(CNode::binary(self.transform(lhs)?, op, self.transform(rhs)?))
    }

    /// Transforms a `Start` tree into a complete C program.
    pub fn program(&mut self, tree: &Tree<'_>) -> Result<CNode, TransformError> {
        Ok(CNode::Program {
            includes: vec![CNode::IncludeStd("stdio.h".to_string())],
            body: Box::new(self.transform(tree)?),
        })
    }
}

impl Transform for ToC {
    type Kind = Kind;
    type Output = CNode;

    fn transform_node(&mut self, kind: Kind, tree: &Tree<'_>) -> Result<CNode, TransformError> {
        match kind {
            Kind::Int => Ok(CNode::IntLiteral(value(tree)?.to_string())),
            Kind::Identifier => Ok(CNode::Variable(value(tree)?.to_string())),
            Kind::Call => {
                let [function, arg] = children(tree)?;
                let arg = self.transform(arg)?;
                if value(function)? == PRINT {
                    Ok(CNode::call(
                        CNode::Identifier("printf".to_string()),
                        vec![CNode::StringLiteral(r"%d\n".to_string()), arg],
                    ))
                } else {
                    Ok(CNode::call(self.transform(function)?, vec![arg]))
                }
            }
            Kind::Mult => self.binary(tree, Operator::Mul),
            Kind::Minus => self.binary(tree, Operator::Sub),
            Kind::Plus => self.binary(tree, Operator::Add),
            Kind::Func => {
                let [name, param, body] = children(tree)?;
                Ok(CNode::Function {
                    ret: Box::new(CNode::int_type()),
                    name: Box::new(self.transform(name)?),
                    params: vec![(CNode::int_type(), self.transform(param)?)],
                    body: Box::new(CNode::Block(vec![CNode::Return(Box::new(
                        self.transform(body)?,
                    ))])),
                })
            }
            Kind::Funcs => tree
                .subtrees()
                .map(|func| self.transform(func))
                .collect::<Result<_, _>>()
                .map(CNode::Block),
            Kind::Start => {
                let [funcs, body] = children(tree)?;
                let funcs = self.transform(funcs)?;
                let body = self.transform(body)?;
                Ok(CNode::Block(vec![
                    funcs,
                    CNode::Function {
                        ret: Box::new(CNode::int_type()),
                        name: Box::new(CNode::Identifier("main".to_string())),
                        params: vec![],
                        body: Box::new(CNode::Block(vec![
                            CNode::Statement(Box::new(body)),
                            CNode::Return(Box::new(CNode::IntLiteral("0".to_string()))),
                        ])),
                    },
                ]))
            }
        }
    }
}

/// Parses `tokens` (lexed from `file`) with [`start`].
///
/// Errors that point past the end of an empty token stream are reported at
/// the start of `file`.
pub fn parse<'t>(file: &str, tokens: &'t [Token]) -> Result<Tree<'t>, SyntaxError> {
    start()
        .parse(tokens)
        .map_err(|error| error.located_or(Location::new(file, 1, 1)))
}

/// Compiles the program `text` (read from `file`) to C source.
pub fn compile(file: &str, text: &str) -> Result<String, Error> {
    let tokens = lexer()?.lex(file, text)?;
    let tree = parse(file, &tokens)?;
    let program = ToC.program(&tree)?;
    debug!(file, "generating C");
    Ok(generate_c(&program))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<String, Error> {
        let tokens = lexer()?.lex("<test>", text)?;
        Ok(super::parse("<test>", &tokens)?.to_string())
    }

    #[test]
    fn check_start_parser() {
        let tree = parse("fn negate(x) = 0 - x;\nprint(negate(2))").unwrap();
        assert_eq!(
            tree,
            "Start(Funcs(Func(IDENTIFIER(negate), IDENTIFIER(x), Minus(INT(0), IDENTIFIER(x)))), \
             Call(IDENTIFIER(print), Call(IDENTIFIER(negate), INT(2))))"
        );

        let tree = parse("1 + 2 * 3").unwrap();
        assert_eq!(tree, "Start(Funcs(), Plus(INT(1), Mult(INT(2), INT(3))))");
    }

    #[test]
    fn check_operators_do_not_chain() {
        let error = parse("1 + 2 + 3").unwrap_err();
        assert_eq!(
            error.to_string(),
            "<test>:1:7: SYNTAX ERROR: Expected EOF, but got '+' instead"
        );
    }

    #[test]
    fn check_missing_semicolon_is_reported_at_function_start() {
        // the failed definition is swallowed by `many`, so the diagnostic
        // comes from trying to read `fn` as the trailing expression
        let error = parse("fn f(x) = 1").unwrap_err();
        assert_eq!(
            error.to_string(),
            "<test>:1:1: SYNTAX ERROR: Expected 'IDENTIFIER' or 'INT', but got 'fn' instead"
        );
    }

    #[test]
    fn check_empty_program() {
        let error = compile("main.calc", "").unwrap_err();
        assert_eq!(
            error.to_string(),
            "main.calc:1:1: SYNTAX ERROR: Expected 'IDENTIFIER' or 'INT', but got 'EOF' instead"
        );

        let error = compile("main.calc", "  \n ").unwrap_err();
        assert!(error.to_string().starts_with("main.calc:1:1: "));
    }

    #[test]
    fn check_compile() {
        let c = compile("<test>", "fn negate(x) = 0 - x;\nprint(negate(2))").unwrap();
        assert_eq!(
            c,
            "\n#include <stdio.h>\n\n\
             int v0(int v1) {\n    return (0 - v1);\n}\n\
             int main() {\n    printf(\"%d\\n\", v0(2));\n    return 0;\n}\n"
        );
    }

    #[test]
    fn check_compile_is_deterministic() {
        let text = "fn a(x) = x * x; fn b(y) = a(y) + 1; print(b(3))";
        assert_eq!(compile("<test>", text).unwrap(), compile("<test>", text).unwrap());
    }

    #[test]
    fn check_lex_errors_surface() {
        let error = compile("<test>", "print(1 / 2)").unwrap_err();
        assert!(matches!(error, Error::Lex(LexError::UnknownCharacter { character: '/', .. })));
    }
}
