//! End-to-end tests of a small arithmetic grammar built on the public API.

use descent::{
    inline_alt,
    lexer::{token::Token, Lexer},
    parser::Parser,
    seq, Error,
};

fn lexer() -> Lexer {
    let mut lexer = Lexer::new();
    lexer.add_regex("INT", r"\d+").unwrap();
    lexer
        .add_token("+")
        .add_token("*")
        .add_token("(")
        .add_token(")");
    lexer.skip(r"\s+").unwrap();
    lexer
}

/// `atom ::= INT | ( expr )`
fn atom() -> Parser {
    inline_alt!("INT", seq!("Expr", "(", [Parser::lazy(expr)], ")"))
}

/// `term ::= atom * atom | atom`
fn term() -> Parser {
    inline_alt!(seq!("Term", [atom()], "*", [atom()]), atom())
}

/// `expr ::= term + term | term`
fn expr() -> Parser {
    inline_alt!(seq!("Expr", [term()], "+", [term()]), term())
}

fn parse(text: &str) -> Result<String, Error> {
    let tokens: Vec<Token> = lexer().lex("<test>", text)?;
    Ok(expr().parse(&tokens)?.to_string())
}

fn parse_error(text: &str) -> String {
    parse(text).unwrap_err().to_string()
}

#[test]
fn check_nested_expression() {
    assert_eq!(
        parse("(1 + 2) * 3").unwrap(),
        "Term(Expr(Expr(INT(1), INT(2))), INT(3))"
    );
    assert_eq!(parse("1+1").unwrap(), "Expr(INT(1), INT(1))");
}

#[test]
fn check_trailing_input() {
    assert_eq!(
        parse_error("(4 + 1) * 2)"),
        "<test>:1:12: SYNTAX ERROR: Expected EOF, but got ')' instead"
    );
    assert_eq!(
        parse_error("1+1)"),
        "<test>:1:4: SYNTAX ERROR: Expected EOF, but got ')' instead"
    );
}

#[test]
fn check_missing_operand() {
    assert_eq!(
        parse_error("(10 *)"),
        "<test>:1:5: SYNTAX ERROR: Expected ')', but got '*' instead"
    );
}

#[test]
fn check_missing_operator() {
    assert_eq!(
        parse_error("(10 * 2 3)"),
        "<test>:1:9: SYNTAX ERROR: Expected ')', but got '3' instead"
    );
}

#[test]
fn check_unclosed_parenthesis() {
    assert_eq!(
        parse_error("(1 * 1"),
        "<test>:1:6: SYNTAX ERROR: Expected ')', but got 'EOF' instead"
    );
}

#[test]
fn check_unknown_character() {
    let error = parse("(7 - 2").unwrap_err();
    assert!(matches!(error, Error::Lex(_)));
    assert_eq!(
        error.to_string(),
        "<test>:1:4: SYNTAX ERROR: Unknown character: '-'"
    );
}

#[test]
fn check_parsing_is_deterministic() {
    let tokens = lexer().lex("<test>", "(2 * (3 + 4)) + 5 * 6").unwrap();
    let grammar = expr();

    let first = grammar.parse(&tokens).unwrap();
    let second = grammar.parse(&tokens).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.to_string(),
        "Expr(Expr(Term(INT(2), Expr(Expr(INT(3), INT(4))))), Term(INT(5), INT(6)))"
    );

    // a freshly built grammar agrees with the reused one
    assert_eq!(expr().parse(&tokens).unwrap(), first);
}

#[test]
fn check_token_positions() {
    let tokens = lexer().lex("<test>", "(1 +\n  22)").unwrap();
    let positions: Vec<String> = tokens
        .iter()
        .map(|token| format!("{} {token}", token.location()))
        .collect();

    assert_eq!(
        positions,
        [
            "<test>:1:1 [(]",
            "<test>:1:2 [INT:1]",
            "<test>:1:4 [+]",
            "<test>:2:3 [INT:22]",
            "<test>:2:5 [)]",
        ]
    );
}
