//! A small C syntax tree and the generator that prints it.
//!
//! # Formatting
//! Nodes are printed without any indentation. [`CNode::Program`] re-indents
//! its body afterwards by counting braces: a line starting with (or
//! containing) `}` closes one level before it is printed, and a line
//! containing `{` opens one level after it. String literals are masked
//! while counting, so braces inside them are ignored; the mask keeps any
//! newlines of the literal so that both renderings have the same lines.
//!
//! # Variables
//! [`CNode::Variable`]s are renamed to `v0`, `v1`, ... in order of first
//! appearance. The renaming is owned by a single [`Generator`], so separate
//! calls to [`generate_c`] always start again from `v0`.

use std::{collections::HashMap, fmt::Display};

/// The text substituted for string literals while counting braces.
const MASKED_STRING: &str = "%STRING%";

/// Starts each masked line that continues a multiline string literal.
const STRING_CONTINUATION: char = '\u{1}';

/// The indentation emitted per brace level.
const INDENT: &str = "    ";

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
        })
    }
}

/// A node of a C program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CNode {
    /// An integer literal, printed verbatim.
    IntLiteral(String),
    /// A string literal; the contents are printed verbatim between quotes.
    StringLiteral(String),
    /// A name printed verbatim (e.g. `main` or `printf`).
    Identifier(String),
    /// A source-level name, renamed during generation.
    Variable(String),
    /// A parenthesised binary expression.
    BinaryOp(Box<CNode>, Operator, Box<CNode>),
    /// A call of the first node with the given arguments.
    Call(Box<CNode>, Vec<CNode>),
    /// An expression statement.
    Statement(Box<CNode>),
    /// A `return` statement.
    Return(Box<CNode>),
    /// A sequence of nodes printed one after another.
    Block(Vec<CNode>),
    /// A type name.
    Type(String),
    /// A function definition.
    Function {
        /// The return type.
        ret: Box<CNode>,
        /// The function name.
        name: Box<CNode>,
        /// The `(type, name)` pairs of the parameters.
        params: Vec<(CNode, CNode)>,
        /// The statements of the body.
        body: Box<CNode>,
    },
    /// An `#include <...>` of a standard header.
    IncludeStd(String),
    /// A whole translation unit.
    Program {
        /// The preprocessor lines, printed before the body.
        includes: Vec<CNode>,
        /// The top-level declarations.
        body: Box<CNode>,
    },
}

impl CNode {
    /// Builds a [`CNode::BinaryOp`].
    pub fn binary(lhs: CNode, op: Operator, rhs: CNode) -> Self {
        CNode::BinaryOp(Box::new(lhs), op, Box::new(rhs))
    }

    /// Builds a [`CNode::Call`].
    pub fn call(function: CNode, args: Vec<CNode>) -> Self {
        CNode::Call(Box::new(function), args)
    }

    /// Builds a [`CNode::Type`] naming `int`.
    pub fn int_type() -> Self {
        CNode::Type("int".to_string())
    }
}

/// Prints C syntax trees, renaming variables consistently along the way.
#[derive(Debug, Default)]
pub struct Generator {
    /// The generated name of each variable seen so far.
    names: HashMap<String, String>,
    /// Whether string literals are replaced by [`MASKED_STRING`].
    mask_strings: bool,
}

impl Generator {
    /// Returns a [`Generator`] that has not renamed any variables yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the generated name for `name`, allocating the next one if it is new.
    fn rename(&mut self, name: &str) -> String {
        let next = self.names.len();
        self.names
            .entry(name.to_string())
            .or_insert_with(|| format!("v{next}"))
            .clone()
    }

    /// Prints `node` as C source.
    pub fn generate(&mut self, node: &CNode) -> String {
        match node {
            CNode::IntLiteral(value) | CNode::Identifier(value) | CNode::Type(value) => {
                value.clone()
            }
            CNode::StringLiteral(value) if self.mask_strings => {
                // one masked line per real line, so depths still line up
                let continuations = format!("\n{STRING_CONTINUATION}");
                format!("{MASKED_STRING}{}", continuations.repeat(value.matches('\n').count()))
            }
            CNode::StringLiteral(value) => format!("\"{value}\""),
            CNode::Variable(name) => self.rename(name),
            CNode::BinaryOp(lhs, op, rhs) => {
                let lhs = self.generate(lhs);
                let rhs = self.generate(rhs);
                format!("({lhs} {op} {rhs})")
            }
            CNode::Call(function, args) => {
                let function = self.generate(function);
                let args = args
                    .iter()
                    .map(|arg| self.generate(arg))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{function}({args})")
            }
            CNode::Statement(expr) => format!("{};\n", self.generate(expr)),
            CNode::Return(value) => format!("return {};\n", self.generate(value)),
            CNode::Block(nodes) => nodes.iter().map(|node| self.generate(node)).collect(),
            CNode::Function {
                ret,
                name,
                params,
                body,
            } => {
                let ret = self.generate(ret);
                let name = self.generate(name);
                let params = params
                    .iter()
                    .map(|(ty, param)| format!("{} {}", self.generate(ty), self.generate(param)))
                    .collect::<Vec<_>>()
                    .join(", ");
                let body = self.generate(body);
                format!("{ret} {name}({params}) {{\n{body}}}\n")
            }
            CNode::IncludeStd(file) => format!("#include <{file}>\n"),
            CNode::Program { includes, body } => {
                let includes: String = includes.iter().map(|node| self.generate(node)).collect();

                let masked = {
                    let unmasked = std::mem::replace(&mut self.mask_strings, true);
                    let masked = self.generate(body);
                    self.mask_strings = unmasked;
                    masked
                };
                let code = self.generate(body);

                format!("\n{includes}\n{}", reindent(&masked, &code))
            }
        }
    }
}

/// Returns the brace depth at which each line of `code` should be printed.
fn indent_levels(code: &str) -> Vec<usize> {
    let mut depth = 0usize;
    code.lines()
        .map(|line| {
            depth = depth.saturating_sub(line.matches('}').count());
            let level = depth;
            depth += line.matches('{').count();
            level
        })
        .collect()
}

/// Re-indents each line of `code` using the brace depths computed from `masked`.
///
/// Lines continuing a string literal are printed untouched.
fn reindent(masked: &str, code: &str) -> String {
    indent_levels(masked)
        .into_iter()
        .zip(masked.lines().zip(code.lines()))
        .map(|(level, (masked, line))| {
            if masked.starts_with(STRING_CONTINUATION) {
                format!("{line}\n")
            } else {
                format!("{}{}\n", INDENT.repeat(level), line.trim_start())
            }
        })
        .collect()
}

/// Prints `node` as C source with a fresh [`Generator`].
pub fn generate_c(node: &CNode) -> String {
    Generator::new().generate(node)
}
