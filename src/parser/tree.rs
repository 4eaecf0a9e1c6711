//! The generic syntax [`Tree`] produced by every parser.

use std::{fmt::Display, rc::Rc};

use crate::{lexer::token::Token, location::Location};

/// A child of a [`Tree`]: either a nested match or a raw terminal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'t> {
    /// A nested match, e.g. a bound element of a [`seq`](super::seq).
    Tree(Tree<'t>),
    /// The text of a matched token, as produced by [`token`](super::token).
    Value(String),
}

impl<'t> Node<'t> {
    /// Returns the nested [`Tree`], if `self` is one.
    pub fn as_tree(&self) -> Option<&Tree<'t>> {
        match self {
            Node::Tree(tree) => Some(tree),
            Node::Value(_) => None,
        }
    }

    /// Returns the terminal value, if `self` is one.
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Node::Tree(_) => None,
            Node::Value(value) => Some(value),
        }
    }
}

impl Display for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Tree(tree) => write!(f, "{tree}"),
            Node::Value(value) => write!(f, "{value}"),
        }
    }
}

/// A generic syntax node.
///
/// Besides its tag (`kind`) and children, a tree records the location of
/// the first token it consumed and the tokens left over after it matched.
/// `rest` is always a suffix of the slice handed to the parse call that
/// produced the tree, which is how combinators thread their position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree<'t> {
    /// The tag naming this node (a rule or token name).
    kind: Rc<str>,
    /// The children of this node, in source order.
    nodes: Vec<Node<'t>>,
    /// The location of the first token consumed by this node.
    location: Location,
    /// The unconsumed tokens after this node.
    rest: &'t [Token],
}

impl<'t> Tree<'t> {
    /// Constructs a new [`Tree`].
    pub fn new(
        kind: impl Into<Rc<str>>,
        nodes: Vec<Node<'t>>,
        location: Location,
        rest: &'t [Token],
    ) -> Self {
        Self {
            kind: kind.into(),
            nodes,
            location,
            rest,
        }
    }

    /// The tag of this node.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The children of this node.
    pub fn nodes(&self) -> &[Node<'t>] {
        &self.nodes
    }

    /// Consumes `self` and returns its children.
    pub fn into_nodes(self) -> Vec<Node<'t>> {
        self.nodes
    }

    /// The location of the first token consumed by this node.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// The tokens left unconsumed after this node.
    pub fn rest(&self) -> &'t [Token] {
        self.rest
    }

    /// Returns the text of a token tree, i.e. a tree whose only child is a
    /// terminal value.
    pub fn value(&self) -> Option<&str> {
        match self.nodes.as_slice() {
            [node] => node.as_value(),
            _ => None,
        }
    }

    /// Iterates over the children of this node that are themselves trees.
    pub fn subtrees(&self) -> impl Iterator<Item = &Tree<'t>> {
        self.nodes.iter().filter_map(Node::as_tree)
    }
}

/// Prints the tree in the `Kind(child, child)` format, with terminal values printed raw.
impl Display for Tree<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.kind)?;
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{node}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(kind: &str, value: &str) -> Node<'static> {
        Node::Tree(Tree::new(
            kind,
            vec![Node::Value(value.to_string())],
            Location::unknown(),
            &[],
        ))
    }

    #[test]
    fn check_tree_display() {
        let tree = Tree::new(
            "Term",
            vec![leaf("INT", "1"), leaf("INT", "2")],
            Location::unknown(),
            &[],
        );
        assert_eq!(tree.to_string(), "Term(INT(1), INT(2))");

        let empty = Tree::new("Funcs", vec![], Location::unknown(), &[]);
        assert_eq!(empty.to_string(), "Funcs()");
    }

    #[test]
    fn check_tree_accessors() {
        let tree = Tree::new(
            "Pair",
            vec![leaf("INT", "1"), Node::Value("raw".into())],
            Location::unknown(),
            &[],
        );

        assert_eq!(tree.value(), None);
        assert_eq!(tree.subtrees().count(), 1);
        assert_eq!(tree.subtrees().next().and_then(Tree::value), Some("1"));
        assert_eq!(tree.nodes()[1].as_value(), Some("raw"));
    }
}
