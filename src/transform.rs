//! Rewriting generic syntax [`Tree`]s into typed representations.
//!
//! # Dispatch
//! A [`Tree`] is tagged with a plain string, but a [`Transform`] never
//! matches on strings directly: it names a closed `Kind` type (usually a
//! fieldless enum deriving [`strum::EnumString`]) and the tag is parsed into
//! that type before dispatching. Handling a `Kind` is then an exhaustive
//! `match`, and a tree whose tag is not part of `Kind` fails loudly with
//! [`TransformError::UnknownTag`] instead of being passed through.

use std::str::FromStr;

use thiserror::Error;

use crate::{
    location::Location,
    parser::{Node, Tree},
};

/// The errors produced while transforming a [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// No handler exists for the tag `tag`.
    #[error("{location}: no transformation rule for `{tag}`")]
    UnknownTag {
        /// The unrecognised tag.
        tag: String,
        /// The location of the offending tree.
        location: Location,
    },
    /// A tree had the wrong number of children for its tag.
    #[error("{location}: `{tag}` expects {expected} children, but has {got}")]
    Arity {
        /// The tag of the offending tree.
        tag: String,
        /// The number of children its handler expects.
        expected: usize,
        /// The number of children it has.
        got: usize,
        /// The location of the offending tree.
        location: Location,
    },
    /// A child was a terminal value where a tree was expected, or vice versa.
    #[error("{location}: unexpected child in `{tag}`")]
    UnexpectedNode {
        /// The tag of the tree containing the child.
        tag: String,
        /// The location of that tree.
        location: Location,
    },
}

/// A total mapping from tree tags to handlers.
pub trait Transform {
    /// The closed set of tags this transformation handles.
    type Kind: FromStr;
    /// The result of transforming a tree.
    type Output;

    /// Transforms `tree`, whose tag has already been parsed as `kind`.
    fn transform_node(&mut self, kind: Self::Kind, tree: &Tree<'_>)
        -> Result<Self::Output, TransformError>;

    /// Transforms `tree` by dispatching on its tag.
    fn transform(&mut self, tree: &Tree<'_>) -> Result<Self::Output, TransformError> {
        let kind = tree
            .kind()
            .parse::<Self::Kind>()
            .map_err(|_| TransformError::UnknownTag {
                tag: tree.kind().to_string(),
                location: tree.location().clone(),
            })?;
        self.transform_node(kind, tree)
    }
}

/// Returns the `N` children of `tree` as trees, failing if there are not
/// exactly `N` or if any of them is a terminal value.
pub fn children<'a, 't, const N: usize>(
    tree: &'a Tree<'t>,
) -> Result<[&'a Tree<'t>; N], TransformError> {
    let nodes = tree.nodes();
    if nodes.len() != N {
        return Err(TransformError::Arity {
            tag: tree.kind().to_string(),
            expected: N,
            got: nodes.len(),
            location: tree.location().clone(),
        });
    }

    let subtrees = nodes
        .iter()
        .map(|node| node.as_tree().ok_or_else(|| unexpected(tree)))
        .collect::<Result<Vec<_>, _>>()?;

    // the length was checked above
    subtrees.try_into().map_err(|_| unexpected(tree))
}

/// Returns the text of a token tree such as `INT(42)`.
pub fn value<'a>(tree: &'a Tree<'_>) -> Result<&'a str, TransformError> {
    match tree.nodes() {
        [Node::Value(value)] => Ok(value.as_str()),
        [_] => Err(unexpected(tree)),
        nodes => Err(TransformError::Arity {
            tag: tree.kind().to_string(),
            expected: 1,
            got: nodes.len(),
            location: tree.location().clone(),
        }),
    }
}

/// Builds a [`TransformError::UnexpectedNode`] for `tree`.
fn unexpected(tree: &Tree<'_>) -> TransformError {
    TransformError::UnexpectedNode {
        tag: tree.kind().to_string(),
        location: tree.location().clone(),
    }
}
