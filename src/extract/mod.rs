//! Declaration matching and annotation extraction.
//!
//! The walk is written against [`SyntaxNode`], a read-only view of a compiler
//! front end's tree. [`SpanCollector`] finds variable declarations of the target
//! type and [`find_string_literal`] pulls the first string literal out of each.

pub mod collector;
pub mod literal;
pub mod model;

#[cfg(test)]
pub(crate) mod test_tree;

pub use collector::{Descent, SpanCollector, DEFAULT_TYPE_NAME};
pub use literal::{find_string_literal, unquote};
pub use model::{
    MessageDescription, NodeKind, SourcePosition, SourceRange, SpanDescription, SyntaxNode,
};
