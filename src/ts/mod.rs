//! Tree-sitter front end for C and C++.
//!
//! This module parses translation units with the grammars bundled in
//! ast-grep-language and exposes the tree through [`CppNode`], an
//! implementation of [`crate::extract::SyntaxNode`] that reports variable
//! declarations the way a compiler front end does.

pub mod errors;
pub mod node;
pub mod parser;

pub use errors::TreeSitterError;
pub use node::CppNode;
pub use parser::{ParsedSource, SourceLanguage, SourceParser};
