//! In-memory syntax tree for exercising the extraction walk without a parser.

use crate::extract::model::{NodeKind, SourcePosition, SourceRange, SyntaxNode};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct TestNode {
    kind: NodeKind,
    name: String,
    type_name: Option<String>,
    tokens: Vec<String>,
    offset: usize,
    children: Vec<TestNode>,
}

impl TestNode {
    pub fn unit(children: Vec<TestNode>) -> Self {
        Self::node(NodeKind::TranslationUnit, children)
    }

    pub fn node(kind: NodeKind, children: Vec<TestNode>) -> Self {
        Self {
            kind,
            name: String::new(),
            type_name: None,
            tokens: Vec::new(),
            offset: 0,
            children,
        }
    }

    pub fn var(name: &str, type_name: Option<&str>, children: Vec<TestNode>) -> Self {
        Self {
            kind: NodeKind::VariableDeclaration,
            name: name.to_string(),
            type_name: type_name.map(str::to_string),
            tokens: Vec::new(),
            offset: 0,
            children,
        }
    }

    /// A string literal whose single token is spelled `spelling`.
    pub fn literal(spelling: &str, offset: usize) -> Self {
        Self {
            kind: NodeKind::StringLiteral,
            name: String::new(),
            type_name: None,
            tokens: vec![spelling.to_string()],
            offset,
            children: Vec::new(),
        }
    }

    pub fn other(children: Vec<TestNode>) -> Self {
        Self::node(NodeKind::Other, children)
    }
}

fn position(offset: usize) -> SourcePosition {
    SourcePosition {
        file: PathBuf::from("test.cc"),
        line: 1,
        column: offset + 1,
        offset,
    }
}

impl SyntaxNode for TestNode {
    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn type_declaration_name(&self) -> Option<String> {
        self.type_name.clone()
    }

    fn children(&self) -> Vec<Self> {
        self.children.clone()
    }

    fn source_range(&self) -> SourceRange {
        let len = self.tokens.iter().map(String::len).sum::<usize>();
        SourceRange {
            start: position(self.offset),
            end: position(self.offset + len),
        }
    }

    fn tokens(&self) -> Vec<String> {
        self.tokens.clone()
    }
}
