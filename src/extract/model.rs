use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A point in a source file.
///
/// `line` and `column` are 1-based, `offset` is a 0-based byte offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcePosition {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

/// Ordered `(start, end)` pair spanning a token or node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRange {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}-{}:{}",
            self.start.file.display(),
            self.start.line,
            self.start.column,
            self.end.line,
            self.end.column
        )
    }
}

/// The annotation message found inside a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageDescription {
    pub source_range: SourceRange,
    /// Literal text with the surrounding quotes removed. Escapes are kept as spelled.
    pub message: String,
}

/// One matched declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanDescription {
    pub variable_name: String,
    /// `None` when the declaration holds no string literal at all.
    pub message_description: Option<MessageDescription>,
}

impl SpanDescription {
    pub fn message(&self) -> Option<&str> {
        self.message_description.as_ref().map(|m| m.message.as_str())
    }
}

/// Node discriminant consumed by the collector and the literal finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    TranslationUnit,
    VariableDeclaration,
    StringLiteral,
    Other,
}

/// Read-only view of a syntax tree node produced by a compiler front end.
///
/// Collection and literal search only go through this trait, so any front end
/// able to answer these questions can be plugged in.
pub trait SyntaxNode: Sized {
    fn kind(&self) -> NodeKind;

    /// Declared name for declarations, empty for other nodes.
    fn display_name(&self) -> String;

    /// Display name of the declaration behind this node's type.
    ///
    /// `None` when the type has no underlying declaration (pointers,
    /// references, arrays) or the node is not a declaration.
    fn type_declaration_name(&self) -> Option<String>;

    /// Children in document order.
    fn children(&self) -> Vec<Self>;

    fn source_range(&self) -> SourceRange;

    /// Spelled tokens covered by this node, in order.
    fn tokens(&self) -> Vec<String>;
}
