//! Span Extract: find `Span` declarations and their annotation messages.
//!
//! For every source file, the compile command recorded in a compilation
//! database (`compile_commands.json`) is looked up and adapted, the file is
//! parsed with a tree-sitter C/C++ grammar, and every variable declaration whose
//! type is exactly `Span` is reported together with the first string literal
//! found inside it.
//!
//! # Architecture
//!
//! The extraction walk only sees [`SyntaxNode`], a read-only view of a
//! compiler front end's tree. [`ts::CppNode`] is the tree-sitter implementation;
//! other front ends can be plugged in without touching [`SpanCollector`] or
//! [`find_string_literal`].
//!
//! # Example
//!
//! ```no_run
//! use span_extract::{CompilationDatabase, Extractor, FailurePolicy, SpanCollector};
//! use std::path::PathBuf;
//!
//! let database = CompilationDatabase::from_directory("build").unwrap();
//! let mut extractor = Extractor::new(&database, SpanCollector::default(), FailurePolicy::Skip);
//!
//! let report = extractor.run(&[PathBuf::from("src/main.cc")], |_| {});
//! for span in &report.spans {
//!     println!("{}: {:?}", span.variable_name, span.message());
//! }
//! ```

pub mod compdb;
pub mod config;
pub mod extract;
pub mod inputs;
pub mod pipeline;
pub mod report;
pub mod ts;

// Re-exports
pub use compdb::{
    AdaptedCommand, CompilationDatabase, CompilationDatabaseError, CompileCommand,
    CompileCommandResolver, ResolveError,
};
pub use config::{ConfigError, Settings};
pub use extract::{
    find_string_literal, Descent, MessageDescription, NodeKind, SourcePosition, SourceRange,
    SpanCollector, SpanDescription, SyntaxNode,
};
pub use pipeline::{Event, ExtractError, Extractor, FailurePolicy, RunReport};
pub use report::{render, ReportFormat};
pub use ts::{CppNode, ParsedSource, SourceLanguage, SourceParser, TreeSitterError};
