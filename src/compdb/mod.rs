//! Compilation database access.
//!
//! Loads `compile_commands.json`, finds the commands recorded for a source
//! file and adapts them into front-end arguments.

pub mod database;
pub mod errors;
pub mod resolver;
pub mod shell;

pub use database::{normalize_path, CompilationDatabase, CompileCommand};
pub use errors::{CompilationDatabaseError, ResolveError};
pub use resolver::{AdaptedCommand, CompileCommandResolver, TRAILING_ARGUMENTS};
pub use shell::split_command;
