//! Compile command lookup against a database on disk.

use super::{write_database, Workspace};
use serde_json::json;
use span_extract::{
    CompilationDatabase, CompilationDatabaseError, CompileCommandResolver, ResolveError,
};

#[test]
fn test_single_entry_drops_trailing_arguments() {
    let workspace = Workspace::new().source("a.cc", "Span s;\n");
    let database = workspace.database();

    let command = CompileCommandResolver::new(&database)
        .resolve(&workspace.path("a.cc"))
        .unwrap();

    assert_eq!(command.arguments, ["c++", "-std=c++17", "-c", "a.cc"]);
    assert_eq!(command.directory, workspace.dir.path());
}

#[test]
fn test_missing_entry_is_reported_with_hint() {
    let workspace = Workspace::new().source("widget.cc", "Span s;\n");
    let database = workspace.database();

    let error = CompileCommandResolver::new(&database)
        .resolve(&workspace.path("widgets.cc"))
        .unwrap_err();

    let ResolveError::AmbiguousOrMissingCompileCommand {
        count, suggestion, ..
    } = &error;
    assert_eq!(*count, 0);
    assert_eq!(suggestion.as_deref(), Some(workspace.path("widget.cc").as_path()));
    assert!(error.to_string().contains("found 0 compile commands"));
}

#[test]
fn test_duplicate_entries_are_ambiguous() {
    let workspace = Workspace::new()
        .source("a.cc", "Span s;\n")
        .entry("a.cc", "clang++");
    let database = workspace.database();

    let error = CompileCommandResolver::new(&database)
        .resolve(&workspace.path("a.cc"))
        .unwrap_err();
    assert!(error.to_string().contains("found 2 compile commands"));
}

#[test]
fn test_relative_query_matches_absolute_entry() {
    let workspace = Workspace::new().source("sub/a.cc", "Span s;\n");
    let database = workspace.database();

    let dotted = workspace.dir.path().join("sub/../sub/./a.cc");
    assert!(CompileCommandResolver::new(&database).resolve(&dotted).is_ok());
}

#[test]
fn test_command_strings_are_split() {
    let workspace = Workspace::new();
    write_database(
        workspace.dir.path(),
        &[json!({
            "directory": workspace.dir.path(),
            "file": "a.cc",
            "command": "c++ -DNAME='\"quoted value\"' -c a.cc -o a.o",
        })],
    );
    let database = CompilationDatabase::from_directory(workspace.dir.path()).unwrap();

    let command = CompileCommandResolver::new(&database)
        .resolve(&workspace.path("a.cc"))
        .unwrap();
    assert_eq!(
        command.arguments,
        ["c++", "-DNAME=\"quoted value\"", "-c", "a.cc"]
    );
}

#[test]
fn test_entry_without_command_fails_to_load() {
    let workspace = Workspace::new();
    write_database(
        workspace.dir.path(),
        &[json!({ "directory": workspace.dir.path(), "file": "a.cc" })],
    );

    let error = CompilationDatabase::from_directory(workspace.dir.path()).unwrap_err();
    assert!(matches!(
        error,
        CompilationDatabaseError::MissingCommand { index: 0, .. }
    ));
}

#[test]
fn test_missing_database_is_an_io_error() {
    let workspace = Workspace::new();
    let error = CompilationDatabase::from_directory(workspace.dir.path()).unwrap_err();
    assert!(matches!(error, CompilationDatabaseError::Io { .. }));
}
