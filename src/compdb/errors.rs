use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompilationDatabaseError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse compilation database {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("entry {index} for {file} has neither `arguments` nor `command`")]
    MissingCommand { index: usize, file: PathBuf },

    #[error("entry {index} has an unterminated quote in `command`")]
    UnterminatedQuote { index: usize },
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(
        "found {count} compile commands for {}, expected exactly 1{}",
        .path.display(),
        suggestion_hint(.suggestion)
    )]
    AmbiguousOrMissingCompileCommand {
        path: PathBuf,
        count: usize,
        suggestion: Option<PathBuf>,
    },
}

fn suggestion_hint(suggestion: &Option<PathBuf>) -> String {
    match suggestion {
        Some(hint) => format!(" (did you mean {}?)", hint.display()),
        None => String::new(),
    }
}
