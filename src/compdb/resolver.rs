use crate::compdb::database::CompilationDatabase;
use crate::compdb::errors::ResolveError;
use std::path::{Path, PathBuf};

/// Number of trailing arguments dropped from a recorded command.
///
/// The recording tool appends the source file and output flag pair at the end;
/// the rest is handed to the front end as-is.
pub const TRAILING_ARGUMENTS: usize = 2;

/// Parser arguments recovered for one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdaptedCommand {
    /// Absolute path of the matched source file.
    pub file: PathBuf,
    /// Working directory of the recorded command.
    pub directory: PathBuf,
    pub arguments: Vec<String>,
}

/// Looks up and adapts the compiler arguments for one file at a time.
#[derive(Debug, Clone, Copy)]
pub struct CompileCommandResolver<'db> {
    database: &'db CompilationDatabase,
}

impl<'db> CompileCommandResolver<'db> {
    pub fn new(database: &'db CompilationDatabase) -> Self {
        Self { database }
    }

    /// Resolve the single recorded command for `path`.
    ///
    /// Fails unless exactly one command matches. The last
    /// [`TRAILING_ARGUMENTS`] entries are dropped positionally without looking
    /// at what they are; shorter argument lists adapt to an empty list.
    pub fn resolve(&self, path: &Path) -> Result<AdaptedCommand, ResolveError> {
        let matches = self.database.commands_for(path);

        let [command] = matches.as_slice() else {
            let suggestion = if matches.is_empty() {
                self.database.closest_file(path)
            } else {
                None
            };
            return Err(ResolveError::AmbiguousOrMissingCompileCommand {
                path: path.to_path_buf(),
                count: matches.len(),
                suggestion,
            });
        };

        let keep = command.arguments.len().saturating_sub(TRAILING_ARGUMENTS);

        Ok(AdaptedCommand {
            file: command.source_path(),
            directory: command.directory.clone(),
            arguments: command.arguments[..keep].to_vec(),
        })
    }
}
