use crate::compdb::errors::CompilationDatabaseError;
use crate::compdb::shell::split_command;
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Minimum Jaro-Winkler similarity for a recorded file to be offered as a hint.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// One recorded compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileCommand {
    /// Working directory the command ran in.
    pub directory: PathBuf,
    /// Source file as recorded, possibly relative to `directory`.
    pub file: PathBuf,
    pub arguments: Vec<String>,
    pub output: Option<PathBuf>,
}

impl CompileCommand {
    /// Absolute, lexically normalized path of the source file.
    pub fn source_path(&self) -> PathBuf {
        normalize_path(&self.directory.join(&self.file))
    }
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    directory: PathBuf,
    file: PathBuf,
    #[serde(default)]
    arguments: Option<Vec<String>>,
    #[serde(default)]
    command: Option<String>,
    #[serde(default)]
    output: Option<PathBuf>,
}

/// Read-only lookup table from source files to recorded compile commands.
#[derive(Debug, Clone, Default)]
pub struct CompilationDatabase {
    commands: Vec<CompileCommand>,
}

impl CompilationDatabase {
    pub const FILE_NAME: &'static str = "compile_commands.json";

    /// Load `compile_commands.json` from a build directory.
    pub fn from_directory(dir: impl AsRef<Path>) -> Result<Self, CompilationDatabaseError> {
        let dir = dir.as_ref();
        let path = dir.join(Self::FILE_NAME);
        let contents = fs::read_to_string(&path).map_err(|source| CompilationDatabaseError::Io {
            path: path.clone(),
            source,
        })?;

        let base = std::path::absolute(dir).map_err(|source| CompilationDatabaseError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        Self::from_json(&contents, &base).map_err(|error| match error {
            CompilationDatabaseError::Json { source, .. } => {
                CompilationDatabaseError::Json { path, source }
            }
            other => other,
        })
    }

    /// Parse database JSON. Relative `directory` values are taken relative to `base`.
    pub fn from_json(json: &str, base: &Path) -> Result<Self, CompilationDatabaseError> {
        let entries: Vec<RawEntry> =
            serde_json::from_str(json).map_err(|source| CompilationDatabaseError::Json {
                path: PathBuf::from(Self::FILE_NAME),
                source,
            })?;

        let mut commands = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let arguments = match (entry.arguments, entry.command) {
                (Some(arguments), _) => arguments,
                (None, Some(command)) => split_command(&command)
                    .ok_or(CompilationDatabaseError::UnterminatedQuote { index })?,
                (None, None) => {
                    return Err(CompilationDatabaseError::MissingCommand {
                        index,
                        file: entry.file,
                    })
                }
            };

            commands.push(CompileCommand {
                directory: base.join(entry.directory),
                file: entry.file,
                arguments,
                output: entry.output,
            });
        }

        Ok(Self { commands })
    }

    pub fn from_commands(commands: Vec<CompileCommand>) -> Self {
        Self { commands }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All commands recorded for `path`.
    ///
    /// Relative queries are taken relative to the current directory. Both sides
    /// are compared after lexical normalization.
    pub fn commands_for(&self, path: &Path) -> Vec<&CompileCommand> {
        let Ok(absolute) = std::path::absolute(path) else {
            return Vec::new();
        };
        let wanted = normalize_path(&absolute);

        self.commands
            .iter()
            .filter(|command| command.source_path() == wanted)
            .collect()
    }

    /// Every distinct recorded source file, in first-seen order.
    pub fn all_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = Vec::new();
        for command in &self.commands {
            let path = command.source_path();
            if !files.contains(&path) {
                files.push(path);
            }
        }
        files
    }

    /// Recorded file whose path looks most like `path`, if any is close enough.
    pub fn closest_file(&self, path: &Path) -> Option<PathBuf> {
        let wanted = std::path::absolute(path)
            .map(|p| normalize_path(&p))
            .unwrap_or_else(|_| path.to_path_buf());
        let wanted = wanted.to_string_lossy();

        self.all_files()
            .into_iter()
            .map(|candidate| {
                let score = strsim::jaro_winkler(&wanted, &candidate.to_string_lossy());
                (score, candidate)
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, candidate)| candidate)
    }
}

/// Lexically normalize a path: drop `.` components and fold `..` into its parent.
///
/// Symlinks are not resolved, so this works for files that no longer exist.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(component),
            },
            other => normalized.push(other),
        }
    }
    normalized
}
