//! Expansion of command-line inputs into source files.

use crate::compdb::{normalize_path, CompilationDatabase};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions treated as C or C++ sources when walking a directory.
pub const SOURCE_EXTENSIONS: &[&str] = &["c", "cc", "cpp", "cxx", "c++", "h", "hh", "hpp", "hxx"];

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Ordered list of files to process, without repeating a translation unit.
///
/// Two spellings of the same file (`src/a.cc`, `./src/../src/a.cc` or its
/// absolute path) count as one; the first spelling is kept.
#[derive(Debug, Default)]
pub struct InputFiles {
    files: Vec<PathBuf>,
    seen: Vec<PathBuf>,
}

impl InputFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `path` unless the same file is already listed. Returns whether it was added.
    pub fn push(&mut self, path: PathBuf) -> bool {
        let key = identity(&path);
        if self.seen.contains(&key) {
            return false;
        }
        self.seen.push(key);
        self.files.push(path);
        true
    }

    pub fn extend(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        for path in paths {
            self.push(path);
        }
    }

    pub fn into_vec(self) -> Vec<PathBuf> {
        self.files
    }
}

fn identity(path: &Path) -> PathBuf {
    std::path::absolute(path)
        .map(|absolute| normalize_path(&absolute))
        .unwrap_or_else(|_| normalize_path(path))
}

/// Replace each directory in `inputs` by the sources below it, sorted.
///
/// Walked files are kept only when `database` records a command for them, so
/// headers and stray sources in a tree are skipped. Plain file arguments are
/// kept as given, whatever their extension, and in their original position.
pub fn expand_inputs(
    inputs: &[PathBuf],
    database: &CompilationDatabase,
) -> Result<InputFiles, walkdir::Error> {
    let mut files = InputFiles::new();

    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(input) {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type().is_file()
                && is_source_file(path)
                && !database.commands_for(path).is_empty()
            {
                found.push(entry.into_path());
            }
        }
        found.sort();
        files.extend(found);
    }

    Ok(files)
}
