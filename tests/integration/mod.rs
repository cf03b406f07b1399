//! Integration tests: real sources and compile_commands.json on disk.

mod extraction;
mod resolution;

use serde_json::json;
use span_extract::{CompilationDatabase, Extractor, FailurePolicy, SpanCollector, SpanDescription};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A build tree with sources and a compilation database.
pub struct Workspace {
    pub dir: TempDir,
    entries: Vec<serde_json::Value>,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            entries: Vec::new(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `name` and record one `c++ -c <name> -o <name>.o` entry for it.
    pub fn source(mut self, name: &str, contents: &str) -> Self {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        self.entry(name, "c++")
    }

    /// Record an entry without touching the file on disk.
    ///
    /// C++ compilers get `-std=c++17` after the compiler name.
    pub fn entry(mut self, name: &str, compiler: &str) -> Self {
        let mut arguments = vec![compiler.to_string()];
        if compiler.ends_with("++") {
            arguments.push("-std=c++17".to_string());
        }
        arguments.extend(["-c".to_string(), name.to_string()]);
        arguments.extend(["-o".to_string(), format!("{name}.o")]);

        self.entries.push(json!({
            "directory": self.dir.path(),
            "file": name,
            "arguments": arguments,
        }));
        self
    }

    pub fn database(&self) -> CompilationDatabase {
        write_database(self.dir.path(), &self.entries);
        CompilationDatabase::from_directory(self.dir.path()).unwrap()
    }
}

pub fn write_database(dir: &Path, entries: &[serde_json::Value]) {
    fs::write(
        dir.join(CompilationDatabase::FILE_NAME),
        serde_json::to_string_pretty(entries).unwrap(),
    )
    .unwrap();
}

/// Extract from one file with default settings.
pub fn extract(workspace: &Workspace, name: &str) -> Vec<SpanDescription> {
    let database = workspace.database();
    let mut extractor = Extractor::new(&database, SpanCollector::default(), FailurePolicy::Abort);
    let report = extractor.run(&[workspace.path(name)], |_| {});
    assert!(report.failures.is_empty(), "{:?}", report.failures);
    report.spans
}

/// `(name, message)` pairs for compact assertions.
pub fn summary(spans: &[SpanDescription]) -> Vec<(String, Option<String>)> {
    spans
        .iter()
        .map(|span| (span.variable_name.clone(), span.message().map(str::to_string)))
        .collect()
}
