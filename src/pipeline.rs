//! Per-file driver: resolve the compile command, parse, collect.
//!
//! Files are handled one after another. The parsed tree lives only for the
//! duration of one file; results accumulate across files in input order.

use crate::compdb::{AdaptedCommand, CompilationDatabase, CompileCommandResolver, ResolveError};
use crate::extract::{SpanCollector, SpanDescription};
use crate::ts::{SourceLanguage, SourceParser, TreeSitterError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Exit status when some files failed under [`FailurePolicy::Skip`].
pub const EXIT_FILES_FAILED: i32 = 1;
/// Exit status when [`FailurePolicy::Abort`] stopped the run.
pub const EXIT_ABORTED: i32 = 2;

/// How a failure on one file affects the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Report the failure, move on to the next file.
    #[default]
    Skip,
    /// Stop at the first failure.
    Abort,
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: TreeSitterError,
    },
}

impl ExtractError {
    /// The input file the failure belongs to.
    pub fn path(&self) -> &Path {
        match self {
            ExtractError::Resolve(ResolveError::AmbiguousOrMissingCompileCommand {
                path, ..
            }) => path,
            ExtractError::Parse { path, .. } => path,
        }
    }
}

/// Progress notifications emitted while a run is in flight.
#[derive(Debug)]
pub enum Event<'a> {
    Started {
        path: &'a Path,
    },
    Resolved {
        path: &'a Path,
        command: &'a AdaptedCommand,
    },
    Parsed {
        path: &'a Path,
        language: SourceLanguage,
        syntax_errors: usize,
    },
    Collected {
        path: &'a Path,
        count: usize,
    },
    Failed {
        path: &'a Path,
        error: &'a ExtractError,
    },
}

/// Outcome of processing a list of files.
#[derive(Debug, Default)]
pub struct RunReport {
    pub spans: Vec<SpanDescription>,
    /// Files that were attempted, failed ones included.
    pub files_processed: usize,
    pub failures: Vec<ExtractError>,
    /// Set when [`FailurePolicy::Abort`] cut the run short.
    pub aborted: bool,
}

impl RunReport {
    pub fn exit_code(&self) -> i32 {
        if self.aborted {
            EXIT_ABORTED
        } else if !self.failures.is_empty() {
            EXIT_FILES_FAILED
        } else {
            0
        }
    }
}

/// Runs resolve, parse and collection for each input file.
pub struct Extractor<'db> {
    resolver: CompileCommandResolver<'db>,
    parser: SourceParser,
    collector: SpanCollector,
    policy: FailurePolicy,
}

impl<'db> Extractor<'db> {
    pub fn new(
        database: &'db CompilationDatabase,
        collector: SpanCollector,
        policy: FailurePolicy,
    ) -> Self {
        Self {
            resolver: CompileCommandResolver::new(database),
            parser: SourceParser::new(),
            collector,
            policy,
        }
    }

    /// Process one file, appending its matches to `out`.
    ///
    /// Nothing is appended when the file fails.
    pub fn extract_file<F>(
        &mut self,
        path: &Path,
        out: &mut Vec<SpanDescription>,
        on_event: &mut F,
    ) -> Result<usize, ExtractError>
    where
        F: FnMut(Event<'_>),
    {
        let command = self.resolver.resolve(path)?;
        on_event(Event::Resolved {
            path,
            command: &command,
        });

        let parsed = self
            .parser
            .parse_file(path, &command.file, &command.arguments)
            .map_err(|source| ExtractError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        on_event(Event::Parsed {
            path,
            language: parsed.language,
            syntax_errors: parsed.error_count(),
        });

        let before = out.len();
        self.collector.collect(parsed.root(), out);
        Ok(out.len() - before)
    }

    /// Process `files` in order under the configured failure policy.
    pub fn run<F>(&mut self, files: &[PathBuf], mut on_event: F) -> RunReport
    where
        F: FnMut(Event<'_>),
    {
        let mut report = RunReport::default();

        for path in files {
            on_event(Event::Started { path });
            report.files_processed += 1;

            match self.extract_file(path, &mut report.spans, &mut on_event) {
                Ok(count) => on_event(Event::Collected { path, count }),
                Err(error) => {
                    on_event(Event::Failed {
                        path,
                        error: &error,
                    });
                    report.failures.push(error);
                    if self.policy == FailurePolicy::Abort {
                        report.aborted = true;
                        break;
                    }
                }
            }
        }

        report
    }
}
