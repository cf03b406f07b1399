use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use span_extract::config::{self, Settings};
use span_extract::inputs::expand_inputs;
use span_extract::{
    render, CompilationDatabase, Descent, Event, ExtractError, Extractor, FailurePolicy,
    ReportFormat, ResolveError, RunReport, SpanCollector,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "span-extract")]
#[command(
    about = "Extract Span declarations and their messages from C/C++ sources",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Directory containing compile_commands.json
    #[arg(
        short = 'p',
        long = "build-dir",
        env = "SPAN_EXTRACT_BUILD_DIR",
        default_value = "."
    )]
    build_dir: PathBuf,

    /// Settings file (defaults to span-extract.toml in the build directory)
    #[arg(long, env = "SPAN_EXTRACT_CONFIG")]
    config: Option<PathBuf>,

    /// Exact type name to collect
    #[arg(long, env = "SPAN_EXTRACT_TYPE_NAME")]
    type_name: Option<String>,

    /// What to do when a file cannot be processed
    #[arg(long, value_enum)]
    on_error: Option<FailurePolicy>,

    /// Whether to look inside declarations of other types
    #[arg(long, value_enum)]
    descent: Option<Descent>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,

    /// Process every file recorded in the compilation database
    #[arg(long)]
    all: bool,

    /// Show compile arguments and per-file counts
    #[arg(short, long)]
    verbose: bool,

    /// Source files or directories to scan
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let database = CompilationDatabase::from_directory(&cli.build_dir).with_context(|| {
        format!(
            "cannot load compilation database from {}",
            cli.build_dir.display()
        )
    })?;
    let settings = resolve_settings(&cli)?;
    let files = collect_files(&cli, &database)?;

    if files.is_empty() {
        anyhow::bail!(
            "{}\n{}\n  {}\n  {}",
            "No source files to process.".red(),
            "Try one of:".bold(),
            "1. Name files or directories: span-extract -p build src/",
            "2. Process the whole database: span-extract -p build --all"
        );
    }

    let collector = SpanCollector::new(settings.type_name.clone(), settings.descent);
    let mut extractor = Extractor::new(&database, collector, settings.on_error);
    let verbose = cli.verbose;
    let report = extractor.run(&files, |event| log_event(&event, verbose));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&report.spans, settings.format, &mut out).context("failed to write results")?;
    out.flush()?;

    print_summary(&report);

    let code = report.exit_code();
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// Merge CLI flags over the config file over defaults.
fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let config_path = cli
        .config
        .clone()
        .or_else(|| config::discover(&cli.build_dir));

    let mut settings = match &config_path {
        Some(path) => config::load_from_path(path)?,
        None => Settings::default(),
    };

    if let Some(type_name) = &cli.type_name {
        settings.type_name = type_name.clone();
    }
    if let Some(on_error) = cli.on_error {
        settings.on_error = on_error;
    }
    if let Some(descent) = cli.descent {
        settings.descent = descent;
    }
    if let Some(format) = cli.format {
        settings.format = format;
    }

    settings
        .validate()
        .context("invalid command-line settings")?;
    Ok(settings)
}

fn collect_files(cli: &Cli, database: &CompilationDatabase) -> Result<Vec<PathBuf>> {
    let mut files = expand_inputs(&cli.files, database)?;
    if cli.all {
        files.extend(database.all_files());
    }
    Ok(files.into_vec())
}

fn log_event(event: &Event<'_>, verbose: bool) {
    match event {
        Event::Started { path } => {
            eprintln!("{}", format!("Processing file {}", path.display()).dimmed());
        }
        Event::Resolved { command, .. } if verbose => {
            eprintln!(
                "  {} {}",
                "args:".dimmed(),
                command.arguments.join(" ").dimmed()
            );
        }
        Event::Resolved { .. } => {}
        Event::Parsed {
            path,
            syntax_errors,
            ..
        } if *syntax_errors > 0 => {
            eprintln!(
                "  {} {} has {} syntax error(s); results may be incomplete",
                "warning:".yellow(),
                path.display(),
                syntax_errors
            );
        }
        Event::Parsed { .. } => {}
        Event::Collected { count, .. } if verbose => {
            eprintln!("  {} {} span(s)", "✓".green(), count);
        }
        Event::Collected { .. } => {}
        Event::Failed { path, error } => log_failure(path, error),
    }
}

fn log_failure(path: &Path, error: &ExtractError) {
    eprintln!("  {} {}", "✗".red(), path.display());
    eprintln!("    {}", error.to_string().red());

    if let ExtractError::Resolve(ResolveError::AmbiguousOrMissingCompileCommand {
        count: 0,
        ..
    }) = error
    {
        eprintln!(
            "    {}",
            "is the file listed in compile_commands.json? (see -p)".dimmed()
        );
    }
}

fn print_summary(report: &RunReport) {
    let summary = format!(
        "{} spans in {} files, {} failed",
        report.spans.len(),
        report.files_processed,
        report.failures.len()
    );

    if report.failures.is_empty() {
        eprintln!("\n{}", summary.bold());
    } else {
        eprintln!("\n{}", summary.bold().yellow());
    }

    if report.aborted {
        eprintln!("{}", "Stopped at the first failure (--on-error abort).".red());
    }
}
