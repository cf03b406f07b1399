//! Rendering of collected span descriptions.

use crate::extract::SpanDescription;
use serde::Deserialize;
use std::io::{self, Write};

/// Shown in text output when a declaration carries no literal.
pub const NO_MESSAGE: &str = "(no message)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ReportFormat {
    /// One line per declaration.
    #[default]
    Text,
    /// Pretty-printed JSON array.
    Json,
}

/// Write `spans` to `out` in the requested format.
pub fn render<W: Write>(
    spans: &[SpanDescription],
    format: ReportFormat,
    out: &mut W,
) -> io::Result<()> {
    match format {
        ReportFormat::Text => render_text(spans, out),
        ReportFormat::Json => render_json(spans, out),
    }
}

/// `<name>  <file>:<line>:<col>-<line>:<col>  "<message>"`, or the no-message marker.
pub fn render_text<W: Write>(spans: &[SpanDescription], out: &mut W) -> io::Result<()> {
    for span in spans {
        match &span.message_description {
            Some(description) => writeln!(
                out,
                "{}  {}  \"{}\"",
                span.variable_name, description.source_range, description.message
            )?,
            None => writeln!(out, "{}  {}", span.variable_name, NO_MESSAGE)?,
        }
    }
    Ok(())
}

pub fn render_json<W: Write>(spans: &[SpanDescription], out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, spans)?;
    writeln!(out)
}
