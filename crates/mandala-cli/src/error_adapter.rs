//! Error adapter for converting [`CliError`] to miette diagnostics.
//!
//! This module provides the bridge between the CLI's standard error type
//! and miette's rich diagnostic formatting. Malformed input graphs carry the
//! input text, so the report points at the offending line and column.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};
use serde_json::error::Category;

use mandala::MandalaError;

use crate::{CliError, config::ConfigError};

/// Adapter wrapping a [`CliError`] for miette rendering.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CliError::Io(_) => "mandala::io",
            CliError::Json { .. } => "mandala::json",
            CliError::Output(_) => "mandala::output",
            CliError::Config(_) | CliError::Engine(MandalaError::Config(_)) => "mandala::config",
            CliError::Engine(MandalaError::Quadrant(_)) => "mandala::quadrant",
            CliError::Engine(MandalaError::InvalidCanvas { .. }) => "mandala::canvas",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            CliError::Json { .. } => "expected an object with `nodes` and `edges` arrays",
            CliError::Config(ConfigError::MissingFile(_)) => {
                "pass an existing file to --config or omit it to use the defaults"
            }
            CliError::Engine(MandalaError::Quadrant(_)) => {
                "[[spiral.quadrants]] index ranges must cover 1..=N without gaps or overlaps"
            }
            CliError::Engine(MandalaError::InvalidCanvas { .. }) => {
                "--width and --height must be positive"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self.0 {
            CliError::Json { src, .. } => Some(src as &dyn miette::SourceCode),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let CliError::Json { err, src } = self.0 else {
            return None;
        };
        let offset = json_error_offset(err, src)?;
        let label = LabeledSpan::new_primary_with_span(
            Some(label_message(err).to_string()),
            SourceSpan::new(offset.into(), 0),
        );
        Some(Box::new(std::iter::once(label)))
    }
}

fn label_message(err: &serde_json::Error) -> &'static str {
    match err.classify() {
        Category::Syntax => "syntax error here",
        Category::Data => "unexpected value here",
        Category::Eof => "input ends here",
        Category::Io => "read failed here",
    }
}

/// Byte offset of the 1-based line and column reported by `err`.
fn json_error_offset(err: &serde_json::Error, src: &str) -> Option<usize> {
    if err.line() == 0 {
        return None;
    }
    let line_start: usize = src
        .split_inclusive('\n')
        .take(err.line() - 1)
        .map(str::len)
        .sum();
    Some((line_start + err.column().saturating_sub(1)).min(src.len()))
}

/// Wrap a [`CliError`] for rendering.
pub fn to_reportable(err: &CliError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
