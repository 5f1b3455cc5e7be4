//! Error type of the Mandala CLI.

use std::io;

use thiserror::Error;

use mandala::MandalaError;

use crate::config::ConfigError;

/// Everything that can stop a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input graph that is not valid JSON for a graph; `src` keeps the text
    /// for source snippets.
    #[error("Invalid graph JSON: {err}")]
    Json { err: serde_json::Error, src: String },

    #[error("Failed to write output JSON: {0}")]
    Output(serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] MandalaError),
}

impl CliError {
    /// Create a new `Json` error with the associated input text.
    pub fn new_json_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Json {
            err,
            src: src.into(),
        }
    }
}
