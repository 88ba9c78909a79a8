//! Error handling for the serve-react CLI.
//!
//! A small `thiserror` hierarchy; `main` converts the top-level error into a
//! miette report so failures exit non-zero with readable output.

use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The bundler reported error diagnostics; the report has already been
    /// printed when this is raised.
    #[error("Build failed with {count} error diagnostic(s)")]
    Build { count: usize },

    /// Development server errors (bind failures, serve loop faults).
    #[error("Server error: {0}")]
    Server(String),

    /// I/O errors from file system operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors from the bundling layer.
    #[error(transparent)]
    Bundler(#[from] serve_react_bundler::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert a CliError into a miette Report for terminal rendering.
pub fn cli_error_to_miette(err: CliError) -> miette::Report {
    match err {
        CliError::Bundler(e) => miette::Report::new(e),
        CliError::Build { count } => miette::miette!(
            help = "Fix the reported diagnostics and run serve-react again",
            "Build failed with {count} error diagnostic(s)"
        ),
        other => miette::miette!("{}", other),
    }
}
