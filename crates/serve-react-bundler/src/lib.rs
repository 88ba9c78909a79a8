//! # serve-react-bundler
//!
//! In-memory bundling for the serve-react dev server, built on Rolldown.
//!
//! This crate owns everything bundler-facing: the build configuration
//! ([`BundleConfig`]), the single compile pass ([`compile`]) that writes the
//! compiled artifacts into an in-memory output store ([`MemoryOutput`]), and
//! the structured diagnostics extracted from Rolldown failures.
//!
//! ## Quick Start
//!
//! ```no_run
//! use serve_react_bundler::{compile, BundleConfig, Language, MemoryOutput};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BundleConfig::new("public", "/app/public/index.js", Language::Plain);
//! let output = MemoryOutput::new();
//!
//! let report = compile(&config, &output).await?;
//! if report.has_errors() {
//!     eprintln!("{}", report.render());
//!     return Ok(());
//! }
//! assert!(output.get("/bundle.js").is_some());
//! # Ok(()) }
//! ```

pub mod compile;
pub mod config;
pub mod diagnostics;
pub mod jsx_loader;
pub mod memory;

pub use compile::{BuildReport, compile};
pub use config::{BundleConfig, Language};
pub use jsx_loader::JsxLoaderPlugin;
pub use memory::{BUNDLE_PATH, MemoryOutput};

// Re-export core Rolldown types for library users
pub use rolldown::{
    Bundler, BundlerBuilder, BundlerOptions, InputItem, OutputFormat, Platform, ResolveOptions,
    SourceMapType,
};
pub use rolldown_common::{ModuleType, Output, OutputAsset, OutputChunk};

use diagnostics::Diagnostic;

/// Errors raised by bundling operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The bundler reported one or more diagnostics.
    #[error("{}", format_bundler_error(.0))]
    Bundler(Vec<Diagnostic>),

    /// The bundle configuration is invalid.
    #[error("Invalid bundle configuration: {0}")]
    InvalidConfig(String),

    /// I/O error while preparing the build.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for serve-react-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a bundler error from a Rolldown failure value.
    ///
    /// Extracts structured diagnostics from Rolldown's error types.
    pub fn from_rolldown(error: &dyn std::fmt::Debug) -> Self {
        Error::Bundler(diagnostics::extract_from_rolldown_error(error))
    }
}

/// Format bundler error diagnostics for display.
fn format_bundler_error(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return "Unknown bundler error".to_string();
    }

    if diagnostics.len() == 1 {
        let diag = &diagnostics[0];
        format!("{}: {}", diag.kind, diag.message)
    } else {
        format!(
            "{} errors: {}",
            diagnostics.len(),
            diagnostics
                .iter()
                .map(|d| format!("{}: {}", d.kind, d.message))
                .collect::<Vec<_>>()
                .join("; ")
        )
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Bundler(_) => "BUNDLER_ERROR",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Io(_) => "IO_ERROR",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::Bundler(diags) => diags
                .iter()
                .find_map(|d| d.help.clone())
                .map(|h| Box::new(h) as Box<dyn std::fmt::Display>),
            Error::InvalidConfig(_) => Some(Box::new(
                "Check the serving directory and entry path passed on the command line",
            )),
            Error::Io(_) => None,
        }
    }
}
