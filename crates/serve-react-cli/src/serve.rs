//! The serve pipeline.
//!
//! One pass, in order: resolve the entry, configure the bundler, compile
//! into memory, then either report diagnostics and stop or start the dev
//! server. The compile is the only awaited suspension before the serve
//! loop; nothing here runs concurrently with it.

use crate::cli::Cli;
use crate::entry;
use crate::error::{CliError, Result};
use crate::server::DevServer;
use crate::ui;
use serve_react_bundler::{compile, BundleConfig, Language, MemoryOutput, BUNDLE_PATH};
use std::sync::Arc;
use tracing::debug;

/// Execute the pipeline for the parsed options.
///
/// Returns without serving when the build reports error diagnostics; the
/// caller maps that into a non-zero exit.
pub async fn execute(cli: Cli) -> Result<()> {
    ui::banner("⚡ Starting serve-react!");

    let cwd = std::env::current_dir()?;
    let language = cli.language();

    if language == Language::TypeScript {
        ui::info("Using the TypeScript bundle configuration");
    }

    ui::info("Looking for a bundle entry point...");
    let entry_path = entry::resolve_entry(&cli, &cwd);
    debug!(entry = %entry_path.display(), serving_dir = %cli.serving_dir, "resolved entry");
    ui::success(&format!("Using {}", entry_path.display()));

    let config = BundleConfig::new(&cli.serving_dir, &entry_path, language);
    let output = Arc::new(MemoryOutput::new());

    ui::info("Starting bundler!");
    let report = compile(&config, &output).await?;

    // The full report is printed on success too, as informational output.
    eprintln!("\n{}\n", report.render());

    if report.has_errors() {
        return Err(CliError::Build {
            count: report.diagnostics.len(),
        });
    }

    ui::success("Build successful!");
    ui::info(&format!(
        "Bundle size: {}",
        ui::format_size(report.bundle_bytes as u64)
    ));
    ui::info("Starting server!");

    ui::rule();
    ui::info(&format!(
        "The bundle ({}) is served from an in-memory filesystem.",
        BUNDLE_PATH
    ));
    ui::info(&format!(
        "Static files are served from {}",
        cwd.join(&cli.serving_dir).display()
    ));
    ui::rule();

    let server = DevServer::new(cwd.join(&cli.serving_dir), cli.port, output);
    server.start().await
}
