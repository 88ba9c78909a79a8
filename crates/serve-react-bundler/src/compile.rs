//! The compile pass: one Rolldown invocation, output captured in memory.
//!
//! Bundler failures are not propagated as hard errors; they are converted
//! into the report's diagnostics list so the caller has exactly one signal
//! to inspect. A non-empty diagnostics list means the build failed. Hard
//! `Err` is reserved for invoker-level faults.

use crate::config::BundleConfig;
use crate::diagnostics::{self, Diagnostic, DiagnosticSeverity};
use crate::memory::{BUNDLE_PATH, MemoryOutput};
use crate::Result;
use rolldown::BundlerBuilder;
use rolldown_common::Output;
use tracing::debug;

/// Outcome of one compile pass.
///
/// The compiled artifacts themselves live in the [`MemoryOutput`] passed to
/// [`compile`]; the report carries everything the caller prints.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Error diagnostics. Non-empty means the build failed; this list is the
    /// sole source of truth for that decision.
    pub diagnostics: Vec<Diagnostic>,
    /// Warning diagnostics; informational, never abort the pipeline.
    pub warnings: Vec<Diagnostic>,
    /// URL paths of the stored artifacts.
    pub artifacts: Vec<String>,
    /// Size of the entry bundle in bytes.
    pub bundle_bytes: usize,
}

impl BuildReport {
    fn from_failure(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            diagnostics,
            ..Default::default()
        }
    }

    /// Whether the build failed.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Render the full textual report: every error and warning diagnostic,
    /// in the order the bundler produced them.
    pub fn render(&self) -> String {
        let mut sections = Vec::new();

        for diag in &self.diagnostics {
            sections.push(diag.to_string());
        }
        for diag in &self.warnings {
            sections.push(diag.to_string());
        }

        if sections.is_empty() {
            sections.push(format!(
                "compiled {} artifact(s): {}",
                self.artifacts.len(),
                self.artifacts.join(", ")
            ));
        }

        sections.join("\n\n")
    }
}

/// Compile the configured entry once, writing artifacts into `output`.
///
/// The entry chunk is stored at [`BUNDLE_PATH`]; any other chunks and
/// emitted assets keep their bundler-assigned filenames. On bundler failure
/// the store is left untouched and the failure is returned as report
/// diagnostics. One attempt per invocation; no retry.
pub async fn compile(config: &BundleConfig, output: &MemoryOutput) -> Result<BuildReport> {
    debug!(entry = %config.entry.display(), "starting bundler");

    let mut bundler = match BundlerBuilder::default()
        .with_options(config.to_bundler_options())
        .with_plugins(config.plugins())
        .build()
    {
        Ok(bundler) => bundler,
        Err(e) => return Ok(BuildReport::from_failure(diagnostics::extract_from_rolldown_error(&e))),
    };

    let bundle = match bundler.generate().await {
        Ok(bundle) => bundle,
        Err(e) => return Ok(BuildReport::from_failure(diagnostics::extract_from_rolldown_error(&e))),
    };

    let mut report = BuildReport::default();

    for warning in &bundle.warnings {
        report.warnings.extend(
            diagnostics::extract_from_rolldown_error(warning)
                .into_iter()
                .map(|mut d| {
                    d.severity = DiagnosticSeverity::Warning;
                    d
                }),
        );
    }

    let mut entry_stored = false;
    for item in &bundle.assets {
        match item {
            Output::Chunk(chunk) => {
                // The first entry chunk becomes /bundle.js; a single-entry
                // build without splitting produces exactly one.
                let path = if chunk.is_entry && !entry_stored {
                    entry_stored = true;
                    report.bundle_bytes = chunk.code.len();
                    BUNDLE_PATH.to_string()
                } else {
                    format!("/{}", chunk.filename)
                };
                output.insert(
                    path.clone(),
                    chunk.code.clone().into_bytes(),
                    content_type_for(&path),
                );
                report.artifacts.push(path);
            }
            Output::Asset(asset) => {
                let path = format!("/{}", asset.filename);
                output.insert(
                    path.clone(),
                    asset.source.as_bytes().to_vec(),
                    content_type_for(&path),
                );
                report.artifacts.push(path);
            }
        }
    }

    report.artifacts.sort();
    debug!(
        artifacts = report.artifacts.len(),
        bundle_bytes = report.bundle_bytes,
        "bundler finished"
    );

    Ok(report)
}

/// Determine MIME type from an artifact path.
fn content_type_for(path: &str) -> &'static str {
    let extension = std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    match extension {
        "js" | "mjs" => "application/javascript",
        "json" | "map" => "application/json",
        "css" => "text/css",
        "html" => "text/html; charset=utf-8",
        "wasm" => "application/wasm",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Language;
    use crate::diagnostics::DiagnosticKind;

    fn error_diag(message: &str) -> Diagnostic {
        Diagnostic {
            kind: DiagnosticKind::Other("BuildError".to_string()),
            severity: DiagnosticSeverity::Error,
            message: message.to_string(),
            file: None,
            help: None,
        }
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("/bundle.js"), "application/javascript");
        assert_eq!(content_type_for("/bundle.js.map"), "application/json");
        assert_eq!(content_type_for("/styles.css"), "text/css");
        assert_eq!(content_type_for("/logo.png"), "image/png");
        assert_eq!(content_type_for("/unknown.bin"), "application/octet-stream");
    }

    #[test]
    fn test_report_has_errors() {
        let ok = BuildReport::default();
        assert!(!ok.has_errors());

        let failed = BuildReport::from_failure(vec![error_diag("boom")]);
        assert!(failed.has_errors());
    }

    #[test]
    fn test_render_lists_artifacts_when_clean() {
        let report = BuildReport {
            artifacts: vec!["/bundle.js".to_string()],
            bundle_bytes: 42,
            ..Default::default()
        };
        let rendered = report.render();
        assert!(rendered.contains("compiled 1 artifact(s)"));
        assert!(rendered.contains("/bundle.js"));
    }

    #[test]
    fn test_render_prints_every_diagnostic() {
        let report = BuildReport::from_failure(vec![error_diag("first"), error_diag("second")]);
        let rendered = report.render();
        assert!(rendered.contains("first"));
        assert!(rendered.contains("second"));
    }

    #[tokio::test]
    async fn test_missing_entry_yields_diagnostics_and_empty_store() {
        let temp = tempfile::tempdir().unwrap();
        let config = BundleConfig::new(
            temp.path(),
            temp.path().join("index.tsx"),
            Language::TypeScript,
        );
        let output = MemoryOutput::new();

        let report = compile(&config, &output).await.unwrap();

        assert!(report.has_errors());
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_valid_entry_populates_bundle_path() {
        let temp = tempfile::tempdir().unwrap();
        let entry = temp.path().join("index.js");
        std::fs::write(&entry, "const answer = 42;\nconsole.log(answer);\n").unwrap();

        let config = BundleConfig::new(temp.path(), &entry, Language::Plain);
        let output = MemoryOutput::new();

        let report = compile(&config, &output).await.unwrap();

        assert!(!report.has_errors(), "report: {}", report.render());
        let (content, content_type) = output.get(BUNDLE_PATH).unwrap();
        assert!(!content.is_empty());
        assert_eq!(content_type, "application/javascript");
        assert!(report.artifacts.contains(&BUNDLE_PATH.to_string()));
        assert_eq!(report.bundle_bytes, content.len());
    }
}
