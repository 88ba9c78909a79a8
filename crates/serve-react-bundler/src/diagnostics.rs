//! Diagnostic extraction from Rolldown errors.
//!
//! Rolldown reports failures through its own error types; this module turns
//! them into a stable, cloneable diagnostic shape by probing the formatted
//! failure value. The indirection insulates the rest of the crate from
//! upstream API changes, and means a non-empty diagnostics list is the only
//! signal the CLI ever consults for "the build failed".

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single diagnostic extracted from the bundler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: DiagnosticSeverity,
    pub message: String,
    /// Source file the diagnostic points at, when one could be recovered.
    pub file: Option<String>,
    /// Suggested fix, when one could be recovered.
    pub help: Option<String>,
}

/// Diagnostic kind (mirrors Rolldown's event kinds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    ParseError,
    UnresolvedEntry,
    UnresolvedImport,
    MissingExport,
    CircularDependency,
    Plugin,
    Other(String),
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::ParseError => write!(f, "ParseError"),
            DiagnosticKind::UnresolvedEntry => write!(f, "UnresolvedEntry"),
            DiagnosticKind::UnresolvedImport => write!(f, "UnresolvedImport"),
            DiagnosticKind::MissingExport => write!(f, "MissingExport"),
            DiagnosticKind::CircularDependency => write!(f, "CircularDependency"),
            DiagnosticKind::Plugin => write!(f, "Plugin"),
            DiagnosticKind::Other(s) => write!(f, "{}", s),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
        };
        write!(f, "{label}[{}]: {}", self.kind, self.message)?;
        if let Some(file) = &self.file {
            write!(f, "\n  --> {file}")?;
        }
        if let Some(help) = &self.help {
            write!(f, "\n  help: {help}")?;
        }
        Ok(())
    }
}

/// Extract diagnostics from a Rolldown failure value.
///
/// Rolldown batches build errors; the formatted value is split back into
/// individual diagnostics where possible. Falls back to a single diagnostic
/// wrapping the whole message.
pub fn extract_from_rolldown_error(error: &dyn fmt::Debug) -> Vec<Diagnostic> {
    let error_str = format!("{error:?}");

    if error_str.contains("BatchedBuildDiagnostic") {
        // Splitting on the per-diagnostic marker also shears off the batch
        // prefix; fragments without a message are dropped.
        let parts: Vec<&str> = error_str
            .split("BuildDiagnostic")
            .filter(|s| s.contains(':'))
            .collect();
        if parts.len() > 1 {
            return parts.into_iter().map(extract_single).collect();
        }
    }

    vec![extract_single(&error_str)]
}

/// Classify and extract one diagnostic from a formatted error string.
fn extract_single(error_str: &str) -> Diagnostic {
    let kind = classify(error_str);

    let severity = if error_str.contains("Warning") || error_str.contains("warning") {
        DiagnosticSeverity::Warning
    } else {
        DiagnosticSeverity::Error
    };

    let file = extract_file_path(error_str);
    let help = help_for(&kind);

    Diagnostic {
        kind,
        severity,
        message: error_str.trim().to_string(),
        file,
        help,
    }
}

fn classify(error_str: &str) -> DiagnosticKind {
    if error_str.contains("UnresolvedEntry")
        || error_str.contains("Cannot resolve entry")
        || error_str.contains("unresolved entry")
    {
        DiagnosticKind::UnresolvedEntry
    } else if error_str.contains("UnresolvedImport") || error_str.contains("Cannot resolve") {
        DiagnosticKind::UnresolvedImport
    } else if error_str.contains("ParseError")
        || error_str.contains("Parse error")
        || error_str.contains("Syntax")
        || error_str.contains("Expected")
    {
        DiagnosticKind::ParseError
    } else if error_str.contains("MissingExport") {
        DiagnosticKind::MissingExport
    } else if error_str.contains("CircularDependency") || error_str.contains("cycle") {
        DiagnosticKind::CircularDependency
    } else if error_str.contains("Plugin") || error_str.contains("plugin") {
        DiagnosticKind::Plugin
    } else {
        DiagnosticKind::Other("BuildError".to_string())
    }
}

/// Hints for the diagnostic kinds a dev-server user can act on directly.
fn help_for(kind: &DiagnosticKind) -> Option<String> {
    match kind {
        DiagnosticKind::UnresolvedEntry => Some(
            "Check that the entry file exists, or point at one explicitly with --entry".to_string(),
        ),
        DiagnosticKind::UnresolvedImport => {
            Some("Check the import specifier and that the package is installed".to_string())
        }
        _ => None,
    }
}

/// Recover a source file path from a formatted error message.
fn extract_file_path(text: &str) -> Option<String> {
    // Longest extensions first so ".jsx" is not truncated to ".js".
    for ext in &[".json", ".jsx", ".tsx", ".mjs", ".cjs", ".js", ".ts"] {
        if let Some(pos) = text.find(ext) {
            let before = &text[..pos + ext.len()];
            for indicator in &["in ", "at ", "file: ", "\"", "'", "`"] {
                if let Some(start) = before.rfind(indicator) {
                    let candidate = before[start + indicator.len()..]
                        .trim()
                        .trim_matches(['"', '\'', '`', '\\']);
                    if !candidate.is_empty() && !candidate.contains('\n') {
                        return Some(candidate.to_string());
                    }
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_unresolved_entry() {
        let diags =
            extract_from_rolldown_error(&"UnresolvedEntry: Cannot resolve entry module ./index.js");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::UnresolvedEntry);
        assert_eq!(diags[0].severity, DiagnosticSeverity::Error);
        assert!(diags[0].help.as_deref().unwrap().contains("--entry"));
    }

    #[test]
    fn test_classify_parse_error_with_file() {
        let diags = extract_from_rolldown_error(&"ParseError in \"src/app.jsx\": Expected ')'");
        assert_eq!(diags[0].kind, DiagnosticKind::ParseError);
        assert_eq!(diags[0].file.as_deref(), Some("src/app.jsx"));
    }

    #[test]
    fn test_classify_unknown_falls_back() {
        let diags = extract_from_rolldown_error(&"something exploded");
        assert_eq!(diags[0].kind, DiagnosticKind::Other("BuildError".to_string()));
        assert!(diags[0].help.is_none());
    }

    #[test]
    fn test_batched_errors_split() {
        let raw = "BatchedBuildDiagnostic [ BuildDiagnostic { ParseError: Expected ';' }, \
                   BuildDiagnostic { UnresolvedImport: Cannot resolve \"./missing.js\" } ]";
        let diags = extract_from_rolldown_error(&raw);
        assert!(diags.len() >= 2);
    }

    #[test]
    fn test_diagnostic_serializes_with_snake_case_kind() {
        let diag = Diagnostic {
            kind: DiagnosticKind::UnresolvedImport,
            severity: DiagnosticSeverity::Warning,
            message: "Cannot resolve \"./x\"".to_string(),
            file: None,
            help: None,
        };
        let json = serde_json::to_string(&diag).unwrap();
        assert!(json.contains("\"unresolved_import\""));
        assert!(json.contains("\"warning\""));
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic {
            kind: DiagnosticKind::UnresolvedEntry,
            severity: DiagnosticSeverity::Error,
            message: "Cannot resolve entry".to_string(),
            file: Some("public/index.tsx".to_string()),
            help: Some("Check that the entry file exists".to_string()),
        };
        let rendered = diag.to_string();
        assert!(rendered.starts_with("error[UnresolvedEntry]"));
        assert!(rendered.contains("--> public/index.tsx"));
        assert!(rendered.contains("help: Check"));
    }
}
