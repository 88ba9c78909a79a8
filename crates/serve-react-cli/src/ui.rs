//! Terminal output helpers: status prefixes, the startup banner, and size
//! formatting. All output goes to stderr so the served app's own stdout
//! stays clean when piped.

use owo_colors::OwoColorize;

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!("{} {}", "✓".green().bold(), message);
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!("{} {}", "ℹ".blue().bold(), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

/// Print the startup banner line.
pub fn banner(message: &str) {
    eprintln!("{}", message.magenta().bold());
}

/// Print a horizontal rule framing the serving summary.
pub fn rule() {
    eprintln!("{}", "─".repeat(66).cyan());
}

/// Format file size in human-readable form (B, KB, MB, GB).
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size as u64, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR, falls back to terminal detection.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Initialize color support based on environment.
///
/// owo-colors respects NO_COLOR and terminal capabilities on its own; this
/// hook exists for explicit initialization and future extensibility.
pub fn init_colors() {
    let _ = should_use_color();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages_do_not_panic() {
        success("Success message");
        info("Info message");
        warning("Warning message");
        error("Error message");
        banner("Banner");
        rule();
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1_048_576), "1.00 MB");
    }
}
