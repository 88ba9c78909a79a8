//! Command-line interface definition for serve-react.
//!
//! A single command, defined with clap v4's derive macros: a required
//! serving-directory positional plus a handful of options. Parsing returns a
//! discriminated [`ParseOutcome`] so the missing-serving-directory case is a
//! value the startup routine consumes directly, not a shared mutable slot
//! checked after the fact.

use clap::Parser;
use serve_react_bundler::Language;
use std::ffi::OsString;
use std::path::PathBuf;

/// serve-react - zero-config dev server for React single-page apps
#[derive(Parser, Debug)]
#[command(
    name = "serve-react",
    version,
    about = "Bundle a React app and serve it with its static assets over local HTTP",
    long_about = "serve-react bundles a single-page app's entry file in memory and serves\n\
                  the bundle (/bundle.js) alongside the static assets in the serving\n\
                  directory. Zero configuration: point it at a directory and go."
)]
pub struct Cli {
    /// Directory containing the app's static assets (index.html, styles.css, ...)
    ///
    /// By convention the bundle entry file also lives here, as index.js
    /// (or index.tsx with --typescript).
    #[arg(value_name = "SERVING_DIR")]
    pub serving_dir: String,

    /// Port for the dev server
    #[arg(short, long, default_value = "8001", value_name = "PORT")]
    pub port: u16,

    /// Entry file for the bundler, relative to the current directory
    ///
    /// Overrides the index.{js,tsx} convention.
    #[arg(short, long, value_name = "PATH")]
    pub entry: Option<PathBuf>,

    /// Compile as TypeScript
    ///
    /// Switches the bundler to the TypeScript configuration and the default
    /// entry file to index.tsx.
    #[arg(short, long)]
    pub typescript: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Language variant selected by the flags.
    pub fn language(&self) -> Language {
        if self.typescript {
            Language::TypeScript
        } else {
            Language::Plain
        }
    }
}

/// Result of parsing the command line.
#[derive(Debug)]
pub enum ParseOutcome {
    /// Arguments parsed; run the pipeline.
    Run(Box<Cli>),
    /// No serving directory was given; print usage and exit cleanly.
    MissingServingDir,
    /// clap wants to handle this itself (help, version, bad flag values).
    Exit(clap::Error),
}

/// Usage message printed when no serving directory is given. Names both
/// inputs the tool needs.
pub const MISSING_SERVING_DIR_USAGE: &str = "No serving directory specified!

serve-react needs to know two things:

1) Serving directory. This is where your static assets are
   (index.html, styles.css, ...).
     ex: serve-react static

2) Entry file for the bundler. serve-react looks for an index.{js,tsx}
   file in the serving directory when no file is given.
     ex: serve-react static -e src/index.js
";

/// Parse the process arguments.
pub fn parse_args() -> ParseOutcome {
    parse_from(std::env::args_os())
}

/// Parse from an explicit argument list.
pub fn parse_from<I, T>(args: I) -> ParseOutcome
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => ParseOutcome::Run(Box::new(cli)),
        Err(err) if err.kind() == clap::error::ErrorKind::MissingRequiredArgument => {
            ParseOutcome::MissingServingDir
        }
        Err(err) => ParseOutcome::Exit(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(args: &[&str]) -> Cli {
        match parse_from(args) {
            ParseOutcome::Run(cli) => *cli,
            other => panic!("expected successful parse, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_serving_dir() {
        assert!(matches!(
            parse_from(["serve-react"]),
            ParseOutcome::MissingServingDir
        ));
    }

    #[test]
    fn test_defaults() {
        let cli = parse_ok(&["serve-react", "public"]);
        assert_eq!(cli.serving_dir, "public");
        assert_eq!(cli.port, 8001);
        assert!(cli.entry.is_none());
        assert!(!cli.typescript);
        assert_eq!(cli.language(), Language::Plain);
    }

    #[test]
    fn test_all_options() {
        let cli = parse_ok(&[
            "serve-react",
            "public",
            "-p",
            "3000",
            "-e",
            "src/main.js",
            "-t",
        ]);
        assert_eq!(cli.port, 3000);
        assert_eq!(cli.entry, Some(PathBuf::from("src/main.js")));
        assert!(cli.typescript);
        assert_eq!(cli.language(), Language::TypeScript);
    }

    #[test]
    fn test_long_options() {
        let cli = parse_ok(&[
            "serve-react",
            "static",
            "--port",
            "9000",
            "--typescript",
            "--quiet",
            "--no-color",
        ]);
        assert_eq!(cli.port, 9000);
        assert!(cli.quiet);
        assert!(cli.no_color);
    }

    #[test]
    fn test_verbose_quiet_conflict() {
        assert!(matches!(
            parse_from(["serve-react", "public", "-v", "-q"]),
            ParseOutcome::Exit(_)
        ));
    }

    #[test]
    fn test_help_is_clap_exit() {
        assert!(matches!(
            parse_from(["serve-react", "--help"]),
            ParseOutcome::Exit(_)
        ));
    }

    #[test]
    fn test_usage_message_names_both_inputs() {
        assert!(MISSING_SERVING_DIR_USAGE.contains("Serving directory"));
        assert!(MISSING_SERVING_DIR_USAGE.contains("Entry file"));
    }
}
