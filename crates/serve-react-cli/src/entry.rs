//! Entry file resolution.
//!
//! An explicit `--entry` wins and is resolved against the current working
//! directory. Otherwise the conventional `index.<ext>` inside the serving
//! directory is used, with the extension following the language variant.
//! No existence check happens here; a missing file surfaces as a bundler
//! diagnostic.

use crate::cli::Cli;
use std::path::{Path, PathBuf};

/// Compute the absolute entry path for the parsed options.
pub fn resolve_entry(cli: &Cli, cwd: &Path) -> PathBuf {
    match &cli.entry {
        Some(path) => cwd.join(path),
        None => cwd.join(&cli.serving_dir).join(format!(
            "index.{}",
            cli.language().default_entry_ext()
        )),
    }
}
