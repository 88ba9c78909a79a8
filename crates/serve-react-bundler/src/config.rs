//! Build configuration for the dev-server compile pass.
//!
//! [`BundleConfig`] is produced once from the parsed CLI options and consumed
//! once by [`crate::compile`]. The two [`Language`] variants differ only in
//! which loader set is attached and which resolution extensions are tried
//! first; both target the same in-memory output path.

use crate::jsx_loader::JsxLoaderPlugin;
use path_clean::PathClean;
use rolldown::{BundlerOptions, InputItem, IsExternal, OutputFormat, Platform, ResolveOptions, SourceMapType};
use rolldown_plugin::__inner::SharedPluginable;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Source language variant the app is compiled as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// Plain JavaScript; `.js` modules are loaded as JSX so React code in
    /// plain files compiles.
    Plain,
    /// TypeScript; `.ts`/`.tsx` modules use the bundler's native handling.
    TypeScript,
}

impl Language {
    /// Extension used for the conventional `index.<ext>` entry file.
    pub fn default_entry_ext(self) -> &'static str {
        match self {
            Language::Plain => "js",
            Language::TypeScript => "tsx",
        }
    }
}

/// Configuration for one compile pass.
#[derive(Debug, Clone)]
pub struct BundleConfig {
    /// Directory holding the app's static assets (and, by convention, the
    /// entry file).
    pub serving_dir: PathBuf,
    /// Absolute path of the entry file the bundler starts from.
    pub entry: PathBuf,
    /// Language variant, selecting the loader set.
    pub language: Language,
}

impl BundleConfig {
    /// Create a new config. The entry path is cleaned of redundant
    /// `.` / `..` segments. No existence check is performed; a missing
    /// file surfaces later as a bundler diagnostic.
    pub fn new(
        serving_dir: impl AsRef<Path>,
        entry: impl AsRef<Path>,
        language: Language,
    ) -> Self {
        Self {
            serving_dir: serving_dir.as_ref().to_path_buf(),
            entry: entry.as_ref().to_path_buf().clean(),
            language,
        }
    }

    /// Map this config onto Rolldown bundler options.
    pub(crate) fn to_bundler_options(&self) -> BundlerOptions {
        let mut options = BundlerOptions {
            format: Some(OutputFormat::Iife),
            // Inline maps: the entry chunk is renamed when stored, so an
            // external .map reference would dangle.
            sourcemap: Some(SourceMapType::Inline),
            platform: Some(Platform::Browser),
            ..Default::default()
        };

        options.input = Some(vec![InputItem {
            name: Some("bundle".to_string()),
            import: self.entry.to_string_lossy().into_owned(),
        }]);

        // Bundle everything: no externals in a self-contained dev bundle.
        options.external = Some(IsExternal::from(vec![]));
        options.resolve = Some(self.resolve_options());

        options
    }

    /// Module resolution options; the extension order is the only part that
    /// varies between language variants.
    fn resolve_options(&self) -> ResolveOptions {
        let extensions = match self.language {
            Language::Plain => vec![".js", ".jsx", ".mjs", ".json"],
            Language::TypeScript => vec![".tsx", ".ts", ".js", ".json"],
        };

        ResolveOptions {
            extensions: Some(extensions.into_iter().map(String::from).collect()),
            main_fields: Some(vec![
                "browser".to_string(),
                "module".to_string(),
                "main".to_string(),
            ]),
            modules: Some(vec!["node_modules".to_string()]),
            symlinks: Some(true),
            ..Default::default()
        }
    }

    /// Plugins attached for this language variant.
    pub(crate) fn plugins(&self) -> Vec<SharedPluginable> {
        match self.language {
            Language::Plain => vec![Arc::new(JsxLoaderPlugin::new())],
            Language::TypeScript => Vec::new(),
        }
    }
}
