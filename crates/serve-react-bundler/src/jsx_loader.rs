//! JSX load hook for plain-JavaScript React apps.
//!
//! React projects that predate TypeScript conventionally keep JSX in `.js`
//! files, which Rolldown parses as plain JavaScript. This plugin loads `.js`
//! sources itself and tags them [`ModuleType::Jsx`] so the JSX transform
//! runs. Dependencies under `node_modules` are left to the default loader;
//! shipped packages are plain JavaScript.

use anyhow::Context;
use rolldown_common::ModuleType;
use rolldown_plugin::{HookLoadArgs, HookLoadOutput, HookLoadReturn, Plugin, PluginContext};
use std::borrow::Cow;
use std::path::Path;

/// Plugin that loads application `.js` modules as JSX.
#[derive(Debug, Clone, Default)]
pub struct JsxLoaderPlugin;

impl JsxLoaderPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for JsxLoaderPlugin {
    fn name(&self) -> Cow<'static, str> {
        "serve-react-jsx-loader".into()
    }

    fn register_hook_usage(&self) -> rolldown_plugin::HookUsage {
        rolldown_plugin::HookUsage::Load
    }

    /// Load hook - serves `.js` application sources tagged as JSX.
    ///
    /// Anything that is not an on-disk `.js` application module is left to
    /// Rolldown's default loader by returning `None`.
    fn load(
        &self,
        _ctx: &PluginContext,
        args: &HookLoadArgs<'_>,
    ) -> impl std::future::Future<Output = HookLoadReturn> + Send {
        let id = args.id.to_string();

        async move {
            if !claims(&id) {
                return Ok(None);
            }

            let content = tokio::fs::read(Path::new(&id))
                .await
                .with_context(|| format!("Failed to read module: {}", id))?;

            let source = String::from_utf8(content)
                .with_context(|| format!("Module {} contains invalid UTF-8", id))?;

            Ok(Some(HookLoadOutput {
                code: source.into(),
                module_type: Some(ModuleType::Jsx),
                ..Default::default()
            }))
        }
    }
}

/// Whether this plugin should load the module with the given id.
fn claims(id: &str) -> bool {
    let path = Path::new(id);

    if path.extension().and_then(|e| e.to_str()) != Some("js") {
        return false;
    }

    // Virtual modules (e.g. rolldown runtime helpers) have no real file.
    if !path.is_absolute() {
        return false;
    }

    !id.contains("node_modules")
}
