//! Logging setup on the `tracing` ecosystem.
//!
//! Verbosity is driven by the CLI flags, with `RUST_LOG` as the escape
//! hatch: `--verbose` raises our crates to debug, `--quiet` drops to errors
//! only, and the default is info for our crates.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("serve_react_cli=debug,serve_react_bundler=debug")
    } else if quiet {
        EnvFilter::new("serve_react_cli=error,serve_react_bundler=error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("serve_react_cli=info,serve_react_bundler=info"))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
