//! serve-react - zero-config bundling dev server.
//!
//! Entry point: parse arguments, initialize logging and colors, run the
//! serve pipeline, and convert failures into miette diagnostics.

use serve_react_cli::cli::{self, ParseOutcome};
use serve_react_cli::{error, logger, serve, ui};

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = match cli::parse_args() {
        ParseOutcome::Run(cli) => *cli,
        ParseOutcome::MissingServingDir => {
            // Guidance, not a failure: exit status stays 0.
            ui::error(cli::MISSING_SERVING_DIR_USAGE);
            return Ok(());
        }
        ParseOutcome::Exit(err) => err.exit(),
    };

    logger::init_logger(cli.verbose, cli.quiet, cli.no_color);
    ui::init_colors();

    serve::execute(cli).await.map_err(error::cli_error_to_miette)
}
