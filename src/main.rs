//! orgaudit CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use orgaudit::cli::display::output;
use orgaudit::cli::{handle_error, Cli};
use orgaudit::infrastructure::config::ConfigLoader;
use orgaudit::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            handle_error(&err, cli.json);
            return ExitCode::FAILURE;
        }
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => Some(logger),
        Err(err) => {
            eprintln!("Warning: logging disabled: {err:#}");
            None
        }
    };

    match orgaudit::cli::commands::report::execute(&cli, config).await {
        Ok(report) => {
            output(&report, cli.json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            handle_error(&err, cli.json);
            ExitCode::FAILURE
        }
    }
}
