//! This file defines the microsetta-config binary entry point.
//!
//! Loads and validates the server configuration, exiting with a failure status if it cannot be
//! loaded.

use microsetta_config::cli;
use microsetta_config::config::ServerConfig;
use microsetta_config::error;
use microsetta_config::tracing;

use std::process::ExitCode;

/// Application entry point
fn main() -> ExitCode {
    let args = cli::parse();
    tracing::init_tracing();
    let config = match ServerConfig::from_args(&args) {
        Ok(config) => config,
        Err(err) => {
            error::report(&err);
            return ExitCode::FAILURE;
        }
    };
    if args.print {
        match serde_json::to_string_pretty(&config.resources.root().to_value()) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                error::report(&err);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
