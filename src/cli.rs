//! Command Line Interface (CLI) arguments.

use crate::schema::SchemaDialect;

use clap::Parser;

/// Microsetta configuration command line interface
#[derive(Clone, Debug, Parser)]
pub struct CommandLineArgs {
    /// Path to the JSON configuration file
    #[arg(long, default_value = "server_config.json", env = "MPUBAPI_CFG")]
    pub config_file: String,
    /// Directory against which a relative configuration file path is resolved
    #[arg(long, env = "MPUBAPI_CFG_DIR")]
    pub config_dir: Option<String>,
    /// Layout of the `resources` section of the configuration
    #[arg(long, value_enum, default_value_t = SchemaDialect::Compatibility, env = "MPUBAPI_SCHEMA")]
    pub schema: SchemaDialect,
    /// Whether to check that every referenced resource file exists.
    #[arg(long, default_value_t = false, env = "MPUBAPI_CHECK_PATHS")]
    pub check_paths: bool,
    /// Whether to print the loaded resources as JSON.
    #[arg(long, default_value_t = false, env = "MPUBAPI_PRINT")]
    pub print: bool,
}

/// Returns parsed command line arguments.
pub fn parse() -> CommandLineArgs {
    CommandLineArgs::parse()
}
