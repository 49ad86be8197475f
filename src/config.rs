//! Server configuration bootstrap
//!
//! The configuration is a single JSON document with a `resources` section describing where the
//! precomputed artifacts live. It is loaded once at start up; any failure is fatal and no
//! partially loaded configuration is ever returned.

use crate::cli::CommandLineArgs;
use crate::error::ConfigError;
use crate::registry::ResourceRegistry;
use crate::schema::SchemaDialect;

use expanduser::expanduser;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{event, Level};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "server_config.json";

/// Environment variable overriding the configuration file name.
pub const CONFIG_FILE_ENV: &str = "MPUBAPI_CFG";

/// Raw configuration document
#[derive(Debug, Deserialize)]
struct ConfigDocument {
    /// Resources section, validated against the active dialect
    resources: Value,
    /// Any other top level keys
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Loaded server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Registry of configured resources.
    pub resources: ResourceRegistry,

    /// Top level keys other than `resources`, unvalidated.
    pub extra: Map<String, Value>,

    /// File the configuration was read from, if any.
    pub source: Option<PathBuf>,
}

impl ServerConfig {
    /// Build a configuration from a decoded document.
    ///
    /// # Arguments
    ///
    /// * `document`: The whole configuration document. Must contain `resources`.
    /// * `dialect`: Dialect used to validate `resources`
    pub fn from_value(document: Value, dialect: SchemaDialect) -> Result<Self, ConfigError> {
        let ConfigDocument { resources, extra } =
            serde_json::from_value(document).map_err(ConfigError::MalformedDocument)?;
        let resources = ResourceRegistry::build(dialect, resources)?;
        Ok(Self {
            resources,
            extra,
            source: None,
        })
    }

    /// Parse and build a configuration from JSON text.
    pub fn parse(text: &str, dialect: SchemaDialect) -> Result<Self, ConfigError> {
        Self::from_value(serde_json::from_str(text)?, dialect)
    }

    /// Read, parse and build a configuration from a reader.
    pub fn from_reader<R: Read>(reader: R, dialect: SchemaDialect) -> Result<Self, ConfigError> {
        Self::from_value(serde_json::from_reader(reader)?, dialect)
    }

    /// Read, parse and build a configuration from a file.
    pub fn from_file(path: &Path, dialect: SchemaDialect) -> Result<Self, ConfigError> {
        event!(Level::DEBUG, "reading configuration from {}", path.display());
        let file = std::fs::File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_reader(std::io::BufReader::new(file), dialect)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Load the configuration named by the command line arguments.
    ///
    /// Optionally checks that every referenced resource file exists.
    pub fn from_args(args: &CommandLineArgs) -> Result<Self, ConfigError> {
        let path = resolve_config_path(&args.config_file, args.config_dir.as_deref())?;
        let config = Self::from_file(&path, args.schema)?;
        if args.check_paths {
            config.check_paths()?;
        }
        let summary = config.resources.summary();
        event!(
            Level::INFO,
            "loaded {} configuration from {}: {} alpha, {} taxonomy, {} pcoa, {} metadata",
            args.schema,
            path.display(),
            summary.alpha,
            summary.taxonomy,
            summary.pcoa,
            summary.metadata
        );
        Ok(config)
    }

    /// Check that every resource file referenced by the configuration exists.
    pub fn check_paths(&self) -> Result<(), ConfigError> {
        let missing: Vec<String> = self
            .resources
            .paths()
            .into_iter()
            .filter(|(kind, path)| {
                let exists = Path::new(path).exists();
                if !exists {
                    event!(Level::WARN, "{} resource file {} not found", kind, path);
                }
                !exists
            })
            .map(|(_, path)| path)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingResourceFiles { missing })
        }
    }
}

/// Resolve the configuration file path.
///
/// `~` is expanded, and relative paths are resolved against `config_dir` if given.
pub fn resolve_config_path(
    config_file: &str,
    config_dir: Option<&str>,
) -> Result<PathBuf, ConfigError> {
    let expand = |path: &str| {
        expanduser(path).map_err(|source| ConfigError::Io {
            path: PathBuf::from(path),
            source,
        })
    };
    let file = expand(config_file)?;
    match config_dir {
        Some(dir) if file.is_relative() => Ok(expand(dir)?.join(file)),
        _ => Ok(file),
    }
}
