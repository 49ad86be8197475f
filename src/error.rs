//! Error handling.

use std::error::Error;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{event, Level};

use crate::element::{PathSegment, ResourceKind};

/// Configuration error type
///
/// This type encapsulates the various errors that may occur while loading the configuration or
/// reading values from the resulting tree. Every variant is fatal when raised during start up.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error reading the configuration file
    #[error("failed to read configuration file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error deserialising the configuration document
    #[error("configuration is not valid JSON")]
    Parse(#[from] serde_json::Error),

    /// Valid JSON without the structure of a configuration document, e.g. missing `resources`
    #[error("invalid configuration document: {0}")]
    MalformedDocument(serde_json::Error),

    /// The schema document itself failed to compile
    #[error("invalid {dialect} schema: {reason}")]
    InvalidSchema {
        dialect: &'static str,
        reason: String,
    },

    /// The document does not conform to the active schema
    #[error("configuration failed {dialect} schema validation: {}", .errors.join("; "))]
    SchemaValidation {
        dialect: &'static str,
        errors: Vec<String>,
    },

    /// A value with no element representation
    #[error("no element for type: {type_name}")]
    UnsupportedType { type_name: &'static str },

    /// A domain keyword holds a value of the wrong shape for its resource kind
    #[error("value of {key} cannot hold {kind} resources")]
    UnexpectedShape { key: String, kind: ResourceKind },

    /// Path lookup failed at the given segment
    #[error("key not found: {0}")]
    KeyNotFound(PathSegment),

    /// Caller contract violation
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No resource group of the requested kind
    #[error("no {kind} resources{}", .dataset.as_ref().map(|d| format!(" for dataset {d}")).unwrap_or_default())]
    ResourceNotFound {
        kind: ResourceKind,
        dataset: Option<String>,
    },

    /// Resource files referenced by the configuration do not exist
    #[error("{} referenced resource file(s) not found: {}", .missing.len(), .missing.join(", "))]
    MissingResourceFiles { missing: Vec<String> },
}

/// Return the chain of causes of an error, outermost first, with duplicate entries removed.
pub fn causes<E>(error: &E) -> Vec<String>
where
    E: Error + ?Sized,
{
    let mut caused_by = Vec::new();
    let mut current = error.source();
    while let Some(source) = current {
        caused_by.push(source.to_string());
        current = source.source();
    }
    // Remove duplicate entries.
    caused_by.dedup();
    caused_by
}

/// Log an error and each of its causes.
pub fn report<E>(error: &E)
where
    E: Error + ?Sized,
{
    event!(Level::ERROR, "{}", error);
    for cause in causes(error) {
        event!(Level::ERROR, "Caused by: {}", cause);
    }
}
