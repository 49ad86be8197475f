//! This crate provides the configuration core of the Microsetta public API, a read-only REST API
//! serving precomputed microbiome study artifacts: alpha diversity values, taxonomy summaries,
//! PCoA coordinates and sample metadata.
//!
//! The API is a thin layer over data files referenced by a JSON configuration document. This
//! crate loads that document, validates its `resources` section against a JSON Schema and
//! normalises it into a tree of typed [elements](element::Element), exposed to data access code
//! through a read-only [ResourceRegistry](registry::ResourceRegistry).
//!
//! The `resources` layout has changed over time, so several [dialects](schema::SchemaDialect)
//! are accepted, including one that allows the old and new layouts side by side.
//!
//! The configuration core is built on top of a number of open source components.
//!
//! * [Serde](serde) and [serde_json] decode the configuration document.
//! * [jsonschema] validates it.
//! * [Clap](clap) parses the command line and environment.
//! * [Tracing](tracing) provides logging.

pub mod cli;
pub mod config;
pub mod element;
pub mod error;
pub mod registry;
pub mod schema;
pub mod tracing;
pub mod visitor;
