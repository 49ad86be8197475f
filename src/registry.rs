//! Resource registry
//!
//! The registry owns the element tree built from the `resources` section of the configuration.
//! It is built once at start up and only read afterwards, so it may be shared freely between
//! request handlers, e.g. behind an [Arc](std::sync::Arc).

use crate::element::{Element, PathSegment, ResourceKind};
use crate::error::ConfigError;
use crate::schema::{SchemaDialect, DATASETS_KEY};
use crate::visitor::{ResourcePaths, ResourceSummary};

use serde_json::Value;

/// Read-only view of the configured resources
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceRegistry {
    /// Dialect the resources were loaded with.
    dialect: SchemaDialect,

    /// Root of the element tree.
    root: Element,
}

impl ResourceRegistry {
    /// Validate a `resources` document and build a registry from it.
    ///
    /// # Arguments
    ///
    /// * `dialect`: Dialect used to validate and tag the document
    /// * `resources`: The decoded `resources` section of the configuration
    pub fn build(dialect: SchemaDialect, resources: Value) -> Result<Self, ConfigError> {
        let root = dialect.load(resources)?;
        Ok(Self { dialect, root })
    }

    pub fn dialect(&self) -> SchemaDialect {
        self.dialect
    }

    /// Root of the element tree.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// See [Element::gets].
    pub fn gets(&self, path: &[PathSegment]) -> Result<&Element, ConfigError> {
        self.root.gets(path)
    }

    /// See [Element::has].
    pub fn has(&self, path: &[PathSegment]) -> bool {
        self.root.has(path)
    }

    /// Return the group of `kind` resources, for a dataset if given.
    ///
    /// Where the group lives depends on the dialect, see [SchemaDialect::group_paths]. The first
    /// candidate holding a group of the right kind is returned.
    pub fn group(&self, kind: ResourceKind, dataset: Option<&str>) -> Result<&Element, ConfigError> {
        let not_found = || ConfigError::ResourceNotFound {
            kind,
            dataset: dataset.map(str::to_string),
        };
        self.dialect
            .group_paths(kind, dataset)
            .iter()
            .find_map(|path| {
                self.root
                    .gets(path)
                    .ok()
                    .filter(|group| group.kind() == Some(kind))
            })
            .ok_or_else(not_found)
    }

    /// Return a named entry of a resource group, e.g. the path of an alpha diversity metric.
    pub fn resource(
        &self,
        kind: ResourceKind,
        dataset: Option<&str>,
        name: &str,
    ) -> Result<&Element, ConfigError> {
        self.group(kind, dataset)?.gets(&[PathSegment::from(name)])
    }

    /// Names of the configured datasets.
    pub fn datasets(&self) -> Vec<&str> {
        self.root
            .gets(&[PathSegment::from(DATASETS_KEY)])
            .ok()
            .and_then(Element::as_dict)
            .map(|datasets| {
                datasets
                    .keys()
                    .filter(|name| *name != ResourceKind::Metadata.keyword())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of resource groups of each kind.
    pub fn summary(&self) -> ResourceSummary {
        ResourceSummary::of(&self.root)
    }

    /// Every file path referenced by the resources.
    pub fn paths(&self) -> Vec<(ResourceKind, String)> {
        ResourcePaths::of(&self.root).paths
    }
}
