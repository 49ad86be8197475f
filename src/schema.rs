//! Configuration schema dialects
//!
//! The layout of the `resources` section has changed over time. Three dialects are understood:
//!
//! * [SchemaDialect::Legacy]: resource groups at the top level, under `alpha_resources`,
//!   `table_resources`, `pcoa` and `metadata`.
//! * [SchemaDialect::Current]: resource groups nested per dataset under
//!   `datasets.<dataset>.__alpha__` and friends, with the metadata file at
//!   `datasets.__metadata__`.
//! * [SchemaDialect::Compatibility]: both of the above in one document.
//!
//! Each dialect supplies a JSON Schema for the shape it accepts and a keyword map used to tag
//! subtrees while building the [Element] tree.

use crate::element::{
    DictElement, Element, ElementFactory, ListElement, PathSegment, ResourceKind,
};
use crate::error::ConfigError;
use crate::path;

use clap::ValueEnum;
use jsonschema::Validator;
use lazy_static::lazy_static;
use serde::Deserialize;
use serde_json::{json, Value};
use strum_macros::Display;
use tracing::event;

/// Key under which per-dataset resources are nested.
pub const DATASETS_KEY: &str = "datasets";

/// A configuration layout
#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SchemaDialect {
    /// Per-dataset layout
    Current,
    /// Top-level layout
    Legacy,
    /// Either layout, or both at once
    #[default]
    Compatibility,
}

fn alpha_group_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": {
            "type": "string",
            "description": "Filepath to an alpha diversity QZA",
        },
        "description": "A group of related alpha diversity objects.",
    })
}

fn taxonomy_group_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": {
            "type": "object",
            "properties": {
                "table": {
                    "type": "string",
                    "description": "Path to a FeatureTable QZA with features indexed on taxonomy",
                },
                "feature-data-taxonomy": {
                    "type": "string",
                    "description": "Path to a FeatureData[Taxonomy] QZA",
                },
            },
            "required": ["table", "feature-data-taxonomy"],
        },
        "description": "A group of related taxonomies.",
    })
}

fn pcoa_group_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": {
            "type": "object",
            "additionalProperties": {
                "type": "string",
                "description": "Path to a PCoA QZA",
            },
        },
        "description": "A group of related PCoAs.",
    })
}

fn metadata_schema() -> Value {
    json!({
        "type": "string",
        "description": "A filepath to the metadata file.",
    })
}

fn datasets_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "__metadata__": metadata_schema(),
        },
        "additionalProperties": {
            "type": "object",
            "properties": {
                "__alpha__": alpha_group_schema(),
                "__taxonomy__": taxonomy_group_schema(),
                "__pcoa__": pcoa_group_schema(),
            },
            "additionalProperties": false,
        },
    })
}

fn current_properties() -> serde_json::Map<String, Value> {
    let mut properties = serde_json::Map::new();
    properties.insert(
        ResourceKind::Alpha.keyword().to_string(),
        alpha_group_schema(),
    );
    properties.insert(
        ResourceKind::Taxonomy.keyword().to_string(),
        taxonomy_group_schema(),
    );
    properties.insert(
        ResourceKind::Pcoa.keyword().to_string(),
        pcoa_group_schema(),
    );
    properties.insert(
        ResourceKind::Metadata.keyword().to_string(),
        metadata_schema(),
    );
    properties.insert(DATASETS_KEY.to_string(), datasets_schema());
    properties
}

fn legacy_properties() -> serde_json::Map<String, Value> {
    let mut properties = serde_json::Map::new();
    properties.insert(
        ResourceKind::Alpha.legacy_keyword().to_string(),
        alpha_group_schema(),
    );
    properties.insert(
        ResourceKind::Taxonomy.legacy_keyword().to_string(),
        taxonomy_group_schema(),
    );
    properties.insert(
        ResourceKind::Pcoa.legacy_keyword().to_string(),
        pcoa_group_schema(),
    );
    properties.insert(
        ResourceKind::Metadata.legacy_keyword().to_string(),
        metadata_schema(),
    );
    properties
}

/// Compile a dialect's schema.
fn compile(dialect: SchemaDialect) -> Result<Validator, String> {
    jsonschema::validator_for(&dialect.schema()).map_err(|err| err.to_string())
}

lazy_static! {
    // Validators are compiled once and never modified.
    static ref CURRENT_VALIDATOR: Result<Validator, String> = compile(SchemaDialect::Current);
    static ref LEGACY_VALIDATOR: Result<Validator, String> = compile(SchemaDialect::Legacy);
    static ref COMPATIBILITY_VALIDATOR: Result<Validator, String> =
        compile(SchemaDialect::Compatibility);
}

impl SchemaDialect {
    /// Lower case name of the dialect.
    pub fn name(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Legacy => "legacy",
            Self::Compatibility => "compatibility",
        }
    }

    /// Return the JSON Schema document describing the `resources` section in this dialect.
    ///
    /// Unknown top-level keys are rejected.
    pub fn schema(self) -> Value {
        let mut properties = serde_json::Map::new();
        if matches!(self, Self::Legacy | Self::Compatibility) {
            properties.extend(legacy_properties());
        }
        if matches!(self, Self::Current | Self::Compatibility) {
            properties.extend(current_properties());
        }
        json!({
            "type": "object",
            "properties": properties,
            "additionalProperties": false,
        })
    }

    /// Resource kind tagged by `key` at the top level of a document in this dialect, if any.
    pub fn element_kind(self, key: &str) -> Option<ResourceKind> {
        ResourceKind::ALL.into_iter().find(|kind| match self {
            Self::Current => key == kind.keyword(),
            Self::Legacy => key == kind.legacy_keyword(),
            Self::Compatibility => key == kind.keyword() || key == kind.legacy_keyword(),
        })
    }

    fn validator(self) -> Result<&'static Validator, ConfigError> {
        let validator = match self {
            Self::Current => &*CURRENT_VALIDATOR,
            Self::Legacy => &*LEGACY_VALIDATOR,
            Self::Compatibility => &*COMPATIBILITY_VALIDATOR,
        };
        validator.as_ref().map_err(|reason| ConfigError::InvalidSchema {
            dialect: self.name(),
            reason: reason.clone(),
        })
    }

    /// Validate a `resources` document against this dialect's schema.
    ///
    /// # Errors
    ///
    /// [ConfigError::SchemaValidation] listing every violation, each prefixed by the JSON pointer
    /// of the offending value.
    pub fn validate(self, instance: &Value) -> Result<(), ConfigError> {
        let errors: Vec<String> = self
            .validator()?
            .iter_errors(instance)
            .map(|err| {
                let location = err.instance_path.to_string();
                if location.is_empty() {
                    format!("/: {err}")
                } else {
                    format!("{location}: {err}")
                }
            })
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::SchemaValidation {
                dialect: self.name(),
                errors,
            })
        }
    }

    /// Whether this dialect nests resources per dataset under [DATASETS_KEY].
    fn nests_datasets(self) -> bool {
        self != Self::Legacy
    }

    /// Whether this dialect accepts the legacy top-level keywords.
    fn accepts_legacy(self) -> bool {
        self != Self::Current
    }

    /// Resource kind tagged by `key` at `level`, if any.
    fn kind_at(self, level: Level, key: &str) -> Option<ResourceKind> {
        match level {
            Level::Root => self.element_kind(key),
            Level::Datasets => {
                (key == ResourceKind::Metadata.keyword()).then_some(ResourceKind::Metadata)
            }
            Level::Dataset => ResourceKind::ALL
                .into_iter()
                .filter(|kind| *kind != ResourceKind::Metadata)
                .find(|kind| key == kind.keyword()),
            Level::Inner => None,
        }
    }

    /// Level of the value found under `key` at `level`.
    fn child_level(self, level: Level, key: &str) -> Level {
        match level {
            Level::Root if self.nests_datasets() && key == DATASETS_KEY => Level::Datasets,
            Level::Datasets if key != ResourceKind::Metadata.keyword() => Level::Dataset,
            _ => Level::Inner,
        }
    }

    /// Build the element tree for a document, tagging subtrees found under this dialect's
    /// keywords.
    ///
    /// Keywords are only recognised where the dialect places resource groups: at the top level,
    /// directly under [DATASETS_KEY] and directly under each dataset. Elsewhere they are plain
    /// keys, e.g. an alpha metric named `pcoa`.
    ///
    /// The tree is built bottom up: children are converted first, then a child found under a
    /// keyword is tagged with the keyword's resource kind. No validation is performed.
    ///
    /// # Errors
    ///
    /// * [ConfigError::UnexpectedShape] if a value under a keyword has the wrong type, which
    ///   validation rules out
    /// * [ConfigError::UnsupportedType] for integers beyond the range of `i64`
    pub fn make_elements(self, document: Value) -> Result<Element, ConfigError> {
        self.build(document, Level::Root)
    }

    fn build(self, document: Value, level: Level) -> Result<Element, ConfigError> {
        match document {
            Value::Array(items) => Ok(Element::List(
                items
                    .into_iter()
                    .map(|item| self.build(item, Level::Inner))
                    .collect::<Result<ListElement, ConfigError>>()?,
            )),
            Value::Object(map) => {
                let mut dict = DictElement::new();
                for (key, value) in map {
                    let mut element = self.build(value, self.child_level(level, &key))?;
                    if let Some(kind) = self.kind_at(level, &key) {
                        element = kind.wrap(&key, element)?;
                    }
                    dict.insert(key, element);
                }
                Ok(Element::Dict(dict))
            }
            scalar => ElementFactory::get_element(scalar),
        }
    }

    /// Validate a document and build its element tree.
    ///
    /// The tree is never built for a document that fails validation.
    pub fn load(self, document: Value) -> Result<Element, ConfigError> {
        self.validate(&document)?;
        event!(tracing::Level::DEBUG, "resources conform to {} schema", self);
        self.make_elements(document)
    }

    /// Candidate paths to the group of `kind` resources, optionally for a dataset, most
    /// preferred first.
    ///
    /// Without a dataset the legacy top-level keyword is preferred, then the current one. With a
    /// dataset the group lives under `datasets.<dataset>`, which the legacy layout lacks.
    /// Metadata is shared by all datasets, so it is looked up at `datasets.__metadata__` and at
    /// the top level whether or not a dataset is given.
    pub fn group_paths(self, kind: ResourceKind, dataset: Option<&str>) -> Vec<Vec<PathSegment>> {
        let top_level = |paths: &mut Vec<Vec<PathSegment>>| {
            if self.accepts_legacy() {
                paths.push(path![kind.legacy_keyword()]);
            }
            if self.nests_datasets() {
                paths.push(path![kind.keyword()]);
            }
        };
        let mut paths = Vec::new();
        match (kind, dataset) {
            (_, Some(_)) if !self.nests_datasets() => {}
            (ResourceKind::Metadata, Some(_)) => {
                paths.push(path![DATASETS_KEY, kind.keyword()]);
                top_level(&mut paths);
            }
            (ResourceKind::Metadata, None) => {
                top_level(&mut paths);
                if self.nests_datasets() {
                    paths.push(path![DATASETS_KEY, kind.keyword()]);
                }
            }
            (_, Some(dataset)) => paths.push(path![DATASETS_KEY, dataset, kind.keyword()]),
            (_, None) => top_level(&mut paths),
        }
        paths
    }
}

/// Position within a document, deciding which keywords tag resource groups
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Level {
    /// The document itself
    Root,
    /// The object under [DATASETS_KEY]
    Datasets,
    /// One dataset's object
    Dataset,
    /// Anywhere else
    Inner,
}

#[cfg(test)]
mod tests {
    use super::*;

    use regex::Regex;
    use serde_test::{assert_de_tokens, assert_de_tokens_error, Token};

    fn legacy_document() -> Value {
        json!({
            "alpha_resources": {"faith_pd": "/data/faith.qza"},
            "table_resources": {
                "greengenes": {
                    "table": "/data/gg-table.qza",
                    "feature-data-taxonomy": "/data/gg-taxonomy.qza",
                },
            },
            "pcoa": {"oral": {"unifrac": "/data/oral-unifrac.qza"}},
            "metadata": "/data/metadata.txt",
        })
    }

    fn current_document() -> Value {
        json!({
            "datasets": {
                "__metadata__": "/data/metadata.txt",
                "16SAmplicon": {
                    "__alpha__": {"faith_pd": "/data/16s-faith.qza"},
                    "__taxonomy__": {
                        "greengenes": {
                            "table": "/data/16s-table.qza",
                            "feature-data-taxonomy": "/data/16s-taxonomy.qza",
                        },
                    },
                    "__pcoa__": {"oral": {"unifrac": "/data/16s-unifrac.qza"}},
                },
                "WGS": {
                    "__alpha__": {"shannon": "/data/wgs-shannon.qza"},
                },
            },
        })
    }

    fn combined_document() -> Value {
        let mut document = legacy_document();
        document["datasets"] = current_document()["datasets"].clone();
        document
    }

    fn assert_validation_error(result: Result<(), ConfigError>, pattern: &str) {
        let re = Regex::new(pattern).unwrap();
        match result {
            Err(ConfigError::SchemaValidation { errors, .. }) => {
                assert!(errors.iter().any(|e| re.is_match(e)), "errors: {errors:?}")
            }
            other => panic!("expected schema validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_schemas_compile() {
        for dialect in [
            SchemaDialect::Current,
            SchemaDialect::Legacy,
            SchemaDialect::Compatibility,
        ] {
            dialect.validator().unwrap();
        }
    }

    #[test]
    fn test_validate_legacy() {
        SchemaDialect::Legacy.validate(&legacy_document()).unwrap();
        SchemaDialect::Compatibility
            .validate(&legacy_document())
            .unwrap();
        assert_validation_error(
            SchemaDialect::Current.validate(&legacy_document()),
            "Additional properties are not allowed",
        );
    }

    #[test]
    fn test_validate_current() {
        SchemaDialect::Current.validate(&current_document()).unwrap();
        SchemaDialect::Compatibility
            .validate(&current_document())
            .unwrap();
        assert_validation_error(
            SchemaDialect::Legacy.validate(&current_document()),
            "Additional properties are not allowed",
        );
    }

    #[test]
    fn test_validate_combined() {
        SchemaDialect::Compatibility
            .validate(&combined_document())
            .unwrap();
    }

    #[test]
    fn test_validate_empty() {
        for dialect in [
            SchemaDialect::Current,
            SchemaDialect::Legacy,
            SchemaDialect::Compatibility,
        ] {
            dialect.validate(&json!({})).unwrap();
        }
    }

    #[test]
    fn test_validate_taxonomy_requires_both_files() {
        let document = json!({"table_resources": {"greengenes": {"table": "x.qza"}}});
        assert_validation_error(
            SchemaDialect::Compatibility.validate(&document),
            r#"^/table_resources/greengenes: "feature-data-taxonomy" is a required property"#,
        );
        let document = json!({"table_resources": {"greengenes": {
            "table": "x.qza",
            "feature-data-taxonomy": "y.qza",
        }}});
        SchemaDialect::Compatibility.validate(&document).unwrap();
    }

    #[test]
    fn test_validate_alpha_must_be_strings() {
        let document = json!({"alpha_resources": {"faith_pd": 1}});
        assert_validation_error(
            SchemaDialect::Legacy.validate(&document),
            r#"^/alpha_resources/faith_pd: 1 is not of type "string""#,
        );
    }

    #[test]
    fn test_validate_unknown_dataset_keyword() {
        let document = json!({"datasets": {"16SAmplicon": {"__beta__": {}}}});
        assert_validation_error(
            SchemaDialect::Current.validate(&document),
            "^/datasets/16SAmplicon: Additional properties are not allowed",
        );
    }

    #[test]
    fn test_validate_metadata_must_be_string() {
        let document = json!({"datasets": {"__metadata__": {"path": "x"}}});
        assert_validation_error(
            SchemaDialect::Compatibility.validate(&document),
            "^/datasets/__metadata__: .* is not of type \"string\"",
        );
    }

    #[test]
    fn test_validate_unknown_top_level_key() {
        let document = json!({"resources": "not-an-object"});
        assert_validation_error(
            SchemaDialect::Compatibility.validate(&document),
            "^/: Additional properties are not allowed",
        );
    }

    #[test]
    fn test_validate_not_an_object() {
        assert_validation_error(
            SchemaDialect::Legacy.validate(&json!(["alpha_resources"])),
            r#"is not of type "object""#,
        );
    }

    #[test]
    fn test_element_kind() {
        assert_eq!(
            Some(ResourceKind::Alpha),
            SchemaDialect::Current.element_kind("__alpha__")
        );
        assert_eq!(None, SchemaDialect::Current.element_kind("alpha_resources"));
        assert_eq!(
            Some(ResourceKind::Taxonomy),
            SchemaDialect::Legacy.element_kind("table_resources")
        );
        assert_eq!(None, SchemaDialect::Legacy.element_kind("__taxonomy__"));
        assert_eq!(
            Some(ResourceKind::Pcoa),
            SchemaDialect::Compatibility.element_kind("pcoa")
        );
        assert_eq!(
            Some(ResourceKind::Pcoa),
            SchemaDialect::Compatibility.element_kind("__pcoa__")
        );
        assert_eq!(
            Some(ResourceKind::Metadata),
            SchemaDialect::Compatibility.element_kind("metadata")
        );
        assert_eq!(None, SchemaDialect::Compatibility.element_kind("datasets"));
    }

    #[test]
    fn test_make_elements_legacy() {
        let tree = SchemaDialect::Compatibility
            .make_elements(legacy_document())
            .unwrap();
        assert!(matches!(tree, Element::Dict(_)));
        let alpha = tree.gets(&path!["alpha_resources"]).unwrap();
        assert_eq!(Some(ResourceKind::Alpha), alpha.kind());
        assert_eq!(
            Some("/data/faith.qza"),
            tree.gets(&path!["alpha_resources", "faith_pd"])
                .unwrap()
                .as_str()
        );
        assert_eq!(
            Some(ResourceKind::Taxonomy),
            tree.gets(&path!["table_resources"]).unwrap().kind()
        );
        // Entries within a group are not tagged themselves.
        assert_eq!(
            None,
            tree.gets(&path!["table_resources", "greengenes"])
                .unwrap()
                .kind()
        );
        assert_eq!(
            Some(ResourceKind::Pcoa),
            tree.gets(&path!["pcoa"]).unwrap().kind()
        );
        assert_eq!(
            Element::Metadata("/data/metadata.txt".to_string()),
            *tree.gets(&path!["metadata"]).unwrap()
        );
    }

    #[test]
    fn test_make_elements_current() {
        let tree = SchemaDialect::Current
            .make_elements(current_document())
            .unwrap();
        assert_eq!(
            Some(ResourceKind::Alpha),
            tree.gets(&path!["datasets", "16SAmplicon", "__alpha__"])
                .unwrap()
                .kind()
        );
        assert_eq!(
            Some("/data/16s-unifrac.qza"),
            tree.gets(&path!["datasets", "16SAmplicon", "__pcoa__", "oral", "unifrac"])
                .unwrap()
                .as_str()
        );
        assert_eq!(
            Some(ResourceKind::Metadata),
            tree.gets(&path!["datasets", "__metadata__"]).unwrap().kind()
        );
        assert_eq!(None, tree.gets(&path!["datasets"]).unwrap().kind());
    }

    #[test]
    fn test_make_elements_dialect_keywords() {
        // Legacy keywords are plain keys in the current dialect and vice versa.
        let tree = SchemaDialect::Current
            .make_elements(legacy_document())
            .unwrap();
        assert_eq!(None, tree.gets(&path!["alpha_resources"]).unwrap().kind());
        let tree = SchemaDialect::Legacy
            .make_elements(current_document())
            .unwrap();
        assert_eq!(
            None,
            tree.gets(&path!["datasets", "WGS", "__alpha__"])
                .unwrap()
                .kind()
        );
    }

    #[test]
    fn test_make_elements_lists() {
        let tree = SchemaDialect::Legacy
            .make_elements(json!([{"metadata": "/data/a.txt"}, [true, 1]]))
            .unwrap();
        assert_eq!(None, tree.gets(&path![0_usize, "metadata"]).unwrap().kind());
        assert_eq!(
            Some(true),
            tree.gets(&path![1_usize, 0_usize]).unwrap().as_bool()
        );
        assert_eq!(Some(1), tree.gets(&path![1_usize, 1_usize]).unwrap().as_i64());
    }

    #[test]
    fn test_make_elements_top_level_current_keywords() {
        let document = json!({
            "__alpha__": {"faith_pd": "/data/faith.qza"},
            "__metadata__": "/data/metadata.txt",
        });
        for dialect in [SchemaDialect::Current, SchemaDialect::Compatibility] {
            let tree = dialect.load(document.clone()).unwrap();
            assert_eq!(
                Some(ResourceKind::Alpha),
                tree.gets(&path!["__alpha__"]).unwrap().kind()
            );
            assert_eq!(
                Element::Metadata("/data/metadata.txt".to_string()),
                *tree.gets(&path!["__metadata__"]).unwrap()
            );
        }
        assert_validation_error(
            SchemaDialect::Legacy.validate(&document),
            "^/: Additional properties are not allowed",
        );
    }

    #[test]
    fn test_make_elements_keywords_as_plain_names() {
        // An alpha metric named like a legacy keyword.
        let tree = SchemaDialect::Compatibility
            .load(json!({"alpha_resources": {
                "pcoa": "/data/pcoa-metric.qza",
                "metadata": "/data/metadata-metric.qza",
            }}))
            .unwrap();
        assert_eq!(
            Some("/data/pcoa-metric.qza"),
            tree.gets(&path!["alpha_resources", "pcoa"]).unwrap().as_str()
        );
        assert_eq!(
            None,
            tree.gets(&path!["alpha_resources", "metadata"]).unwrap().kind()
        );
        // A dataset named like a legacy keyword.
        let tree = SchemaDialect::Compatibility
            .load(json!({"datasets": {"metadata": {"__alpha__": {"a": "/a.qza"}}}}))
            .unwrap();
        assert_eq!(
            None,
            tree.gets(&path!["datasets", "metadata"]).unwrap().kind()
        );
        assert_eq!(
            Some(ResourceKind::Alpha),
            tree.gets(&path!["datasets", "metadata", "__alpha__"])
                .unwrap()
                .kind()
        );
        // Current keywords nested inside a group are plain names too.
        let tree = SchemaDialect::Current
            .load(json!({"datasets": {"WGS": {"__pcoa__": {
                "__alpha__": {"unifrac": "/data/unifrac.qza"},
            }}}}))
            .unwrap();
        assert_eq!(
            None,
            tree.gets(&path!["datasets", "WGS", "__pcoa__", "__alpha__"])
                .unwrap()
                .kind()
        );
    }

    #[test]
    fn test_make_elements_wrong_shape() {
        let result = SchemaDialect::Legacy.make_elements(json!({"alpha_resources": "x"}));
        assert!(matches!(
            result,
            Err(ConfigError::UnexpectedShape { kind: ResourceKind::Alpha, .. })
        ));
    }

    #[test]
    fn test_load_aborts_on_invalid() {
        let result = SchemaDialect::Compatibility.load(json!({"metadata": 1}));
        assert!(matches!(result, Err(ConfigError::SchemaValidation { .. })));
        // Validation runs first, so shape errors are never reached.
        let result = SchemaDialect::Legacy.load(json!({"alpha_resources": "x"}));
        assert!(matches!(result, Err(ConfigError::SchemaValidation { .. })));
    }

    #[test]
    fn test_load_combined() {
        let tree = SchemaDialect::Compatibility
            .load(combined_document())
            .unwrap();
        assert_eq!(
            Some("/data/faith.qza"),
            tree.gets(&path!["alpha_resources", "faith_pd"])
                .unwrap()
                .as_str()
        );
        assert_eq!(
            Some("/data/16s-faith.qza"),
            tree.gets(&path!["datasets", "16SAmplicon", "__alpha__", "faith_pd"])
                .unwrap()
                .as_str()
        );
    }

    #[test]
    fn test_group_paths() {
        assert_eq!(
            vec![path!["alpha_resources"]],
            SchemaDialect::Legacy.group_paths(ResourceKind::Alpha, None)
        );
        assert!(SchemaDialect::Legacy
            .group_paths(ResourceKind::Alpha, Some("WGS"))
            .is_empty());
        assert!(SchemaDialect::Legacy
            .group_paths(ResourceKind::Metadata, Some("WGS"))
            .is_empty());
        assert_eq!(
            vec![path!["datasets", "WGS", "__taxonomy__"]],
            SchemaDialect::Current.group_paths(ResourceKind::Taxonomy, Some("WGS"))
        );
        assert_eq!(
            vec![path!["__taxonomy__"]],
            SchemaDialect::Current.group_paths(ResourceKind::Taxonomy, None)
        );
        assert_eq!(
            vec![path!["__metadata__"], path!["datasets", "__metadata__"]],
            SchemaDialect::Current.group_paths(ResourceKind::Metadata, None)
        );
        assert_eq!(
            vec![path!["table_resources"], path!["__taxonomy__"]],
            SchemaDialect::Compatibility.group_paths(ResourceKind::Taxonomy, None)
        );
        assert_eq!(
            vec![path!["datasets", "WGS", "__pcoa__"]],
            SchemaDialect::Compatibility.group_paths(ResourceKind::Pcoa, Some("WGS"))
        );
        assert_eq!(
            vec![
                path!["datasets", "__metadata__"],
                path!["metadata"],
                path!["__metadata__"],
            ],
            SchemaDialect::Compatibility.group_paths(ResourceKind::Metadata, Some("WGS"))
        );
        assert_eq!(
            vec![
                path!["metadata"],
                path!["__metadata__"],
                path!["datasets", "__metadata__"],
            ],
            SchemaDialect::Compatibility.group_paths(ResourceKind::Metadata, None)
        );
    }

    #[test]
    fn test_deserialise() {
        assert_de_tokens(
            &SchemaDialect::Legacy,
            &[
                Token::Enum {
                    name: "SchemaDialect",
                },
                Token::Str("legacy"),
                Token::Unit,
            ],
        );
        let dialect: SchemaDialect = serde_json::from_str(r#""compatibility""#).unwrap();
        assert_eq!(SchemaDialect::Compatibility, dialect);
    }

    #[test]
    fn test_deserialise_unknown() {
        assert_de_tokens_error::<SchemaDialect>(
            &[
                Token::Enum {
                    name: "SchemaDialect",
                },
                Token::Str("future"),
                Token::Unit,
            ],
            "unknown variant `future`, expected one of `current`, `legacy`, `compatibility`",
        )
    }

    #[test]
    fn test_display() {
        assert_eq!("compatibility", SchemaDialect::default().to_string());
        assert_eq!("current", SchemaDialect::Current.name());
    }
}
