//! Configuration tree elements
//!
//! A decoded JSON configuration document is normalised into a tree of [Element]s. Branches are
//! plain mappings ([DictElement]) and sequences ([ListElement]); subtrees that hold a particular
//! kind of resource (alpha diversity, taxonomy, PCoA, metadata) carry that kind in their
//! variant, so consumers can dispatch on it (see [crate::visitor]).
//!
//! Values are read back through a small path API: [Element::gets], [Element::has] and
//! [Element::updates]. A path is a slice of [PathSegment]s, conveniently built with the
//! [path!](crate::path) macro.

use crate::error::ConfigError;

use serde::Deserialize;
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::fmt;
use strum_macros::Display;

/// Kind of resource held by a tagged subtree
#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResourceKind {
    /// Alpha diversity QZAs
    Alpha,
    /// Feature tables with their taxonomies
    Taxonomy,
    /// Principal coordinates QZAs
    Pcoa,
    /// Sample metadata file
    Metadata,
}

impl ResourceKind {
    /// All resource kinds.
    pub const ALL: [ResourceKind; 4] = [Self::Alpha, Self::Taxonomy, Self::Pcoa, Self::Metadata];

    /// Keyword tagging this kind in the current configuration layout.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Alpha => "__alpha__",
            Self::Taxonomy => "__taxonomy__",
            Self::Pcoa => "__pcoa__",
            Self::Metadata => "__metadata__",
        }
    }

    /// Keyword tagging this kind in the legacy configuration layout.
    pub fn legacy_keyword(self) -> &'static str {
        match self {
            Self::Alpha => "alpha_resources",
            Self::Taxonomy => "table_resources",
            Self::Pcoa => "pcoa",
            Self::Metadata => "metadata",
        }
    }

    /// Tag an already built element with this kind.
    ///
    /// Alpha, taxonomy and PCoA resources must be objects; metadata must be a string.
    ///
    /// # Arguments
    ///
    /// * `key`: Keyword under which the element was found, reported on error
    /// * `element`: The element to tag
    pub fn wrap(self, key: &str, element: Element) -> Result<Element, ConfigError> {
        let unexpected = || ConfigError::UnexpectedShape {
            key: key.to_string(),
            kind: self,
        };
        match self {
            Self::Metadata => match element {
                Element::Literal(Literal::Str(path)) | Element::Metadata(path) => {
                    Ok(Element::Metadata(path))
                }
                _ => Err(unexpected()),
            },
            Self::Alpha => element.into_dict().map(Element::Alpha).ok_or_else(unexpected),
            Self::Taxonomy => element.into_dict().map(Element::Taxonomy).ok_or_else(unexpected),
            Self::Pcoa => element.into_dict().map(Element::Pcoa).ok_or_else(unexpected),
        }
    }
}

/// A scalar leaf
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// One step of a path through the tree
///
/// Keys index into mappings and indices into sequences.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<&String> for PathSegment {
    fn from(key: &String) -> Self {
        Self::Key(key.clone())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Build a `Vec<PathSegment>` from a list of keys and indices.
///
/// ```
/// use microsetta_config::element::PathSegment;
/// use microsetta_config::path;
///
/// let path = path!["datasets", "16SAmplicon", 0_usize];
/// assert_eq!(PathSegment::Index(0), path[2]);
/// ```
#[macro_export]
macro_rules! path {
    () => {
        ::std::vec::Vec::<$crate::element::PathSegment>::new()
    };
    ($($segment:expr),+ $(,)?) => {
        vec![$($crate::element::PathSegment::from($segment)),+]
    };
}

/// A mapping from string keys to child elements
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DictElement {
    entries: BTreeMap<String, Element>,
}

impl DictElement {
    /// Return an empty DictElement.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Element> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert an entry, returning the previous value for the key if any.
    pub fn insert(&mut self, key: impl Into<String>, value: Element) -> Option<Element> {
        self.entries.insert(key.into(), value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Element> {
        self.entries.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Element)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slot for `key`, created as null if absent.
    fn slot_mut(&mut self, key: &str) -> &mut Element {
        self.entries
            .entry(key.to_string())
            .or_insert(Element::Literal(Literal::Null))
    }
}

impl<K: Into<String>> FromIterator<(K, Element)> for DictElement {
    fn from_iter<T: IntoIterator<Item = (K, Element)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// An ordered sequence of child elements
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListElement {
    items: Vec<Element>,
}

impl ListElement {
    /// Return an empty ListElement.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&Element> {
        self.items.get(index)
    }

    pub fn push(&mut self, value: Element) {
        self.items.push(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Slot at `index`, growing the sequence with nulls to reach it.
    fn slot_mut(&mut self, index: usize) -> &mut Element {
        if index >= self.items.len() {
            self.items.resize(index + 1, Element::Literal(Literal::Null));
        }
        &mut self.items[index]
    }
}

impl FromIterator<Element> for ListElement {
    fn from_iter<T: IntoIterator<Item = Element>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// A node of the configuration tree
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    /// Scalar leaf
    Literal(Literal),
    /// Untagged sequence
    List(ListElement),
    /// Untagged mapping
    Dict(DictElement),
    /// Group of alpha diversity resources
    Alpha(DictElement),
    /// Group of taxonomy resources
    Taxonomy(DictElement),
    /// Group of PCoA resources
    Pcoa(DictElement),
    /// Path to a metadata file
    Metadata(String),
}

impl Element {
    /// Resource kind of a tagged element, or None for untagged ones.
    pub fn kind(&self) -> Option<ResourceKind> {
        match self {
            Self::Alpha(_) => Some(ResourceKind::Alpha),
            Self::Taxonomy(_) => Some(ResourceKind::Taxonomy),
            Self::Pcoa(_) => Some(ResourceKind::Pcoa),
            Self::Metadata(_) => Some(ResourceKind::Metadata),
            Self::Literal(_) | Self::List(_) | Self::Dict(_) => None,
        }
    }

    /// Mapping held by this element, tagged or not.
    pub fn as_dict(&self) -> Option<&DictElement> {
        match self {
            Self::Dict(dict) | Self::Alpha(dict) | Self::Taxonomy(dict) | Self::Pcoa(dict) => {
                Some(dict)
            }
            _ => None,
        }
    }

    fn as_dict_mut(&mut self) -> Option<&mut DictElement> {
        match self {
            Self::Dict(dict) | Self::Alpha(dict) | Self::Taxonomy(dict) | Self::Pcoa(dict) => {
                Some(dict)
            }
            _ => None,
        }
    }

    fn into_dict(self) -> Option<DictElement> {
        match self {
            Self::Dict(dict) | Self::Alpha(dict) | Self::Taxonomy(dict) | Self::Pcoa(dict) => {
                Some(dict)
            }
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListElement> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// String value of a string literal or a metadata path.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Literal(Literal::Str(s)) | Self::Metadata(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Literal(Literal::Int(i)) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value of an integer or float literal.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Literal(Literal::Int(i)) => Some(*i as f64),
            Self::Literal(Literal::Float(f)) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Literal(Literal::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Literal(Literal::Null))
    }

    /// Return the element located by a path of keys.
    ///
    /// An empty path returns the element itself.
    ///
    /// # Errors
    ///
    /// [ConfigError::KeyNotFound] naming the first segment that could not be followed, whether
    /// the key is absent, the index is out of range or the element is not a container.
    ///
    /// ```
    /// use microsetta_config::element::ElementFactory;
    /// use microsetta_config::path;
    /// use serde_json::json;
    ///
    /// let qux = ElementFactory::get_element(json!({"foo": {"bar": "baz"}})).unwrap();
    /// assert_eq!(Some("baz"), qux.gets(&path!["foo", "bar"]).unwrap().as_str());
    /// assert!(qux.gets(&path!["foo", "corge"]).is_err());
    /// ```
    pub fn gets(&self, path: &[PathSegment]) -> Result<&Element, ConfigError> {
        path.iter().try_fold(self, |element, segment| {
            element
                .child(segment)
                .ok_or_else(|| ConfigError::KeyNotFound(segment.clone()))
        })
    }

    /// Return whether a path of keys exists in the element.
    ///
    /// An empty path is always present.
    pub fn has(&self, path: &[PathSegment]) -> bool {
        self.gets(path).is_ok()
    }

    /// Store a value at a path of keys, creating intermediate containers as required.
    ///
    /// Each segment is followed from an element able to hold it: a mapping for a key, a sequence
    /// for an index. An element along the path that cannot hold the next segment, the element
    /// itself included, is replaced by an empty container of the right shape. Sequences grow to
    /// reach an index, padded with nulls.
    ///
    /// # Errors
    ///
    /// [ConfigError::InvalidArgument] if the path is empty, in which case the element is left
    /// unmodified.
    ///
    /// ```
    /// use microsetta_config::element::{DictElement, Element};
    /// use microsetta_config::path;
    ///
    /// let mut element = Element::Dict(DictElement::new());
    /// element.updates("v".into(), &path!["new", 1_usize]).unwrap();
    /// assert_eq!(Some("v"), element.gets(&path!["new", 1_usize]).unwrap().as_str());
    /// assert!(element.gets(&path!["new", 0_usize]).unwrap().is_null());
    /// ```
    pub fn updates(&mut self, value: Element, path: &[PathSegment]) -> Result<(), ConfigError> {
        let Some((last, parents)) = path.split_last() else {
            return Err(ConfigError::InvalidArgument(
                "must receive at least one key".to_string(),
            ));
        };
        let parent = parents.iter().try_fold(self, |element, segment| {
            element
                .slot_mut(segment)
                .ok_or_else(|| ConfigError::KeyNotFound(segment.clone()))
        })?;
        let slot = parent
            .slot_mut(last)
            .ok_or_else(|| ConfigError::KeyNotFound(last.clone()))?;
        *slot = value;
        Ok(())
    }

    /// Child element at a single segment.
    fn child(&self, segment: &PathSegment) -> Option<&Element> {
        match (self, segment) {
            (Self::List(list), PathSegment::Index(index)) => list.get(*index),
            (_, PathSegment::Key(key)) => self.as_dict()?.get(key),
            _ => None,
        }
    }

    /// Whether this element is a container for `segment`.
    fn holds(&self, segment: &PathSegment) -> bool {
        match segment {
            PathSegment::Key(_) => self.as_dict().is_some(),
            PathSegment::Index(_) => matches!(self, Self::List(_)),
        }
    }

    /// Mutable child slot at a single segment, reshaping this element to hold it if needed.
    fn slot_mut(&mut self, segment: &PathSegment) -> Option<&mut Element> {
        if !self.holds(segment) {
            *self = match segment {
                PathSegment::Key(_) => Element::Dict(DictElement::new()),
                PathSegment::Index(_) => Element::List(ListElement::new()),
            };
        }
        match (self, segment) {
            (Self::List(list), PathSegment::Index(index)) => Some(list.slot_mut(*index)),
            (element, PathSegment::Key(key)) => element.as_dict_mut().map(|d| d.slot_mut(key)),
            _ => None,
        }
    }

    /// Convert the tree back into a JSON value. Resource tags are not represented.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Literal(Literal::Null) => Value::Null,
            Self::Literal(Literal::Bool(b)) => Value::Bool(*b),
            Self::Literal(Literal::Int(i)) => Value::Number((*i).into()),
            Self::Literal(Literal::Float(f)) => {
                Number::from_f64(*f).map_or(Value::Null, Value::Number)
            }
            Self::Literal(Literal::Str(s)) | Self::Metadata(s) => Value::String(s.clone()),
            Self::List(list) => Value::Array(list.iter().map(Element::to_value).collect()),
            Self::Dict(dict) | Self::Alpha(dict) | Self::Taxonomy(dict) | Self::Pcoa(dict) => {
                Value::Object(
                    dict.iter()
                        .map(|(k, v)| (k.to_string(), v.to_value()))
                        .collect(),
                )
            }
        }
    }
}

impl From<Literal> for Element {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<&str> for Element {
    fn from(s: &str) -> Self {
        Self::Literal(Literal::Str(s.to_string()))
    }
}

impl From<DictElement> for Element {
    fn from(dict: DictElement) -> Self {
        Self::Dict(dict)
    }
}

impl From<ListElement> for Element {
    fn from(list: ListElement) -> Self {
        Self::List(list)
    }
}

impl TryFrom<Value> for Element {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        ElementFactory::get_element(value)
    }
}

/// Converts decoded JSON values into untagged [Element]s.
pub struct ElementFactory;

impl ElementFactory {
    /// Return the element representing a decoded JSON value, recursively.
    ///
    /// # Errors
    ///
    /// [ConfigError::UnsupportedType] for integers outside the range of [i64].
    pub fn get_element(value: Value) -> Result<Element, ConfigError> {
        Ok(match value {
            Value::Null => Literal::Null.into(),
            // Booleans are a distinct JSON type and never become integer literals.
            Value::Bool(b) => Literal::Bool(b).into(),
            Value::Number(number) => Self::number(&number)?.into(),
            Value::String(s) => Literal::Str(s).into(),
            Value::Array(items) => items
                .into_iter()
                .map(Self::get_element)
                .collect::<Result<ListElement, _>>()?
                .into(),
            Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| Ok((key, Self::get_element(value)?)))
                .collect::<Result<DictElement, ConfigError>>()?
                .into(),
        })
    }

    fn number(number: &Number) -> Result<Literal, ConfigError> {
        if let Some(i) = number.as_i64() {
            Ok(Literal::Int(i))
        } else if number.is_u64() {
            Err(ConfigError::UnsupportedType { type_name: "u64" })
        } else {
            number
                .as_f64()
                .map(Literal::Float)
                .ok_or(ConfigError::UnsupportedType { type_name: "number" })
        }
    }
}
