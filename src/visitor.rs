//! Dispatch over resource-tagged subtrees of the configuration tree.

use crate::element::{DictElement, Element, ResourceKind};

/// Consumer of tagged configuration subtrees
///
/// Every hook must be implemented, so adding a resource kind is a compile error for every
/// consumer rather than a failure at run time.
pub trait ConfigVisitor {
    /// Called for each group of alpha diversity resources.
    fn visit_alpha(&mut self, element: &DictElement);

    /// Called for each group of taxonomy resources.
    fn visit_taxonomy(&mut self, element: &DictElement);

    /// Called for each group of PCoA resources.
    fn visit_pcoa(&mut self, element: &DictElement);

    /// Called for each metadata file path.
    fn visit_metadata(&mut self, path: &str);
}

impl Element {
    /// Walk the tree, invoking the visitor for each tagged subtree.
    ///
    /// Children are visited before the tagged mapping that contains them. Untagged scalars are
    /// skipped.
    pub fn accept<V: ConfigVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Element::Literal(_) => {}
            Element::List(list) => list.iter().for_each(|child| child.accept(visitor)),
            Element::Dict(dict) => accept_children(dict, visitor),
            Element::Alpha(dict) => {
                accept_children(dict, visitor);
                visitor.visit_alpha(dict);
            }
            Element::Taxonomy(dict) => {
                accept_children(dict, visitor);
                visitor.visit_taxonomy(dict);
            }
            Element::Pcoa(dict) => {
                accept_children(dict, visitor);
                visitor.visit_pcoa(dict);
            }
            Element::Metadata(path) => visitor.visit_metadata(path),
        }
    }
}

fn accept_children<V: ConfigVisitor + ?Sized>(dict: &DictElement, visitor: &mut V) {
    dict.values().for_each(|child| child.accept(visitor));
}

/// Counts of each kind of resource group in a tree
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ResourceSummary {
    pub alpha: usize,
    pub taxonomy: usize,
    pub pcoa: usize,
    pub metadata: usize,
}

impl ResourceSummary {
    /// Return a summary of the given tree.
    pub fn of(element: &Element) -> Self {
        let mut summary = Self::default();
        element.accept(&mut summary);
        summary
    }

    pub fn total(&self) -> usize {
        self.alpha + self.taxonomy + self.pcoa + self.metadata
    }
}

impl ConfigVisitor for ResourceSummary {
    fn visit_alpha(&mut self, _element: &DictElement) {
        self.alpha += 1;
    }

    fn visit_taxonomy(&mut self, _element: &DictElement) {
        self.taxonomy += 1;
    }

    fn visit_pcoa(&mut self, _element: &DictElement) {
        self.pcoa += 1;
    }

    fn visit_metadata(&mut self, _path: &str) {
        self.metadata += 1;
    }
}

/// Every file path referenced by a tree, with the kind of resource it belongs to
///
/// Paths are the string leaves of tagged subtrees: alpha metric files, the table and taxonomy
/// of each taxonomy entry, the files of each PCoA group and metadata files.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourcePaths {
    pub paths: Vec<(ResourceKind, String)>,
}

impl ResourcePaths {
    /// Return the resource paths of the given tree.
    pub fn of(element: &Element) -> Self {
        let mut paths = Self::default();
        element.accept(&mut paths);
        paths
    }

    fn collect(&mut self, kind: ResourceKind, element: &Element) {
        match element {
            Element::Literal(_) => {
                if let Some(path) = element.as_str() {
                    self.paths.push((kind, path.to_string()));
                }
            }
            Element::List(list) => list.iter().for_each(|child| self.collect(kind, child)),
            Element::Dict(dict) => dict.values().for_each(|child| self.collect(kind, child)),
            // Nested tagged subtrees are visited on their own.
            Element::Alpha(_) | Element::Taxonomy(_) | Element::Pcoa(_) | Element::Metadata(_) => {}
        }
    }

    fn collect_group(&mut self, kind: ResourceKind, element: &DictElement) {
        element.values().for_each(|child| self.collect(kind, child));
    }
}

impl ConfigVisitor for ResourcePaths {
    fn visit_alpha(&mut self, element: &DictElement) {
        self.collect_group(ResourceKind::Alpha, element);
    }

    fn visit_taxonomy(&mut self, element: &DictElement) {
        self.collect_group(ResourceKind::Taxonomy, element);
    }

    fn visit_pcoa(&mut self, element: &DictElement) {
        self.collect_group(ResourceKind::Pcoa, element);
    }

    fn visit_metadata(&mut self, path: &str) {
        self.paths.push((ResourceKind::Metadata, path.to_string()));
    }
}
