//! Crosswalk rules from one XML vocabulary to another.
//!
//! The model is exactly two levels deep: a parent tag rule anchoring the
//! record, and child tag rules applied inside it. Values are built once and
//! never mutated afterwards; the `with_*` methods consume and return `self`.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::element::Element;
use crate::error::{ModelError, Result};
use crate::namespace::NamespaceRegistry;

/// One source tag or attribute mapped to one target tag or attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementMapping {
    from: Element,
    to: Element,
}

impl ElementMapping {
    pub fn new(from: Element, to: Element) -> Self {
        Self { from, to }
    }

    pub fn from(&self) -> &Element {
        &self.from
    }

    pub fn to(&self) -> &Element {
        &self.to
    }

    /// Canonical emission order: destination string form first, then source.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.to
            .to_string()
            .cmp(&other.to.to_string())
            .then_with(|| self.from.to_string().cmp(&other.from.to_string()))
            .then_with(|| self.cmp(other))
    }
}

impl fmt::Display for ElementMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// The full rule set for one tag: its own mapping, the attribute mappings
/// scoped to it, and whether its text content is copied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct HierarchicalElementMapping {
    tag_mapping: ElementMapping,
    attribute_mappings: BTreeSet<ElementMapping>,
    include_tag_value: bool,
}

impl HierarchicalElementMapping {
    pub fn new(tag_mapping: ElementMapping) -> Self {
        Self {
            tag_mapping,
            attribute_mappings: BTreeSet::new(),
            include_tag_value: false,
        }
    }

    /// Add an attribute mapping. Duplicates collapse.
    #[must_use]
    pub fn with_attribute(mut self, mapping: ElementMapping) -> Self {
        self.attribute_mappings.insert(mapping);
        self
    }

    #[must_use]
    pub fn with_attributes(mut self, mappings: impl IntoIterator<Item = ElementMapping>) -> Self {
        self.attribute_mappings.extend(mappings);
        self
    }

    #[must_use]
    pub fn with_tag_value(mut self, include: bool) -> Self {
        self.include_tag_value = include;
        self
    }

    pub fn tag_mapping(&self) -> &ElementMapping {
        &self.tag_mapping
    }

    pub fn attribute_mappings(&self) -> &BTreeSet<ElementMapping> {
        &self.attribute_mappings
    }

    /// Attribute mappings in canonical emission order.
    pub fn sorted_attribute_mappings(&self) -> Vec<&ElementMapping> {
        let mut sorted: Vec<&ElementMapping> = self.attribute_mappings.iter().collect();
        sorted.sort_by(|a, b| a.canonical_cmp(b));
        sorted
    }

    pub fn include_tag_value(&self) -> bool {
        self.include_tag_value
    }

    /// Every element referenced by this rule set.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        [&self.tag_mapping.from, &self.tag_mapping.to]
            .into_iter()
            .chain(
                self.attribute_mappings
                    .iter()
                    .flat_map(|mapping| [&mapping.from, &mapping.to]),
            )
    }
}

/// A complete crosswalk: parent rule, ordered child rules and the element
/// holding the record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementMappings {
    parent_mapping: HierarchicalElementMapping,
    child_mappings: Vec<HierarchicalElementMapping>,
    document_id_mapping: Option<Element>,
}

impl ElementMappings {
    pub fn new(parent_mapping: HierarchicalElementMapping) -> Self {
        Self {
            parent_mapping,
            child_mappings: Vec::new(),
            document_id_mapping: None,
        }
    }

    #[must_use]
    pub fn with_document_id(mut self, element: Element) -> Self {
        self.document_id_mapping = Some(element);
        self
    }

    /// Append a child rule, keeping insertion order. A child equal to one
    /// already present is ignored.
    #[must_use]
    pub fn with_child(mut self, child: HierarchicalElementMapping) -> Self {
        if !self.child_mappings.contains(&child) {
            self.child_mappings.push(child);
        }
        self
    }

    #[must_use]
    pub fn with_children(
        self,
        children: impl IntoIterator<Item = HierarchicalElementMapping>,
    ) -> Self {
        children
            .into_iter()
            .fold(self, |mappings, child| mappings.with_child(child))
    }

    pub fn parent_mapping(&self) -> &HierarchicalElementMapping {
        &self.parent_mapping
    }

    pub fn child_mappings(&self) -> &[HierarchicalElementMapping] {
        &self.child_mappings
    }

    pub fn document_id_mapping(&self) -> Option<&Element> {
        self.document_id_mapping.as_ref()
    }

    /// Every element referenced anywhere in the crosswalk.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.parent_mapping
            .elements()
            .chain(
                self.child_mappings
                    .iter()
                    .flat_map(HierarchicalElementMapping::elements),
            )
            .chain(self.document_id_mapping.iter())
    }

    /// Check the crosswalk against the registry it was built from.
    pub fn validate(&self, registry: &NamespaceRegistry) -> Result<()> {
        for element in self.elements() {
            if !registry.contains(element.namespace()) {
                return Err(ModelError::UnknownNamespace {
                    element: element.to_string(),
                    uri: element.namespace().uri().to_string(),
                });
            }
        }
        if self.document_id_mapping.is_none() {
            return Err(ModelError::MissingDocumentId);
        }
        Ok(())
    }
}
