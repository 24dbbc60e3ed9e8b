//! SKOS relationship tags whose target may be a nested `skos:Concept`.
//!
//! Some sources encode `skos:broader` and friends as
//! `<skos:broader><skos:Concept rdf:about="..."/></skos:broader>` instead of
//! `<skos:broader rdf:resource="..."/>`. For those tags the stylesheet falls
//! back to the `rdf:about` of the first nested concept.

use crosswalk_model::{
    Element, ElementMapping, HierarchicalElementMapping, RDF_NAMESPACE_URI, SKOS_NAMESPACE_URI,
};

/// Relationship tags eligible for the nested-concept fallback.
const RELATIONSHIP_TAGS: &[(&str, &str)] = &[
    (SKOS_NAMESPACE_URI, "related"),
    (SKOS_NAMESPACE_URI, "broader"),
    (SKOS_NAMESPACE_URI, "broaderTransitive"),
    (SKOS_NAMESPACE_URI, "narrower"),
    (SKOS_NAMESPACE_URI, "narrowerTransitive"),
    (SKOS_NAMESPACE_URI, "semanticRelation"),
];

pub(crate) const RESOURCE_ATTRIBUTE: &str = "resource";
pub(crate) const ABOUT_ATTRIBUTE: &str = "about";
pub(crate) const CONCEPT_TAG: &str = "Concept";

pub fn is_relationship_tag(element: &Element) -> bool {
    RELATIONSHIP_TAGS.iter().any(|(uri, name)| {
        element.namespace().uri() == *uri && element.local_name() == *name
    })
}

fn is_rdf_resource(element: &Element) -> bool {
    element.namespace().uri() == RDF_NAMESPACE_URI && element.local_name() == RESOURCE_ATTRIBUTE
}

/// What to do about the nested-concept fallback for one child mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConceptFallback<'a> {
    /// The tag pair is not a relationship pair.
    NotApplicable,
    /// An explicit mapping fills `rdf:resource` from another attribute.
    Deferred { explicit: &'a ElementMapping },
    /// Emit the fallback. With `guard_resource`, only when the source tag has
    /// no `rdf:resource` of its own.
    Emit { guard_resource: bool },
}

impl ConceptFallback<'_> {
    pub fn is_emitted(&self) -> bool {
        matches!(self, Self::Emit { .. })
    }
}

pub fn concept_fallback(child: &HierarchicalElementMapping) -> ConceptFallback<'_> {
    let tag = child.tag_mapping();
    if !is_relationship_tag(tag.from()) || !is_relationship_tag(tag.to()) {
        return ConceptFallback::NotApplicable;
    }
    let resource_mappings: Vec<&ElementMapping> = child
        .sorted_attribute_mappings()
        .into_iter()
        .filter(|mapping| is_rdf_resource(mapping.to()))
        .collect();
    if let Some(explicit) = resource_mappings
        .iter()
        .copied()
        .find(|mapping| !is_rdf_resource(mapping.from()))
    {
        return ConceptFallback::Deferred { explicit };
    }
    ConceptFallback::Emit {
        guard_resource: !resource_mappings.is_empty(),
    }
}
