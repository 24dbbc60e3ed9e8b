//! Namespace declarations for the generated stylesheet.

use std::collections::{BTreeMap, BTreeSet};

use crosswalk_model::{Element, ElementMappings, Namespace, XML_NAMESPACE_URI, is_ncname};

use crate::error::{Result, XslError};
use crate::relations::concept_fallback;

/// Namespaces the stylesheet root must declare, ordered by URI.
///
/// Covers both sides of every tag and attribute mapping, the document
/// identifier element, and `rdf` when a relationship fallback is emitted.
/// The XSLT namespace is always included; the XML namespace never is.
pub fn collect_namespaces(mappings: &ElementMappings) -> BTreeSet<Namespace> {
    let mut namespaces: BTreeSet<Namespace> = mappings
        .elements()
        .map(|element| element.namespace().clone())
        .collect();
    let needs_rdf = mappings
        .child_mappings()
        .iter()
        .any(|child| concept_fallback(child).is_emitted());
    if needs_rdf {
        namespaces.insert(Namespace::rdf());
    }
    namespaces.insert(Namespace::xsl());
    namespaces.remove(&Namespace::xml());
    namespaces
}

/// Check that the declared set can be written as `xmlns:` attributes and that
/// every element renders with the prefix actually declared for its URI.
pub(crate) fn check_declarations<'a>(
    declared: &BTreeSet<Namespace>,
    elements: impl IntoIterator<Item = &'a Element>,
) -> Result<()> {
    let mut prefixes: BTreeMap<&str, &str> = BTreeMap::new();
    for namespace in declared {
        if !is_ncname(namespace.prefix()) {
            return Err(XslError::configuration(
                "namespaces",
                format!(
                    "prefix {:?} for {} is not a valid XML name",
                    namespace.prefix(),
                    namespace.uri()
                ),
            ));
        }
        if matches!(namespace.prefix(), "xml" | "xmlns") {
            return Err(XslError::configuration(
                "namespaces",
                format!(
                    "prefix {} is reserved and cannot be bound to {}",
                    namespace.prefix(),
                    namespace.uri()
                ),
            ));
        }
        if let Some(existing) = prefixes.insert(namespace.prefix(), namespace.uri()) {
            return Err(XslError::configuration(
                "namespaces",
                format!(
                    "prefix {} is used for both {existing} and {}",
                    namespace.prefix(),
                    namespace.uri()
                ),
            ));
        }
    }
    for element in elements {
        let namespace = element.namespace();
        if namespace.uri() == XML_NAMESPACE_URI {
            if namespace.prefix() != "xml" {
                return Err(XslError::configuration(
                    "namespaces",
                    format!("element {element} must use the xml prefix"),
                ));
            }
            continue;
        }
        if let Some(bound) = declared.get(namespace)
            && bound.prefix() != namespace.prefix()
        {
            return Err(XslError::configuration(
                "namespaces",
                format!(
                    "namespace {} is used with prefixes {} and {}",
                    namespace.uri(),
                    bound.prefix(),
                    namespace.prefix()
                ),
            ));
        }
    }
    Ok(())
}
