//! XML namespaces and the registry that binds prefixes to them.
//!
//! A [`Namespace`] is identified by its URI alone; the prefix is only the
//! short name used when rendering qualified names. Two namespaces with the
//! same URI compare equal even when their prefixes differ.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::element::{Element, is_ncname};
use crate::error::{ModelError, Result};

/// URI of the XML namespace (`xml:` prefix). Implicit in every XML document.
pub const XML_NAMESPACE_URI: &str = "http://www.w3.org/XML/1998/namespace";

/// URI of the XSLT namespace (`xsl:` prefix).
pub const XSL_NAMESPACE_URI: &str = "http://www.w3.org/1999/XSL/Transform";

pub const RDF_NAMESPACE_URI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const SKOS_NAMESPACE_URI: &str = "http://www.w3.org/2004/02/skos/core#";

/// Prefix/URI pairs known to every [`NamespaceRegistry::builtin`] registry.
const BUILTIN_NAMESPACES: &[(&str, &str)] = &[
    ("xml", XML_NAMESPACE_URI),
    ("xsl", XSL_NAMESPACE_URI),
    ("rdf", RDF_NAMESPACE_URI),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("skos", SKOS_NAMESPACE_URI),
    ("dc", "http://purl.org/dc/elements/1.1/"),
    ("dcterms", "http://purl.org/dc/terms/"),
    ("edm", "http://www.europeana.eu/schemas/edm/"),
    ("ore", "http://www.openarchives.org/ore/terms/"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("foaf", "http://xmlns.com/foaf/0.1/"),
    ("wgs84_pos", "http://www.w3.org/2003/01/geo/wgs84_pos#"),
    ("rdaGr2", "http://rdvocab.info/ElementsGr2/"),
    ("cc", "http://creativecommons.org/ns#"),
    ("xsi", "http://www.w3.org/2001/XMLSchema-instance"),
    ("gn", "http://www.geonames.org/ontology#"),
];

/// An XML namespace: a URI with the prefix used to render it.
#[derive(Debug, Clone, Serialize)]
pub struct Namespace {
    prefix: String,
    uri: String,
}

impl Namespace {
    /// Create a namespace. The prefix must be an `NCName` and the URI
    /// non-empty.
    pub fn new(prefix: impl Into<String>, uri: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        let uri = uri.into();
        if prefix.trim().is_empty() {
            return Err(ModelError::EmptyPrefix { uri });
        }
        if !is_ncname(&prefix) {
            return Err(ModelError::InvalidPrefix { prefix, uri });
        }
        if uri.trim().is_empty() {
            return Err(ModelError::EmptyUri { prefix });
        }
        Ok(Self { prefix, uri })
    }

    fn builtin(prefix: &str, uri: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            uri: uri.to_string(),
        }
    }

    /// The namespace of the XML language itself. Never declared explicitly.
    pub fn xml() -> Self {
        Self::builtin("xml", XML_NAMESPACE_URI)
    }

    /// The XSLT namespace.
    pub fn xsl() -> Self {
        Self::builtin("xsl", XSL_NAMESPACE_URI)
    }

    pub fn rdf() -> Self {
        Self::builtin("rdf", RDF_NAMESPACE_URI)
    }

    pub fn skos() -> Self {
        Self::builtin("skos", SKOS_NAMESPACE_URI)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Build an element in this namespace.
    pub fn element(&self, local_name: impl Into<String>) -> Result<Element> {
        Element::new(self.clone(), local_name)
    }
}

impl PartialEq for Namespace {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri
    }
}

impl Eq for Namespace {}

impl Hash for Namespace {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uri.hash(state);
    }
}

impl PartialOrd for Namespace {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Namespace {
    fn cmp(&self, other: &Self) -> Ordering {
        self.uri.cmp(&other.uri)
    }
}

/// A set of namespaces with a one-to-one binding between prefixes and URIs.
#[derive(Debug, Clone, Default)]
pub struct NamespaceRegistry {
    by_uri: BTreeMap<String, Namespace>,
    prefixes: BTreeMap<String, String>,
}

impl NamespaceRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the XML, XSLT and linked-data vocabularies.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (prefix, uri) in BUILTIN_NAMESPACES {
            registry
                .prefixes
                .insert((*prefix).to_string(), (*uri).to_string());
            registry
                .by_uri
                .insert((*uri).to_string(), Namespace::builtin(prefix, uri));
        }
        registry
    }

    /// Register a namespace.
    ///
    /// Registering an identical prefix/URI pair again is a no-op. Rebinding a
    /// known prefix or URI to something else is rejected.
    pub fn register(&mut self, namespace: Namespace) -> Result<()> {
        if let Some(existing) = self.by_uri.get(namespace.uri()) {
            if existing.prefix() == namespace.prefix() {
                return Ok(());
            }
            return Err(ModelError::UriConflict {
                uri: namespace.uri.clone(),
                existing: existing.prefix.clone(),
                requested: namespace.prefix.clone(),
            });
        }
        if let Some(existing) = self.prefixes.get(namespace.prefix()) {
            return Err(ModelError::PrefixConflict {
                prefix: namespace.prefix.clone(),
                existing: existing.clone(),
                requested: namespace.uri.clone(),
            });
        }
        self.prefixes
            .insert(namespace.prefix.clone(), namespace.uri.clone());
        self.by_uri.insert(namespace.uri.clone(), namespace);
        Ok(())
    }

    pub fn by_prefix(&self, prefix: &str) -> Option<&Namespace> {
        self.prefixes
            .get(prefix)
            .and_then(|uri| self.by_uri.get(uri))
    }

    pub fn by_uri(&self, uri: &str) -> Option<&Namespace> {
        self.by_uri.get(uri)
    }

    pub fn contains(&self, namespace: &Namespace) -> bool {
        self.by_uri.contains_key(namespace.uri())
    }

    /// Resolve `prefix` and build an element with `local_name` in it.
    pub fn element(&self, prefix: &str, local_name: &str) -> Result<Element> {
        let namespace = self
            .by_prefix(prefix)
            .ok_or_else(|| ModelError::UnknownPrefix {
                prefix: prefix.to_string(),
            })?;
        namespace.element(local_name)
    }

    /// Namespaces ordered by URI.
    pub fn iter(&self) -> impl Iterator<Item = &Namespace> {
        self.by_uri.values()
    }

    pub fn len(&self) -> usize {
        self.by_uri.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_uri.is_empty()
    }
}
