//! Crosswalk model: namespaces, elements and the tag/attribute mappings
//! compiled into dereferencing stylesheets.

#![deny(unsafe_code)]

pub mod element;
pub mod error;
pub mod mapping;
pub mod namespace;

pub use element::{Element, is_ncname};
pub use error::{ModelError, Result};
pub use mapping::{ElementMapping, ElementMappings, HierarchicalElementMapping};
pub use namespace::{
    Namespace, NamespaceRegistry, RDF_NAMESPACE_URI, SKOS_NAMESPACE_URI, XML_NAMESPACE_URI,
    XSL_NAMESPACE_URI,
};
