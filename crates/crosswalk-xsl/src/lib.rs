//! XSLT generation for tag/attribute crosswalks.
//!
//! This crate turns an [`ElementMappings`](crosswalk_model::ElementMappings)
//! into a standalone XSLT 1.0 dereferencing stylesheet:
//!
//! - [`collect_namespaces`]: the namespaces the stylesheet root declares
//! - [`XslWriter`]: the generator itself, with [`XslOptions`]
//! - [`concept_fallback`]: the nested `skos:Concept` rule for relationship tags

#![deny(unsafe_code)]

mod error;
mod namespaces;
mod relations;
mod scope;
mod writer;

pub use error::{Result, XslError};
pub use namespaces::collect_namespaces;
pub use relations::{ConceptFallback, concept_fallback, is_relationship_tag};
pub use writer::{
    DEFAULT_RECORD_CONTAINER, TARGET_ID_PARAMETER_NAME, XslOptions, XslWriter, write_xsl,
};
