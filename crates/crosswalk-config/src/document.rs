#![deny(unsafe_code)]

use std::collections::BTreeMap;

use serde::Deserialize;

/// A mapping definition file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingDocument {
    /// Extra prefixes, merged into the builtin namespace registry.
    #[serde(default)]
    pub namespaces: BTreeMap<String, String>,
    pub mapping: MappingSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingSection {
    /// Attribute holding the record identifier, e.g. `rdf:about`.
    #[serde(default)]
    pub document_id: Option<String>,
    pub parent: TagRule,
    #[serde(default)]
    pub children: Vec<TagRule>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagRule {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub include_value: bool,
    #[serde(default)]
    pub attributes: Vec<AttributeRule>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeRule {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Root element enclosing candidate records, e.g. `rdf:RDF`.
    #[serde(default)]
    pub record_container: Option<String>,
}
