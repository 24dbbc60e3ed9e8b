#![deny(unsafe_code)]

pub mod document;
pub mod error;
pub mod loader;

pub use crate::document::{AttributeRule, MappingDocument, MappingSection, OutputSection, TagRule};
pub use crate::error::ConfigError;
pub use crate::loader::{
    ResolvedMapping, discover_mapping_files, load_mapping, load_mapping_document, parse_json,
    parse_toml, resolve_name,
};
