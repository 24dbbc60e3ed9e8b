#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use crosswalk_model::{
    Element, ElementMapping, ElementMappings, HierarchicalElementMapping, Namespace,
    NamespaceRegistry,
};

use crate::document::{MappingDocument, TagRule};
use crate::error::{ConfigError, Result};

const MAPPING_EXTENSIONS: &[&str] = &["toml", "json"];

/// A mapping document resolved against its namespace registry.
#[derive(Debug, Clone)]
pub struct ResolvedMapping {
    pub registry: NamespaceRegistry,
    pub mappings: ElementMappings,
    pub record_container: Option<Element>,
}

/// Read and parse a mapping file, choosing the format from its extension.
pub fn load_mapping_document(path: &Path) -> Result<MappingDocument> {
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    match format.as_deref() {
        Some("toml") => parse_toml(&text, path),
        Some("json") => parse_json(&text, path),
        _ => Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

pub fn parse_toml(text: &str, path: &Path) -> Result<MappingDocument> {
    toml::from_str(text).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_json(text: &str, path: &Path) -> Result<MappingDocument> {
    serde_json::from_str(text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a mapping file and resolve it in one step.
pub fn load_mapping(path: &Path) -> Result<ResolvedMapping> {
    load_mapping_document(path)?.resolve()
}

/// Mapping files (`.toml`, `.json`) directly inside `dir`, sorted by name.
pub fn discover_mapping_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ConfigError::io(dir, e))?.path();
        if !path.is_file() {
            continue;
        }
        let ext = path
            .extension()
            .and_then(|v| v.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        if MAPPING_EXTENSIONS.contains(&ext.as_str()) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

impl MappingDocument {
    /// The builtin registry extended with this document's namespaces.
    pub fn registry(&self) -> Result<NamespaceRegistry> {
        let mut registry = NamespaceRegistry::builtin();
        for (prefix, uri) in &self.namespaces {
            registry.register(Namespace::new(prefix.as_str(), uri.as_str())?)?;
        }
        Ok(registry)
    }

    /// Resolve every qualified name and build the crosswalk.
    ///
    /// A missing `document_id` is not an error here; the stylesheet writer
    /// reports it.
    pub fn resolve(&self) -> Result<ResolvedMapping> {
        let registry = self.registry()?;
        let section = &self.mapping;

        let parent = resolve_tag(&registry, &section.parent, "mapping.parent")?;
        let children = section
            .children
            .iter()
            .enumerate()
            .map(|(index, rule)| {
                resolve_tag(&registry, rule, &format!("mapping.children[{index}]"))
            })
            .collect::<Result<Vec<_>>>()?;
        let mut mappings = ElementMappings::new(parent).with_children(children);
        if let Some(document_id) = &section.document_id {
            mappings = mappings.with_document_id(resolve_name(
                &registry,
                document_id,
                "mapping.document_id",
            )?);
        }
        let record_container = self
            .output
            .record_container
            .as_deref()
            .map(|name| resolve_name(&registry, name, "output.record_container"))
            .transpose()?;

        Ok(ResolvedMapping {
            registry,
            mappings,
            record_container,
        })
    }
}

fn resolve_tag(
    registry: &NamespaceRegistry,
    rule: &TagRule,
    context: &str,
) -> Result<HierarchicalElementMapping> {
    let tag = ElementMapping::new(
        resolve_name(registry, &rule.from, context)?,
        resolve_name(registry, &rule.to, context)?,
    );
    let attribute_context = format!("{context}.attributes");
    let attributes = rule
        .attributes
        .iter()
        .map(|attribute| {
            Ok(ElementMapping::new(
                resolve_name(registry, &attribute.from, &attribute_context)?,
                resolve_name(registry, &attribute.to, &attribute_context)?,
            ))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(HierarchicalElementMapping::new(tag)
        .with_attributes(attributes)
        .with_tag_value(rule.include_value))
}

/// Resolve `prefix:local` against the registry.
pub fn resolve_name(registry: &NamespaceRegistry, value: &str, context: &str) -> Result<Element> {
    let (prefix, local) = value
        .trim()
        .split_once(':')
        .filter(|(prefix, local)| !prefix.is_empty() && !local.is_empty())
        .ok_or_else(|| ConfigError::InvalidQualifiedName {
            value: value.to_string(),
        })?;
    let namespace = registry
        .by_prefix(prefix)
        .ok_or_else(|| ConfigError::UnknownPrefix {
            prefix: prefix.to_string(),
            context: context.to_string(),
        })?;
    Ok(namespace.element(local)?)
}
