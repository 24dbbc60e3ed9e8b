//! Stylesheet generation.
//!
//! The generated document selects the one record under the record container
//! whose identifier equals the `targetId` parameter, and rewrites it into the
//! target vocabulary:
//!
//! ```text
//! xsl:template match="/rdf:RDF"
//!   xsl:for-each ./<parent.from>
//!     xsl:if @<document id>=$targetId
//!       <parent.to>   attribute rules, then one block per child mapping
//! ```

use std::collections::BTreeSet;
use std::io::Write;

use tracing::{debug, debug_span, info};

use crosswalk_model::{Element, ElementMappings, HierarchicalElementMapping, Namespace};

use crate::error::{Result, XslError};
use crate::namespaces::{check_declarations, collect_namespaces};
use crate::relations::{
    ABOUT_ATTRIBUTE, CONCEPT_TAG, ConceptFallback, RESOURCE_ATTRIBUTE, concept_fallback,
};
use crate::scope::XmlScope;

/// Name of the stylesheet parameter carrying the identifier of the record to
/// transform.
pub const TARGET_ID_PARAMETER_NAME: &str = "targetId";
const TARGET_ID_DEFAULT_VALUE: &str = "";

const XSL_VERSION: &str = "1.0";
const OUTPUT_INDENT: &str = "yes";
const OUTPUT_ENCODING: &str = "UTF-8";

/// Local name of the default record container, `rdf:RDF`.
pub const DEFAULT_RECORD_CONTAINER: &str = "RDF";

const TEXT_NODES_SELECTOR: &str = "text()[normalize-space()]";
const NOT_FIRST_TEST: &str = "position() > 1";
const NORMALIZED_TEXT: &str = "normalize-space(.)";

type Scope = XmlScope<Vec<u8>>;

/// Options for stylesheet generation.
#[derive(Debug, Clone, Default)]
pub struct XslOptions {
    /// Root element enclosing candidate records. Defaults to `rdf:RDF`.
    pub record_container: Option<Element>,
}

impl XslOptions {
    #[must_use]
    pub fn with_record_container(mut self, container: Element) -> Self {
        self.record_container = Some(container);
        self
    }
}

/// Compiles [`ElementMappings`] into XSLT 1.0 stylesheets.
#[derive(Debug, Clone, Default)]
pub struct XslWriter {
    options: XslOptions,
}

impl XslWriter {
    pub fn new(options: XslOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &XslOptions {
        &self.options
    }

    fn container_namespace(&self) -> Namespace {
        self.options
            .record_container
            .as_ref()
            .map_or_else(Namespace::rdf, |container| container.namespace().clone())
    }

    /// Namespaces declared on the `xsl:stylesheet` root, ordered by URI.
    pub fn declared_namespaces(&self, mappings: &ElementMappings) -> BTreeSet<Namespace> {
        let mut namespaces = collect_namespaces(mappings);
        namespaces.insert(self.container_namespace());
        namespaces.remove(&Namespace::xml());
        namespaces
    }

    /// Generate the stylesheet for `mappings`.
    ///
    /// The mapping is validated before anything is written; on error no
    /// output is produced.
    pub fn write(&self, mappings: &ElementMappings) -> Result<Vec<u8>> {
        let tag = mappings.parent_mapping().tag_mapping();
        let span = debug_span!("write_xsl", parent = %tag);
        let _guard = span.enter();

        let document_id = mappings.document_id_mapping().ok_or_else(|| {
            XslError::configuration(
                "document_id_mapping",
                format!("mapping {tag} has no document identifier element"),
            )
        })?;
        let namespaces = self.declared_namespaces(mappings);
        check_declarations(
            &namespaces,
            mappings
                .elements()
                .chain(self.options.record_container.iter()),
        )?;

        let container_namespace = self.container_namespace();
        let container = match &self.options.record_container {
            Some(container) => container.qualified_name(),
            None => qualified(&namespaces, &container_namespace, DEFAULT_RECORD_CONTAINER),
        };
        let emitter = Emitter {
            mappings,
            document_id,
            namespaces: &namespaces,
            container,
        };
        let mut xml = XmlScope::new(Vec::new());
        emitter.stylesheet(&mut xml)?;
        let bytes = xml.into_inner();
        info!(
            bytes = bytes.len(),
            children = mappings.child_mappings().len(),
            namespaces = namespaces.len(),
            "generated dereferencing stylesheet"
        );
        Ok(bytes)
    }

    /// Generate the stylesheet and write it to `sink` in one piece.
    ///
    /// Returns the number of bytes written. Nothing reaches the sink when the
    /// mapping is invalid.
    pub fn write_to<W: Write>(&self, mappings: &ElementMappings, sink: &mut W) -> Result<usize> {
        let bytes = self.write(mappings)?;
        sink.write_all(&bytes)?;
        sink.flush()?;
        Ok(bytes.len())
    }
}

/// Generate a stylesheet with default options.
pub fn write_xsl(mappings: &ElementMappings) -> Result<Vec<u8>> {
    XslWriter::default().write(mappings)
}

/// `prefix:local` using the prefix declared for `namespace`.
fn qualified(declared: &BTreeSet<Namespace>, namespace: &Namespace, local: &str) -> String {
    let prefix = declared
        .get(namespace)
        .map_or(namespace.prefix(), Namespace::prefix);
    format!("{prefix}:{local}")
}

struct Emitter<'a> {
    mappings: &'a ElementMappings,
    document_id: &'a Element,
    namespaces: &'a BTreeSet<Namespace>,
    container: String,
}

impl Emitter<'_> {
    fn xsl(&self, local: &str) -> String {
        qualified(self.namespaces, &Namespace::xsl(), local)
    }

    fn stylesheet(&self, xml: &mut Scope) -> Result<()> {
        xml.declaration()?;
        let declarations: Vec<(String, &str)> = self
            .namespaces
            .iter()
            .map(|namespace| (format!("xmlns:{}", namespace.prefix()), namespace.uri()))
            .collect();
        let mut root_attributes = vec![("version", XSL_VERSION)];
        root_attributes.extend(
            declarations
                .iter()
                .map(|(name, uri)| (name.as_str(), *uri)),
        );
        let template_match = format!("/{}", self.container);

        xml.element(&self.xsl("stylesheet"), &root_attributes, |xml| {
            xml.empty(
                &self.xsl("param"),
                &[
                    ("name", TARGET_ID_PARAMETER_NAME),
                    ("select", TARGET_ID_DEFAULT_VALUE),
                ],
            )?;
            xml.empty(
                &self.xsl("output"),
                &[("indent", OUTPUT_INDENT), ("encoding", OUTPUT_ENCODING)],
            )?;
            xml.element(
                &self.xsl("template"),
                &[("match", template_match.as_str())],
                |xml| self.parent_block(xml),
            )
        })
    }

    fn parent_block(&self, xml: &mut Scope) -> Result<()> {
        let parent = self.mappings.parent_mapping();
        let tag = parent.tag_mapping();
        let select = format!("./{}", tag.from());
        let test = format!("@{}=${TARGET_ID_PARAMETER_NAME}", self.document_id);

        xml.comment(&format!(" Parent mapping: {tag} "))?;
        xml.element(&self.xsl("for-each"), &[("select", select.as_str())], |xml| {
            xml.element(&self.xsl("if"), &[("test", test.as_str())], |xml| {
                xml.element(&tag.to().qualified_name(), &[], |xml| {
                    self.attribute_rules(xml, parent)?;
                    for child in self.mappings.child_mappings() {
                        self.child_block(xml, child)?;
                    }
                    Ok(())
                })
            })
        })
    }

    fn child_block(&self, xml: &mut Scope, child: &HierarchicalElementMapping) -> Result<()> {
        let tag = child.tag_mapping();
        debug!(
            mapping = %tag,
            attributes = child.attribute_mappings().len(),
            include_value = child.include_tag_value(),
            "emitting child mapping"
        );
        let select = format!("./{}", tag.from());

        xml.comment(&format!(" Tag mapping: {tag} "))?;
        xml.element(&self.xsl("for-each"), &[("select", select.as_str())], |xml| {
            xml.element(&tag.to().qualified_name(), &[], |xml| {
                self.attribute_rules(xml, child)?;
                self.relationship_fallback(xml, child)?;
                if child.include_tag_value() {
                    self.text_content(xml)?;
                }
                Ok(())
            })
        })
    }

    /// One guarded `xsl:attribute` per attribute mapping, in canonical order.
    fn attribute_rules(&self, xml: &mut Scope, rules: &HierarchicalElementMapping) -> Result<()> {
        for mapping in rules.sorted_attribute_mappings() {
            let source = format!("@{}", mapping.from());
            let target = mapping.to().qualified_name();

            xml.comment(&format!(" Attribute mapping: {mapping} "))?;
            xml.element(&self.xsl("if"), &[("test", source.as_str())], |xml| {
                xml.element(&self.xsl("attribute"), &[("name", target.as_str())], |xml| {
                    xml.empty(&self.xsl("value-of"), &[("select", source.as_str())])
                })
            })?;
        }
        Ok(())
    }

    fn relationship_fallback(
        &self,
        xml: &mut Scope,
        child: &HierarchicalElementMapping,
    ) -> Result<()> {
        let guard_resource = match concept_fallback(child) {
            ConceptFallback::NotApplicable => return Ok(()),
            ConceptFallback::Deferred { explicit } => {
                // Can hide an unintended double mapping; only logged for now.
                debug!(
                    mapping = %child.tag_mapping(),
                    explicit = %explicit,
                    "rdf:resource is mapped explicitly; skipping nested concept fallback"
                );
                return Ok(());
            }
            ConceptFallback::Emit { guard_resource } => guard_resource,
        };

        let rdf = Namespace::rdf();
        let resource = qualified(self.namespaces, &rdf, RESOURCE_ATTRIBUTE);
        let about = qualified(self.namespaces, &rdf, ABOUT_ATTRIBUTE);
        let concept = qualified(self.namespaces, &Namespace::skos(), CONCEPT_TAG);
        let selector = format!("./{concept}[@{about}]");
        let test = if guard_resource {
            format!("not (@{resource}) and {selector}")
        } else {
            selector.clone()
        };
        let value = format!("({selector})[1]/@{about}");

        xml.comment(" Certain skos relations may be defined in a skos:Concept sub-tag. ")?;
        xml.element(&self.xsl("if"), &[("test", test.as_str())], |xml| {
            xml.element(&self.xsl("attribute"), &[("name", resource.as_str())], |xml| {
                xml.empty(&self.xsl("value-of"), &[("select", value.as_str())])
            })
        })
    }

    /// Copy non-blank text nodes, normalized and joined by single spaces.
    fn text_content(&self, xml: &mut Scope) -> Result<()> {
        xml.comment(" Text content mapping (only content with non-space characters) ")?;
        xml.element(
            &self.xsl("for-each"),
            &[("select", TEXT_NODES_SELECTOR)],
            |xml| {
                xml.element(&self.xsl("if"), &[("test", NOT_FIRST_TEST)], |xml| {
                    xml.element(&self.xsl("text"), &[], |xml| xml.text(" "))
                })?;
                xml.empty(&self.xsl("value-of"), &[("select", NORMALIZED_TEXT)])
            },
        )
    }
}
