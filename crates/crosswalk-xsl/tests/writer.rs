//! Integration tests for stylesheet generation.

use crosswalk_model::{
    Element, ElementMapping, ElementMappings, HierarchicalElementMapping, Namespace,
    NamespaceRegistry,
};
use crosswalk_xsl::{XslError, XslOptions, XslWriter, write_xsl};

mod support;

use support::{Node, parse, undeclared_prefixes};

fn registry() -> NamespaceRegistry {
    let mut registry = NamespaceRegistry::builtin();
    registry
        .register(Namespace::new("ns1", "http://example.org/ns1#").unwrap())
        .unwrap();
    registry
        .register(Namespace::new("ns2", "http://example.org/ns2#").unwrap())
        .unwrap();
    registry
}

fn el(prefix: &str, name: &str) -> Element {
    registry().element(prefix, name).unwrap()
}

fn tag(from: Element, to: Element) -> HierarchicalElementMapping {
    HierarchicalElementMapping::new(ElementMapping::new(from, to))
}

fn attr(from: Element, to: Element) -> ElementMapping {
    ElementMapping::new(from, to)
}

fn render(mappings: &ElementMappings) -> String {
    String::from_utf8(write_xsl(mappings).expect("stylesheet generation failed")).unwrap()
}

/// `skos:Concept` crosswalk similar to the ones used for vocabulary dereferencing.
fn concept_mappings() -> ElementMappings {
    let parent = tag(el("skos", "Concept"), el("skos", "Concept"))
        .with_attribute(attr(el("rdf", "about"), el("rdf", "about")));
    let pref_label = tag(el("skos", "prefLabel"), el("skos", "prefLabel"))
        .with_attribute(attr(el("xml", "lang"), el("xml", "lang")))
        .with_tag_value(true);
    let broader = tag(el("skos", "broader"), el("skos", "broader"))
        .with_attribute(attr(el("rdf", "resource"), el("rdf", "resource")));
    let note = tag(el("skos", "note"), el("skos", "note")).with_tag_value(true);
    ElementMappings::new(parent)
        .with_children([pref_label, broader, note])
        .with_document_id(el("rdf", "about"))
}

fn end_to_end_mappings() -> ElementMappings {
    let parent = tag(el("ns1", "Record"), el("ns2", "Item"));
    let title = tag(el("ns1", "title"), el("ns2", "label")).with_tag_value(true);
    ElementMappings::new(parent)
        .with_child(title)
        .with_document_id(el("ns1", "id"))
}

#[test]
fn end_to_end_stylesheet() {
    let writer =
        XslWriter::new(XslOptions::default().with_record_container(el("ns1", "Root")));
    let xsl = String::from_utf8(writer.write(&end_to_end_mappings()).unwrap()).unwrap();

    assert!(xsl.contains(r#"<xsl:template match="/ns1:Root">"#));
    assert!(xsl.contains(r#"<xsl:for-each select="./ns1:Record">"#));
    assert!(xsl.contains(r#"<xsl:if test="@ns1:id=$targetId">"#));
    assert!(xsl.contains("<ns2:Item>"));
    assert!(xsl.contains(r#"<xsl:for-each select="./ns1:title">"#));
    assert!(xsl.contains("<ns2:label>"));
    assert!(xsl.contains(r#"<xsl:value-of select="normalize-space(.)"/>"#));
    insta::assert_snapshot!(xsl);
}

#[test]
fn preamble_declares_parameter_and_output() {
    let xsl = render(&concept_mappings());
    assert!(xsl.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(xsl.contains(r#"<xsl:stylesheet version="1.0""#));
    assert!(xsl.contains(r#"<xsl:param name="targetId" select=""/>"#));
    assert!(xsl.contains(r#"<xsl:output indent="yes" encoding="UTF-8"/>"#));
    assert!(xsl.contains(r#"<xsl:template match="/rdf:RDF">"#));
    assert!(xsl.trim_end().ends_with("</xsl:stylesheet>"));
}

#[test]
fn namespaces_declared_once_in_uri_order() {
    let xsl = render(&concept_mappings());
    assert_eq!(xsl.matches("xmlns:xsl=").count(), 1);
    assert!(!xsl.contains("xmlns:xml="));

    let rdf = xsl.find("xmlns:rdf=").unwrap();
    let skos = xsl.find("xmlns:skos=").unwrap();
    let xsl_decl = xsl.find("xmlns:xsl=").unwrap();
    // 1999/02/22-rdf... < 1999/XSL/... < 2004/02/skos...
    assert!(rdf < xsl_decl);
    assert!(xsl_decl < skos);
}

#[test]
fn child_blocks_follow_insertion_order() {
    let xsl = render(&concept_mappings());
    let comments: Vec<&str> = xsl
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("<!-- Tag mapping:"))
        .collect();
    assert_eq!(
        comments,
        vec![
            "<!-- Tag mapping: skos:prefLabel -> skos:prefLabel -->",
            "<!-- Tag mapping: skos:broader -> skos:broader -->",
            "<!-- Tag mapping: skos:note -> skos:note -->",
        ]
    );

    // Every child block sits inside the parent's literal element.
    let open = xsl.find("<skos:Concept>").unwrap();
    let close = xsl.rfind("</skos:Concept>").unwrap();
    for comment in comments {
        let at = xsl.find(comment).unwrap();
        assert!(open < at && at < close);
    }
}

#[test]
fn attribute_creation_is_always_guarded() {
    let xsl = render(&concept_mappings());
    let lines: Vec<&str> = xsl.lines().map(str::trim).collect();
    let mut checked = 0;
    for (index, line) in lines.iter().enumerate() {
        if line.starts_with("<xsl:attribute ") {
            assert!(
                lines[index - 1].starts_with("<xsl:if test="),
                "unguarded attribute at line {index}: {line}"
            );
            checked += 1;
        }
    }
    // rdf:about on the parent, xml:lang on prefLabel, rdf:resource and the
    // nested concept fallback on broader.
    assert_eq!(checked, 4);
}

#[test]
fn attribute_rules_copy_source_value() {
    let xsl = render(&concept_mappings());
    assert!(xsl.contains("<!-- Attribute mapping: xml:lang -> xml:lang -->"));
    assert!(xsl.contains(r#"<xsl:if test="@xml:lang">"#));
    assert!(xsl.contains(r#"<xsl:attribute name="xml:lang">"#));
    assert!(xsl.contains(r#"<xsl:value-of select="@xml:lang"/>"#));
}

#[test]
fn attribute_rules_use_canonical_order() {
    let parent = tag(el("skos", "Concept"), el("skos", "Concept"));
    let forward = parent
        .clone()
        .with_attribute(attr(el("dc", "identifier"), el("skos", "notation")))
        .with_attribute(attr(el("rdf", "about"), el("rdf", "about")));
    let backward = parent
        .with_attribute(attr(el("rdf", "about"), el("rdf", "about")))
        .with_attribute(attr(el("dc", "identifier"), el("skos", "notation")));
    let a = render(&ElementMappings::new(forward).with_document_id(el("rdf", "about")));
    let b = render(&ElementMappings::new(backward).with_document_id(el("rdf", "about")));
    assert_eq!(a, b);
    assert!(a.find(r#"name="rdf:about""#).unwrap() < a.find(r#"name="skos:notation""#).unwrap());
}

#[test]
fn fallback_guarded_when_resource_is_mapped_to_itself() {
    let xsl = render(&concept_mappings());
    assert_eq!(
        xsl.matches("<!-- Certain skos relations may be defined in a skos:Concept sub-tag. -->")
            .count(),
        1
    );
    assert!(xsl.contains(
        r#"<xsl:if test="not (@rdf:resource) and ./skos:Concept[@rdf:about]">"#
    ));
    assert!(xsl.contains(r#"<xsl:value-of select="(./skos:Concept[@rdf:about])[1]/@rdf:about"/>"#));
}

#[test]
fn fallback_unguarded_without_resource_mapping() {
    let parent = tag(el("skos", "Concept"), el("skos", "Concept"));
    let narrower = tag(el("skos", "narrower"), el("skos", "narrowerTransitive"));
    let mappings = ElementMappings::new(parent)
        .with_child(narrower)
        .with_document_id(el("rdf", "about"));
    let xsl = render(&mappings);
    assert!(xsl.contains(r#"<xsl:if test="./skos:Concept[@rdf:about]">"#));
    assert!(!xsl.contains("not (@rdf:resource)"));
    assert!(xsl.contains(r#"<xsl:attribute name="rdf:resource">"#));
}

#[test]
fn fallback_absent_with_competing_resource_mapping() {
    let parent = tag(el("skos", "Concept"), el("skos", "Concept"));
    let related = tag(el("skos", "related"), el("skos", "related"))
        .with_attribute(attr(el("rdf", "about"), el("rdf", "resource")));
    let mappings = ElementMappings::new(parent)
        .with_child(related)
        .with_document_id(el("rdf", "about"));
    let xsl = render(&mappings);
    assert!(!xsl.contains("Certain skos relations"));
    assert!(!xsl.contains("skos:Concept[@rdf:about]"));
    assert!(xsl.contains(r#"<xsl:value-of select="@rdf:about"/>"#));
}

#[test]
fn fallback_ignored_for_non_relationship_tags() {
    let parent = tag(el("skos", "Concept"), el("skos", "Concept"));
    let label = tag(el("skos", "broader"), el("skos", "prefLabel"));
    let mappings = ElementMappings::new(parent)
        .with_child(label)
        .with_document_id(el("rdf", "about"));
    assert!(!render(&mappings).contains("Certain skos relations"));
}

#[test]
fn text_rule_joins_normalized_nodes() {
    let xsl = render(&concept_mappings());
    let expected = [
        "<!-- Text content mapping (only content with non-space characters) -->",
        r#"<xsl:for-each select="text()[normalize-space()]">"#,
        r#"<xsl:if test="position() &gt; 1">"#,
        "<xsl:text> </xsl:text>",
        "</xsl:if>",
        r#"<xsl:value-of select="normalize-space(.)"/>"#,
        "</xsl:for-each>",
    ];
    let lines: Vec<&str> = xsl.lines().map(str::trim).collect();
    let start = lines.iter().position(|line| *line == expected[0]).unwrap();
    assert_eq!(&lines[start..start + expected.len()], &expected);
    // prefLabel and note copy text; broader does not.
    assert_eq!(xsl.matches("text()[normalize-space()]").count(), 2);
}

fn normalize_space(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Apply a generated text-content block to the text children of one source
/// element. Only the instructions the generator emits are understood.
fn run_text_rule(block: &Node, text_nodes: &[&str]) -> String {
    assert_eq!(block.attribute("select"), Some("text()[normalize-space()]"));
    let selected: Vec<&str> = text_nodes
        .iter()
        .copied()
        .filter(|node| !normalize_space(node).is_empty())
        .collect();
    let mut out = String::new();
    for (index, node) in selected.iter().enumerate() {
        for instruction in &block.children {
            apply_instruction(instruction, node, index + 1, &mut out);
        }
    }
    out
}

fn apply_instruction(instruction: &Node, node: &str, position: usize, out: &mut String) {
    match instruction.name.as_str() {
        "xsl:if" => {
            assert_eq!(instruction.attribute("test"), Some("position() > 1"));
            if position > 1 {
                for child in &instruction.children {
                    apply_instruction(child, node, position, out);
                }
            }
        }
        "xsl:text" => out.push_str(&instruction.text),
        "xsl:value-of" => {
            assert_eq!(instruction.attribute("select"), Some("normalize-space(.)"));
            out.push_str(&normalize_space(node));
        }
        other => panic!("unexpected instruction {other}"),
    }
}

#[test]
fn text_rule_produces_single_spaced_content() {
    let root = parse(&render(&end_to_end_mappings())).expect("well-formed stylesheet");
    let block = root
        .descendants()
        .into_iter()
        .find(|node| {
            node.name == "xsl:for-each"
                && node.attribute("select") == Some("text()[normalize-space()]")
        })
        .expect("text content block");
    assert_eq!(run_text_rule(block, &["  a  ", "", "b\n c"]), "a b c");
    assert_eq!(run_text_rule(block, &["single"]), "single");
    assert_eq!(run_text_rule(block, &[" ", "\t\n"]), "");
}

#[test]
fn stylesheets_parse_with_declared_prefixes() {
    let writer =
        XslWriter::new(XslOptions::default().with_record_container(el("ns1", "Root")));
    let documents = [
        render(&concept_mappings()),
        String::from_utf8(writer.write(&end_to_end_mappings()).unwrap()).unwrap(),
    ];
    for xsl in &documents {
        let root = parse(xsl).expect("well-formed stylesheet");
        assert_eq!(root.name, "xsl:stylesheet");
        assert!(undeclared_prefixes(&root).is_empty(), "{xsl}");
    }

    let root = parse(&documents[1]).unwrap();
    let template = &root.children[2];
    assert_eq!(template.name, "xsl:template");
    assert_eq!(template.attribute("match"), Some("/ns1:Root"));
}

#[test]
fn invalid_prefix_is_rejected_as_configuration() {
    let err = Namespace::new("bad prefix", "http://example.org/bad#").unwrap_err();
    assert!(matches!(
        XslError::from(err),
        XslError::Configuration {
            field: "namespaces",
            ..
        }
    ));
    assert!(Namespace::new("a:b", "http://example.org/bad#").is_err());
}

#[test]
fn output_is_deterministic() {
    assert_eq!(
        write_xsl(&concept_mappings()).unwrap(),
        write_xsl(&concept_mappings()).unwrap()
    );
}

#[test]
fn missing_document_id_writes_nothing() {
    let mappings = ElementMappings::new(tag(el("ns1", "Record"), el("ns2", "Item")));
    let mut sink: Vec<u8> = Vec::new();
    let err = XslWriter::default()
        .write_to(&mappings, &mut sink)
        .unwrap_err();
    assert!(matches!(
        err,
        XslError::Configuration {
            field: "document_id_mapping",
            ..
        }
    ));
    assert!(sink.is_empty());
}

#[test]
fn write_to_reports_bytes_written() {
    let mut sink: Vec<u8> = Vec::new();
    let written = XslWriter::default()
        .write_to(&concept_mappings(), &mut sink)
        .unwrap();
    assert_eq!(written, sink.len());
    assert_eq!(sink, write_xsl(&concept_mappings()).unwrap());
}

struct BrokenSink;

impl std::io::Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::other("disk full"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_failure_surfaces_as_io_error() {
    let err = XslWriter::default()
        .write_to(&concept_mappings(), &mut BrokenSink)
        .unwrap_err();
    assert!(matches!(err, XslError::Io(_)));
    assert!(!err.is_configuration());
}

#[test]
fn conflicting_prefixes_are_rejected() {
    let other = Namespace::new("ns1", "http://example.org/elsewhere#").unwrap();
    let parent = tag(el("ns1", "Record"), other.element("Item").unwrap());
    let mappings = ElementMappings::new(parent).with_document_id(el("ns1", "id"));
    let err = write_xsl(&mappings).unwrap_err();
    assert!(matches!(
        err,
        XslError::Configuration {
            field: "namespaces",
            ..
        }
    ));
}
