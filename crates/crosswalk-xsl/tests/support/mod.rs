//! Reads generated stylesheets back into a small element tree.

#![allow(dead_code)]

use std::collections::BTreeSet;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

#[derive(Debug, Default)]
pub struct Node {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
    /// Concatenated text directly inside this element.
    pub text: String,
}

impl Node {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// This node and all elements below it, in document order.
    pub fn descendants(&self) -> Vec<&Node> {
        let mut nodes = vec![self];
        for child in &self.children {
            nodes.extend(child.descendants());
        }
        nodes
    }

    /// Prefixes bound by `xmlns:` attributes on this element.
    pub fn declared_prefixes(&self) -> BTreeSet<&str> {
        self.attributes
            .iter()
            .filter_map(|(key, _)| key.strip_prefix("xmlns:"))
            .collect()
    }
}

/// Parse `xml` into its root element. Anything that is not a well-formed
/// document with a single root is an error.
pub fn parse(xml: &str) -> Result<Node, String> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;
    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(start) => stack.push(open(&start)?),
            Event::Empty(start) => {
                let node = open(&start)?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| "end tag without start tag".to_string())?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::Text(text) => {
                let text = std::str::from_utf8(&text).map_err(|e| e.to_string())?;
                match stack.last_mut() {
                    Some(node) => node.text.push_str(text),
                    None if text.trim().is_empty() => {}
                    None => return Err(format!("text outside the root element: {text:?}")),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if let Some(open) = stack.last() {
        return Err(format!("element {} is never closed", open.name));
    }
    root.ok_or_else(|| "document has no root element".to_string())
}

/// Element names whose prefix is not declared on `root` (`xml` is implicit).
pub fn undeclared_prefixes(root: &Node) -> Vec<String> {
    let declared = root.declared_prefixes();
    let mut missing: Vec<String> = root
        .descendants()
        .into_iter()
        .filter_map(|node| node.name.split_once(':').map(|(prefix, _)| prefix))
        .filter(|prefix| *prefix != "xml" && !declared.contains(prefix))
        .map(str::to_string)
        .collect();
    missing.sort();
    missing.dedup();
    missing
}

fn open(start: &BytesStart<'_>) -> Result<Node, String> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| e.to_string())?
        .to_string();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| e.to_string())?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(|e| e.to_string())?
            .to_string();
        let value = attribute
            .unescape_value()
            .map_err(|e| e.to_string())?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(Node {
        name,
        attributes,
        ..Node::default()
    })
}

fn attach(stack: &mut [Node], root: &mut Option<Node>, node: Node) -> Result<(), String> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => return Err(format!("second root element {}", node.name)),
    }
    Ok(())
}
