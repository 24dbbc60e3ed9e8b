//! Scoped XML output on top of `quick_xml::Writer`.
//!
//! Elements with content are written through [`XmlScope::element`], which
//! runs the body and then writes the end tag on every path, so every opened
//! element is closed even when the body fails.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::Result;

pub(crate) struct XmlScope<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlScope<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self {
            writer: Writer::new_with_indent(inner, b' ', 2),
        }
    }

    pub(crate) fn declaration(&mut self) -> Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(())
    }

    /// Write `<name attrs>`, the body, then `</name>`.
    ///
    /// The end tag is written even if `body` fails; the body's error wins.
    pub(crate) fn element<F>(&mut self, name: &str, attributes: &[(&str, &str)], body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.writer
            .write_event(Event::Start(start_tag(name, attributes)))?;
        let outcome = body(self);
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        outcome
    }

    pub(crate) fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        self.writer
            .write_event(Event::Empty(start_tag(name, attributes)))?;
        Ok(())
    }

    pub(crate) fn comment(&mut self, text: &str) -> Result<()> {
        let body = sanitize_comment(text);
        self.writer
            .write_event(Event::Comment(BytesText::from_escaped(body)))?;
        Ok(())
    }

    pub(crate) fn text(&mut self, text: &str) -> Result<()> {
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    pub(crate) fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

fn start_tag<'a>(name: &'a str, attributes: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for attribute in attributes {
        start.push_attribute(*attribute);
    }
    start
}

/// Comments may not contain `--` or end with `-`.
fn sanitize_comment(text: &str) -> String {
    let mut body = text.to_string();
    while body.contains("--") {
        body = body.replace("--", "- -");
    }
    if body.ends_with('-') {
        body.push(' ');
    }
    body
}
