// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! XML projection of the program model.
//!
//! [`XmlElement`] is a generic tree (name, attributes, ordered children,
//! text content); `project` maps a finished [`Program`] onto it. No
//! validation happens here: every instruction reaching this stage is
//! already well-formed.

use crate::parser::Program;

/// Fixed `language` attribute of the root element.
pub const LANGUAGE: &str = "IPPcode22";

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
const INDENT: &str = "  ";

/// A generic XML element tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
    text: Option<String>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Renders the document: declaration line, two-space indentation,
    /// attributes in insertion order, entity-escaped values and text.
    pub fn render(&self) -> String {
        let mut out = String::from(XML_DECLARATION);
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push_str(INDENT);
        }
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }

        if let Some(text) = &self.text {
            out.push('>');
            out.push_str(&escape(text));
            out.push_str("</");
            out.push_str(&self.name);
            out.push_str(">\n");
        } else if self.children.is_empty() {
            out.push_str("/>\n");
        } else {
            out.push_str(">\n");
            for child in &self.children {
                child.render_into(out, depth + 1);
            }
            for _ in 0..depth {
                out.push_str(INDENT);
            }
            out.push_str("</");
            out.push_str(&self.name);
            out.push_str(">\n");
        }
    }
}

/// Replaces the XML-reserved characters with their entity equivalents.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Maps the program onto the XML tree: one `<instruction>` per entry, one
/// positional `<argN>` per operand.
pub fn project(program: &Program) -> XmlElement {
    let mut root = XmlElement::new("program").with_attribute("language", LANGUAGE);
    for instruction in program.instructions() {
        let mut element = XmlElement::new("instruction")
            .with_attribute("order", instruction.order().to_string())
            .with_attribute("opcode", instruction.opcode());
        for (index, operand) in instruction.operands().iter().enumerate() {
            element.push_child(
                XmlElement::new(format!("arg{}", index + 1))
                    .with_attribute("type", operand.xml_type())
                    .with_text(operand.xml_text()),
            );
        }
        root.push_child(element);
    }
    root
}
