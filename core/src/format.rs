// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::xml::escape_text;
use crate::xml::write_attribute;
use crate::xml::write_declaration;
use crate::xml::Element;
use crate::xml::Node;
use crate::xml::XmlError;

/// Declaration added by [`add_xml_declaration`].
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

const INDENT: &str = "  ";

/// Prepend XML declaration unless the document already starts with
/// one. Applying it twice gives the same result as applying it once.
#[must_use]
pub fn add_xml_declaration(xml: &str) -> String {
    if xml.trim_start().starts_with("<?xml") {
        xml.to_string()
    } else {
        format!("{XML_DECLARATION}\n{xml}")
    }
}

/// Remove leading XML declaration, if any.
#[must_use]
pub fn strip_xml_declaration(xml: &str) -> &str {
    let trimmed = xml.trim_start();
    if trimmed.starts_with("<?xml") {
        if let Some(end) = trimmed.find("?>") {
            return trimmed[end + 2..].trim_start();
        }
    }
    xml
}

/// Pretty-print XML with two-space indentation. Elements that contain
/// only character data stay on one line; whitespace-only text between
/// elements is dropped. A leading XML declaration is kept.
///
/// # Errors
///
/// Returns error if input is not well formed.
pub fn format_xml(xml: &str) -> Result<String, XmlError> {
    let body = strip_xml_declaration(xml);
    let mut out = String::new();
    if body.len() != xml.len() {
        let trimmed = xml.trim_start();
        out.push_str(trimmed[..trimmed.len() - body.len()].trim_end());
        out.push('\n');
    }
    for node in Element::parse_fragment(body)? {
        write_node(&node, 0, &mut out);
    }
    Ok(out)
}

fn write_node(node: &Node, depth: usize, out: &mut String) {
    if node.is_blank() {
        return;
    }
    out.push_str(&INDENT.repeat(depth));
    match node {
        Node::Element(e) => write_element(e, depth, out),
        Node::Text(text) => out.push_str(&escape_text(text.trim())),
        other => other.write_to(out),
    }
    out.push('\n');
}

fn write_element(e: &Element, depth: usize, out: &mut String) {
    let name = e.name.to_string();
    out.push('<');
    out.push_str(&name);
    for (prefix, uri) in &e.declarations {
        write_declaration(out, prefix, uri);
    }
    for attr in &e.attributes {
        write_attribute(out, &attr.name.to_string(), &attr.value);
    }
    let content = e.children.iter().filter(|n| !n.is_blank()).collect::<Vec<_>>();
    if content.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    if content.iter().all(|n| matches!(n, Node::Text(_) | Node::CData(_))) {
        for node in &e.children {
            node.write_to(out);
        }
    } else {
        out.push('\n');
        for node in content {
            write_node(node, depth + 1, out);
        }
        out.push_str(&INDENT.repeat(depth));
    }
    out.push_str("</");
    out.push_str(&name);
    out.push('>');
}
