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

//! Namespace-aware XML tree.
//!
//! Documents are read with the `quick-xml` event reader and turned into
//! a tree of [`Element`] values. Every element keeps the namespace
//! bindings visible at its position, so QName-valued attributes
//! (`type="tns:Foo"`) can be resolved long after parsing and subtrees
//! can be written back out as standalone fragments.

use crate::XML_NS;
use quick_xml::escape::escape;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::sync::Arc;

/// Malformed XML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlError {
    /// Byte offset in the input where the problem was detected.
    pub position: u64,
    pub message: String,
}

impl XmlError {
    #[must_use]
    pub fn new(position: u64, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

impl Display for XmlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "malformed XML at byte {}: {}", self.position, self.message)
    }
}

impl StdError for XmlError {}

/// Name as it was written in the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XmlName {
    pub prefix: Option<String>,
    pub local: String,
}

impl XmlName {
    /// Split `prefix:local`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((prefix, local)) => Self {
                prefix: Some(prefix.to_string()),
                local: local.to_string(),
            },
            None => Self {
                prefix: None,
                local: raw.to_string(),
            },
        }
    }
}

impl Display for XmlName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.prefix {
            Some(prefix) => write!(f, "{prefix}:{}", self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// Namespace bindings visible at some element.
///
/// Prefix `""` denotes the default namespace. Binding the default
/// namespace to `""` undeclares it.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NamespaceScope {
    parent: Option<Arc<NamespaceScope>>,
    bindings: Vec<(String, String)>,
}

impl NamespaceScope {
    /// Resolve prefix to namespace URI.
    #[must_use]
    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some(XML_NS);
        }
        match self.bindings.iter().rev().find(|(p, _)| p == prefix) {
            Some((_, uri)) if uri.is_empty() => None,
            Some((_, uri)) => Some(uri),
            None => self.parent.as_deref().and_then(|p| p.resolve(prefix)),
        }
    }

    /// All bindings in effect, innermost declaration wins. Sorted by
    /// prefix.
    #[must_use]
    pub fn bindings(&self) -> Vec<(&str, &str)> {
        let mut all = BTreeMap::new();
        let mut scope = Some(self);
        while let Some(current) = scope {
            for (prefix, uri) in current.bindings.iter().rev() {
                all.entry(prefix.as_str()).or_insert(uri.as_str());
            }
            scope = current.parent.as_deref();
        }
        all.into_iter().filter(|(_, uri)| !uri.is_empty()).collect()
    }
}

/// Attribute of an element. Namespace declarations are not attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: XmlName,
    /// Resolved namespace; unprefixed attributes have none.
    pub namespace: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
}

impl Node {
    /// Write node as XML text.
    pub fn write_to(&self, out: &mut String) {
        match self {
            Self::Element(e) => e.write_to(out),
            Self::Text(text) => out.push_str(&escape(text.as_str())),
            Self::CData(text) => {
                out.push_str("<![CDATA[");
                out.push_str(text);
                out.push_str("]]>");
            }
            Self::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
        }
    }

    /// Node is text consisting of whitespace only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

/// XML element with its resolved namespace.
#[derive(Debug, Clone)]
pub struct Element {
    pub name: XmlName,
    pub namespace: Option<String>,
    pub attributes: Vec<Attribute>,
    /// `xmlns` declarations made on this element.
    pub declarations: Vec<(String, String)>,
    pub children: Vec<Node>,
    /// Byte offset of the start tag.
    pub position: u64,
    scope: Arc<NamespaceScope>,
}

impl Element {
    /// Parse document that contains exactly one root element.
    ///
    /// # Errors
    ///
    /// Returns error if the document is not well formed or if it
    /// contains no root or more than one root element.
    pub fn parse(xml: &str) -> Result<Self, XmlError> {
        let mut root = None;
        for node in parse_nodes(xml)? {
            match node {
                Node::Element(e) => {
                    if root.is_some() {
                        return Err(XmlError::new(e.position, "more than one root element"));
                    }
                    root = Some(e);
                }
                Node::Text(text) if !text.trim().is_empty() => {
                    return Err(XmlError::new(0, "text outside of root element"));
                }
                _ => (),
            }
        }
        root.ok_or_else(|| XmlError::new(0, "no root element"))
    }

    /// Parse a fragment. Any number of top-level elements and text
    /// nodes are allowed.
    ///
    /// # Errors
    ///
    /// Returns error if the fragment is not well formed.
    pub fn parse_fragment(xml: &str) -> Result<Vec<Node>, XmlError> {
        parse_nodes(xml)
    }

    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.name.local
    }

    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Element has given namespace and local name.
    #[must_use]
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.name.local == local && self.namespace() == Some(namespace)
    }

    /// Unqualified attribute value.
    #[must_use]
    pub fn attribute(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.is_none() && a.name.local == local)
            .map(|a| a.value.as_str())
    }

    /// Namespace-qualified attribute value.
    #[must_use]
    pub fn attribute_ns(&self, namespace: &str, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.as_deref() == Some(namespace) && a.name.local == local)
            .map(|a| a.value.as_str())
    }

    /// Attribute value matched by local name only.
    #[must_use]
    pub fn attribute_any_ns(&self, local: &str) -> Option<&str> {
        self.attribute(local).or_else(|| {
            self.attributes
                .iter()
                .find(|a| a.name.local == local)
                .map(|a| a.value.as_str())
        })
    }

    /// Child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Concatenated character data of direct children.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|n| match n {
                Node::Text(text) | Node::CData(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Namespace bindings visible at this element.
    #[must_use]
    pub fn scope(&self) -> &NamespaceScope {
        &self.scope
    }

    /// Resolve prefix (`None` for the default namespace).
    #[must_use]
    pub fn resolve_prefix(&self, prefix: Option<&str>) -> Option<&str> {
        self.scope.resolve(prefix.unwrap_or(""))
    }

    /// Resolve QName-valued content (`tns:Foo`, `Foo`) into namespace
    /// and local name. Unprefixed names take the default namespace.
    #[must_use]
    pub fn resolve_qname(&self, value: &str) -> (Option<String>, String) {
        let name = XmlName::parse(value.trim());
        let namespace = self
            .resolve_prefix(name.prefix.as_deref())
            .map(ToString::to_string);
        (namespace, name.local)
    }

    /// Write element as it appears in the document.
    pub fn write_to(&self, out: &mut String) {
        self.write_with(out, &[]);
    }

    /// Write element with every namespace binding it depends on
    /// declared on itself, so the result can be parsed on its own.
    #[must_use]
    pub fn to_standalone_xml(&self) -> String {
        let mut used = BTreeSet::new();
        self.collect_prefixes(&mut used);
        let inherited = self
            .scope
            .bindings()
            .into_iter()
            .filter(|(prefix, _)| used.contains(prefix))
            .filter(|(prefix, _)| !self.declarations.iter().any(|(p, _)| p == prefix))
            .collect::<Vec<_>>();
        let mut out = String::new();
        self.write_with(&mut out, &inherited);
        out
    }

    /// Prefixes the subtree may depend on: prefixes of element and
    /// attribute names and of QName-like attribute values and text.
    fn collect_prefixes<'s>(&'s self, used: &mut BTreeSet<&'s str>) {
        used.insert(self.name.prefix.as_deref().unwrap_or(""));
        for attr in &self.attributes {
            if let Some(prefix) = &attr.name.prefix {
                used.insert(prefix.as_str());
            }
            if let Some((prefix, _)) = attr.value.trim().split_once(':') {
                used.insert(prefix);
            }
        }
        for child in &self.children {
            match child {
                Node::Element(e) => e.collect_prefixes(used),
                Node::Text(text) => {
                    if let Some((prefix, _)) = text.trim().split_once(':') {
                        used.insert(prefix);
                    }
                }
                _ => (),
            }
        }
    }

    /// Content of the element as standalone XML fragment.
    #[must_use]
    pub fn inner_xml(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Element(e) => out.push_str(&e.to_standalone_xml()),
                other => other.write_to(&mut out),
            }
        }
        out
    }

    fn write_with(&self, out: &mut String, extra: &[(&str, &str)]) {
        out.push('<');
        out.push_str(&self.name.to_string());
        for (prefix, uri) in extra {
            write_declaration(out, prefix, uri);
        }
        for (prefix, uri) in &self.declarations {
            write_declaration(out, prefix, uri);
        }
        for attr in &self.attributes {
            write_attribute(out, &attr.name.to_string(), &attr.value);
        }
        if self.children.is_empty() {
            out.push_str("/>");
        } else {
            out.push('>');
            for child in &self.children {
                child.write_to(out);
            }
            out.push_str("</");
            out.push_str(&self.name.to_string());
            out.push('>');
        }
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut out = String::new();
        self.write_to(&mut out);
        f.write_str(&out)
    }
}

/// Write ` name="value"` with value escaped.
pub fn write_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

/// Write namespace declaration. Empty prefix declares default namespace.
pub fn write_declaration(out: &mut String, prefix: &str, uri: &str) {
    if prefix.is_empty() {
        write_attribute(out, "xmlns", uri);
    } else {
        write_attribute(out, &format!("xmlns:{prefix}"), uri);
    }
}

/// Escape character data.
#[must_use]
pub fn escape_text(text: &str) -> String {
    escape(text).into_owned()
}

#[allow(clippy::cast_possible_truncation)]
fn parse_nodes(xml: &str) -> Result<Vec<Node>, XmlError> {
    let mut reader = Reader::from_str(xml);
    let root_scope = Arc::new(NamespaceScope::default());
    let mut stack: Vec<Element> = Vec::new();
    let mut top = Vec::new();
    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|e| XmlError::new(reader.buffer_position() as u64, e.to_string()))?;
        match event {
            Event::Start(start) => {
                let scope = stack
                    .last()
                    .map_or_else(|| root_scope.clone(), |parent| parent.scope.clone());
                stack.push(start_element(&start, scope, position)?);
            }
            Event::Empty(start) => {
                let scope = stack
                    .last()
                    .map_or_else(|| root_scope.clone(), |parent| parent.scope.clone());
                let element = start_element(&start, scope, position)?;
                append(&mut stack, &mut top, Node::Element(element));
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError::new(position, "unexpected end tag"))?;
                append(&mut stack, &mut top, Node::Element(element));
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| XmlError::new(position, e.to_string()))?;
                if !text.is_empty() {
                    append(&mut stack, &mut top, Node::Text(text.into_owned()));
                }
            }
            Event::CData(data) => {
                let text = String::from_utf8(data.into_inner().into_owned())
                    .map_err(|e| XmlError::new(position, e.to_string()))?;
                append(&mut stack, &mut top, Node::CData(text));
            }
            Event::Comment(comment) => {
                let text = String::from_utf8(comment.into_inner().into_owned())
                    .map_err(|e| XmlError::new(position, e.to_string()))?;
                append(&mut stack, &mut top, Node::Comment(text));
            }
            Event::Eof => break,
            // Declaration, processing instructions and DTD carry
            // nothing for the tree.
            _ => (),
        }
    }
    if let Some(open) = stack.last() {
        return Err(XmlError::new(
            open.position,
            format!("element <{}> is not closed", open.name),
        ));
    }
    Ok(top)
}

fn append(stack: &mut [Element], top: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => top.push(node),
    }
}

fn start_element(
    start: &BytesStart<'_>,
    parent: Arc<NamespaceScope>,
    position: u64,
) -> Result<Element, XmlError> {
    let qname = start.name();
    let raw_name = std::str::from_utf8(qname.as_ref())
        .map_err(|e| XmlError::new(position, e.to_string()))?;
    let name = XmlName::parse(raw_name);
    let mut declarations = Vec::new();
    let mut raw_attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::new(position, e.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| XmlError::new(position, e.to_string()))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError::new(position, e.to_string()))?
            .into_owned();
        if key == "xmlns" {
            declarations.push((String::new(), value));
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            declarations.push((prefix.to_string(), value));
        } else {
            raw_attributes.push((XmlName::parse(&key), value));
        }
    }
    let scope = if declarations.is_empty() {
        parent
    } else {
        Arc::new(NamespaceScope {
            parent: Some(parent),
            bindings: declarations.clone(),
        })
    };
    let namespace = resolve_name_prefix(&scope, &name, position)?;
    let attributes = raw_attributes
        .into_iter()
        .map(|(name, value)| {
            let namespace = if name.prefix.is_some() {
                resolve_name_prefix(&scope, &name, position)?
            } else {
                None
            };
            Ok(Attribute {
                name,
                namespace,
                value,
            })
        })
        .collect::<Result<Vec<_>, XmlError>>()?;
    Ok(Element {
        name,
        namespace,
        attributes,
        declarations,
        children: Vec::new(),
        position,
        scope,
    })
}

fn resolve_name_prefix(
    scope: &NamespaceScope,
    name: &XmlName,
    position: u64,
) -> Result<Option<String>, XmlError> {
    match &name.prefix {
        Some(prefix) => scope
            .resolve(prefix)
            .map(|uri| Some(uri.to_string()))
            .ok_or_else(|| XmlError::new(position, format!("undeclared prefix `{prefix}`"))),
        None => Ok(scope.resolve("").map(ToString::to_string)),
    }
}
