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

//! Generic marshal / unmarshal driver.
//!
//! Generated structs implement [`XmlStruct`]: a [`StructDescriptor`]
//! constant plus two small bodies that move each field through
//! [`FieldWriter`] / [`FieldReader`] by its descriptor index. The
//! driver owns all XML details: namespaces, `xsi:nil`, attribute
//! placement and raw content capture.
//!
//! Child elements are matched by local name only, so responses that
//! use a different prefix or namespace than the request still decode.

use crate::descriptor::FieldDescriptor;
use crate::descriptor::FieldKind;
use crate::descriptor::Occurs;
use crate::descriptor::StructDescriptor;
use crate::error::DecodeError;
use crate::format::add_xml_declaration;
use crate::raw_xml::RawXml;
use crate::text::XmlText;
use crate::xml::escape_text;
use crate::xml::write_attribute;
use crate::xml::write_declaration;
use crate::xml::Element;
use crate::xml::Node;
use crate::XSI_NS;

/// Struct that can be marshalled with the generic driver.
pub trait XmlStruct: Sized {
    /// Serialisation descriptor of the struct.
    const DESCRIPTOR: StructDescriptor;

    /// Write every field through the writer.
    fn write_fields(&self, w: &mut FieldWriter<'_>);

    /// Read every field through the reader.
    ///
    /// # Errors
    ///
    /// Returns error if a required field is missing or has invalid
    /// value.
    fn read_fields(r: &mut FieldReader<'_>) -> Result<Self, DecodeError>;
}

/// Marshal struct as root element.
#[must_use]
pub fn marshal<S: XmlStruct>(value: &S) -> String {
    let mut out = String::new();
    write_element(value, S::DESCRIPTOR.name, S::DESCRIPTOR.namespace, None, &mut out);
    out
}

/// Marshal struct as a complete XML document (with XML declaration).
#[must_use]
pub fn to_document<S: XmlStruct>(value: &S) -> String {
    add_xml_declaration(&marshal(value))
}

/// Unmarshal struct from its root element. Local name of the element
/// must match the descriptor; namespace is not checked.
///
/// # Errors
///
/// Returns error if the element has unexpected name or if any field
/// cannot be decoded.
pub fn unmarshal<S: XmlStruct>(element: &Element) -> Result<S, DecodeError> {
    if element.local_name() != S::DESCRIPTOR.name {
        return Err(DecodeError::UnexpectedElement {
            expected: S::DESCRIPTOR.name,
            found: element.local_name().to_string(),
        });
    }
    read_element(element)
}

/// Parse XML text and unmarshal its root element.
///
/// # Errors
///
/// Returns error if text is not well formed or it cannot be decoded
/// as the struct.
pub fn from_str<S: XmlStruct>(xml: &str) -> Result<S, DecodeError> {
    unmarshal(&Element::parse(xml)?)
}

fn read_element<S: XmlStruct>(element: &Element) -> Result<S, DecodeError> {
    let mut reader = FieldReader::new(element, S::DESCRIPTOR);
    S::read_fields(&mut reader)
}

fn write_element<S: XmlStruct>(
    value: &S,
    name: &str,
    namespace: Option<&str>,
    parent_namespace: Option<&str>,
    out: &mut String,
) {
    let mut writer = FieldWriter::new(S::DESCRIPTOR, namespace);
    value.write_fields(&mut writer);
    open_tag(out, name, namespace, parent_namespace);
    out.push_str(&writer.attributes);
    if writer.content.is_empty() {
        out.push_str("/>");
    } else {
        out.push('>');
        out.push_str(&writer.content);
        close_tag(out, name);
    }
}

/// Write `<name` and a default namespace declaration if the element
/// namespace differs from the one in scope.
fn open_tag(out: &mut String, name: &str, namespace: Option<&str>, in_scope: Option<&str>) {
    out.push('<');
    out.push_str(name);
    if namespace != in_scope {
        write_declaration(out, "", namespace.unwrap_or(""));
    }
}

fn close_tag(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn is_nil(element: &Element) -> bool {
    matches!(
        element.attribute_ns(XSI_NS, "nil").map(str::trim),
        Some("true" | "1")
    )
}

/// Reads fields of one element. Each child element is consumed by at
/// most one field.
pub struct FieldReader<'a> {
    element: &'a Element,
    descriptor: StructDescriptor,
    consumed: Vec<bool>,
}

impl<'a> FieldReader<'a> {
    #[must_use]
    pub fn new(element: &'a Element, descriptor: StructDescriptor) -> Self {
        Self {
            element,
            descriptor,
            consumed: vec![false; element.children.len()],
        }
    }

    /// Element being read.
    #[must_use]
    pub const fn element(&self) -> &'a Element {
        self.element
    }

    /// Required simple value.
    ///
    /// # Errors
    ///
    /// Returns error if the value is absent or invalid.
    pub fn value<T: XmlText>(&mut self, index: usize) -> Result<T, DecodeError> {
        let field = self.descriptor.field(index);
        match field.kind {
            FieldKind::Element => {
                let child = self.take(field.name).ok_or_else(|| self.missing(field))?;
                self.parse(field, &child.text())
            }
            FieldKind::Attribute => {
                let value = self
                    .element
                    .attribute_any_ns(field.name)
                    .ok_or_else(|| self.missing(field))?;
                self.parse(field, value)
            }
            FieldKind::CharData => self.parse(field, &self.element.text()),
            FieldKind::InnerXml => {
                let rest = self.rest();
                self.parse(field, &rest)
            }
        }
    }

    /// Optional simple value. Elements with `xsi:nil="true"` read as
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns error if the value is present but invalid.
    pub fn value_opt<T: XmlText>(&mut self, index: usize) -> Result<Option<T>, DecodeError> {
        let field = self.descriptor.field(index);
        match field.kind {
            FieldKind::Element => match self.take(field.name) {
                Some(child) if !is_nil(child) => self.parse(field, &child.text()).map(Some),
                _ => Ok(None),
            },
            FieldKind::Attribute => self
                .element
                .attribute_any_ns(field.name)
                .map(|value| self.parse(field, value))
                .transpose(),
            FieldKind::CharData => {
                let text = self.element.text();
                if text.is_empty() {
                    Ok(None)
                } else {
                    self.parse(field, &text).map(Some)
                }
            }
            FieldKind::InnerXml => {
                let rest = self.rest();
                if rest.is_empty() {
                    Ok(None)
                } else {
                    self.parse(field, &rest).map(Some)
                }
            }
        }
    }

    /// Repeated simple value.
    ///
    /// # Errors
    ///
    /// Returns error if any of values is invalid.
    pub fn values<T: XmlText>(&mut self, index: usize) -> Result<Vec<T>, DecodeError> {
        let field = self.descriptor.field(index);
        self.take_all(field.name)
            .into_iter()
            .filter(|child| !is_nil(child))
            .map(|child| self.parse(field, &child.text()))
            .collect()
    }

    /// Required nested struct.
    ///
    /// # Errors
    ///
    /// Returns error if the element is absent or cannot be decoded.
    pub fn child<S: XmlStruct>(&mut self, index: usize) -> Result<S, DecodeError> {
        let field = self.descriptor.field(index);
        let child = self.take(field.name).ok_or_else(|| self.missing(field))?;
        read_element(child)
    }

    /// Optional nested struct.
    ///
    /// # Errors
    ///
    /// Returns error if the element is present but cannot be decoded.
    pub fn child_opt<S: XmlStruct>(&mut self, index: usize) -> Result<Option<S>, DecodeError> {
        let field = self.descriptor.field(index);
        match self.take(field.name) {
            Some(child) if !is_nil(child) => read_element(child).map(Some),
            _ => Ok(None),
        }
    }

    /// Repeated nested struct.
    ///
    /// # Errors
    ///
    /// Returns error if any of elements cannot be decoded.
    pub fn children<S: XmlStruct>(&mut self, index: usize) -> Result<Vec<S>, DecodeError> {
        let field = self.descriptor.field(index);
        self.take_all(field.name)
            .into_iter()
            .filter(|child| !is_nil(child))
            .map(read_element)
            .collect()
    }

    /// Raw XML field.
    ///
    /// - `InnerXml`: every child node not claimed by a named element
    ///   field of the struct.
    /// - `Element` with `Many`: all matching elements, each written
    ///   out in full.
    /// - `Element` otherwise: content of the matching element.
    /// - `CharData`: content of the struct element itself.
    ///
    /// # Errors
    ///
    /// Returns error if a required element is absent.
    pub fn raw(&mut self, index: usize) -> Result<RawXml, DecodeError> {
        let field = self.descriptor.field(index);
        match (field.kind, field.occurs) {
            (FieldKind::InnerXml, _) => Ok(RawXml(self.rest())),
            (FieldKind::Element, Occurs::Many) => Ok(RawXml(
                self.take_all(field.name)
                    .into_iter()
                    .map(Element::to_standalone_xml)
                    .collect(),
            )),
            (FieldKind::Element, Occurs::Optional) => Ok(self
                .take(field.name)
                .map(|child| RawXml(child.inner_xml()))
                .unwrap_or_default()),
            (FieldKind::Element, Occurs::One) => self
                .take(field.name)
                .map(|child| RawXml(child.inner_xml()))
                .ok_or_else(|| self.missing(field)),
            (FieldKind::Attribute, _) => Ok(RawXml(
                self.element
                    .attribute_any_ns(field.name)
                    .unwrap_or_default()
                    .to_string(),
            )),
            (FieldKind::CharData, _) => Ok(RawXml(self.element.inner_xml())),
        }
    }

    fn take(&mut self, name: &str) -> Option<&'a Element> {
        let element = self.element;
        for (no, node) in element.children.iter().enumerate() {
            if let Node::Element(child) = node {
                if !self.consumed[no] && child.local_name() == name {
                    self.consumed[no] = true;
                    return Some(child);
                }
            }
        }
        None
    }

    fn take_all(&mut self, name: &str) -> Vec<&'a Element> {
        let mut result = Vec::new();
        while let Some(child) = self.take(name) {
            result.push(child);
        }
        result
    }

    /// Consume every node that does not belong to a named element
    /// field and return it as XML text.
    fn rest(&mut self) -> String {
        let element = self.element;
        let claimed = |name: &str| {
            self.descriptor
                .fields
                .iter()
                .any(|f| f.kind == FieldKind::Element && f.name == name)
        };
        let mut out = String::new();
        let mut taken = Vec::new();
        for (no, node) in element.children.iter().enumerate() {
            if self.consumed[no] {
                continue;
            }
            match node {
                Node::Element(child) if !claimed(child.local_name()) => {
                    out.push_str(&child.to_standalone_xml());
                    taken.push(no);
                }
                Node::Text(_) if !node.is_blank() => {
                    node.write_to(&mut out);
                    taken.push(no);
                }
                Node::CData(_) => {
                    node.write_to(&mut out);
                    taken.push(no);
                }
                _ => (),
            }
        }
        for no in taken {
            self.consumed[no] = true;
        }
        out
    }

    fn parse<T: XmlText>(&self, field: &'static FieldDescriptor, text: &str) -> Result<T, DecodeError> {
        T::from_text(text).map_err(|error| DecodeError::InvalidValue {
            parent: self.descriptor.name,
            field: field.name,
            error,
        })
    }

    fn missing(&self, field: &'static FieldDescriptor) -> DecodeError {
        match field.kind {
            FieldKind::Attribute => DecodeError::MissingAttribute {
                parent: self.descriptor.name,
                name: field.name,
            },
            _ => DecodeError::MissingElement {
                parent: self.descriptor.name,
                name: field.name,
            },
        }
    }
}

/// Collects attributes and content of one element.
pub struct FieldWriter<'a> {
    descriptor: StructDescriptor,
    /// Default namespace in scope inside the element.
    namespace: Option<&'a str>,
    attributes: String,
    content: String,
}

impl<'a> FieldWriter<'a> {
    #[must_use]
    pub fn new(descriptor: StructDescriptor, namespace: Option<&'a str>) -> Self {
        Self {
            descriptor,
            namespace,
            attributes: String::new(),
            content: String::new(),
        }
    }

    /// Simple value.
    pub fn value<T: XmlText>(&mut self, index: usize, value: &T) {
        let field = self.descriptor.field(index);
        match field.kind {
            FieldKind::Element => {
                let text = value.to_text();
                open_tag(&mut self.content, field.name, field.namespace, self.namespace);
                if text.is_empty() {
                    self.content.push_str("/>");
                } else {
                    self.content.push('>');
                    self.content.push_str(&escape_text(&text));
                    close_tag(&mut self.content, field.name);
                }
            }
            FieldKind::Attribute => write_attribute(&mut self.attributes, field.name, &value.to_text()),
            FieldKind::CharData => self.content.push_str(&escape_text(&value.to_text())),
            FieldKind::InnerXml => self.content.push_str(&value.to_text()),
        }
    }

    /// Optional simple value; `None` is omitted.
    pub fn value_opt<T: XmlText>(&mut self, index: usize, value: Option<&T>) {
        if let Some(value) = value {
            self.value(index, value);
        }
    }

    /// Repeated simple value.
    pub fn values<T: XmlText>(&mut self, index: usize, values: &[T]) {
        for value in values {
            self.value(index, value);
        }
    }

    /// Nested struct.
    pub fn child<S: XmlStruct>(&mut self, index: usize, value: &S) {
        let field = self.descriptor.field(index);
        write_element(value, field.name, field.namespace, self.namespace, &mut self.content);
    }

    /// Optional nested struct; `None` is omitted.
    pub fn child_opt<S: XmlStruct>(&mut self, index: usize, value: Option<&S>) {
        if let Some(value) = value {
            self.child(index, value);
        }
    }

    /// Repeated nested struct.
    pub fn children<S: XmlStruct>(&mut self, index: usize, values: &[S]) {
        for value in values {
            self.child(index, value);
        }
    }

    /// Raw XML field, mirror of [`FieldReader::raw`].
    pub fn raw(&mut self, index: usize, value: &RawXml) {
        let field = self.descriptor.field(index);
        match (field.kind, field.occurs) {
            (FieldKind::InnerXml | FieldKind::CharData, _) | (FieldKind::Element, Occurs::Many) => {
                self.content.push_str(value.as_str());
            }
            (FieldKind::Element, Occurs::Optional) if value.is_empty() => (),
            (FieldKind::Element, _) => {
                open_tag(&mut self.content, field.name, field.namespace, self.namespace);
                if value.as_str().is_empty() {
                    self.content.push_str("/>");
                } else {
                    self.content.push('>');
                    self.content.push_str(value.as_str());
                    close_tag(&mut self.content, field.name);
                }
            }
            (FieldKind::Attribute, _) => {
                write_attribute(&mut self.attributes, field.name, value.as_str());
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Item {
        id: i32,
        label: Option<String>,
        tags: Vec<String>,
    }

    impl XmlStruct for Item {
        const DESCRIPTOR: StructDescriptor = StructDescriptor {
            name: "item",
            namespace: None,
            fields: &[
                FieldDescriptor {
                    name: "id",
                    namespace: None,
                    kind: FieldKind::Attribute,
                    occurs: Occurs::One,
                },
                FieldDescriptor {
                    name: "label",
                    namespace: Some("urn:orders"),
                    kind: FieldKind::Element,
                    occurs: Occurs::Optional,
                },
                FieldDescriptor {
                    name: "tag",
                    namespace: None,
                    kind: FieldKind::Element,
                    occurs: Occurs::Many,
                },
            ],
        };

        fn write_fields(&self, w: &mut FieldWriter<'_>) {
            w.value(0, &self.id);
            w.value_opt(1, self.label.as_ref());
            w.values(2, &self.tags);
        }

        fn read_fields(r: &mut FieldReader<'_>) -> Result<Self, DecodeError> {
            Ok(Self {
                id: r.value(0)?,
                label: r.value_opt(1)?,
                tags: r.values(2)?,
            })
        }
    }

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Order {
        items: Vec<Item>,
        note: Option<Box<Item>>,
        extra: RawXml,
    }

    impl XmlStruct for Order {
        const DESCRIPTOR: StructDescriptor = StructDescriptor {
            name: "Order",
            namespace: Some("urn:orders"),
            fields: &[
                FieldDescriptor {
                    name: "item",
                    namespace: Some("urn:orders"),
                    kind: FieldKind::Element,
                    occurs: Occurs::Many,
                },
                FieldDescriptor {
                    name: "note",
                    namespace: None,
                    kind: FieldKind::Element,
                    occurs: Occurs::Optional,
                },
                FieldDescriptor {
                    name: "",
                    namespace: None,
                    kind: FieldKind::InnerXml,
                    occurs: Occurs::One,
                },
            ],
        };

        fn write_fields(&self, w: &mut FieldWriter<'_>) {
            w.children(0, &self.items);
            w.child_opt(1, self.note.as_deref());
            w.raw(2, &self.extra);
        }

        fn read_fields(r: &mut FieldReader<'_>) -> Result<Self, DecodeError> {
            Ok(Self {
                extra: r.raw(2)?,
                items: r.children(0)?,
                note: r.child_opt(1)?.map(Box::new),
            })
        }
    }

    #[test]
    fn writes_attributes_elements_and_namespaces() {
        let order = Order {
            items: vec![Item {
                id: 7,
                label: Some("a & b".into()),
                tags: vec!["x".into(), "y".into()],
            }],
            note: Some(Box::new(Item::default())),
            extra: RawXml::new("<ext>1</ext>"),
        };
        assert_eq!(
            marshal(&order),
            concat!(
                r#"<Order xmlns="urn:orders">"#,
                r#"<item id="7"><label>a &amp; b</label><tag xmlns="">x</tag><tag xmlns="">y</tag></item>"#,
                r#"<note xmlns="" id="0"/>"#,
                "<ext>1</ext>",
                "</Order>"
            )
        );
    }

    #[test]
    fn round_trip_preserves_value() {
        let order = Order {
            items: vec![
                Item {
                    id: 1,
                    label: None,
                    tags: vec![],
                },
                Item {
                    id: -2,
                    label: Some("second".into()),
                    tags: vec!["t".into()],
                },
            ],
            note: None,
            extra: RawXml::new(r#"<ext xmlns="urn:orders">1</ext>"#),
        };
        let decoded: Order = from_str(&marshal(&order)).unwrap();
        assert_eq!(decoded, order);
    }

    #[test]
    fn inner_xml_skips_claimed_elements_in_any_order() {
        let decoded: Order =
            from_str(r#"<Order><extra/><item id="1"/><more>t</more></Order>"#).unwrap();
        assert_eq!(decoded.items.len(), 1);
        assert_eq!(decoded.extra.as_str(), "<extra/><more>t</more>");
    }

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Memo {
        first: String,
        any: RawXml,
        last: String,
    }

    impl XmlStruct for Memo {
        const DESCRIPTOR: StructDescriptor = StructDescriptor {
            name: "memo",
            namespace: None,
            fields: &[
                FieldDescriptor {
                    name: "first",
                    namespace: None,
                    kind: FieldKind::Element,
                    occurs: Occurs::One,
                },
                FieldDescriptor {
                    name: "",
                    namespace: None,
                    kind: FieldKind::InnerXml,
                    occurs: Occurs::Many,
                },
                FieldDescriptor {
                    name: "last",
                    namespace: None,
                    kind: FieldKind::Element,
                    occurs: Occurs::One,
                },
            ],
        };

        fn write_fields(&self, w: &mut FieldWriter<'_>) {
            w.value(0, &self.first);
            w.raw(1, &self.any);
            w.value(2, &self.last);
        }

        fn read_fields(r: &mut FieldReader<'_>) -> Result<Self, DecodeError> {
            Ok(Self {
                first: r.value(0)?,
                any: r.raw(1)?,
                last: r.value(2)?,
            })
        }
    }

    #[test]
    fn inner_xml_between_elements_is_written_in_place() {
        let memo = Memo {
            first: "a".into(),
            any: RawXml::new("<x>1</x>"),
            last: "b".into(),
        };
        let xml = marshal(&memo);
        assert_eq!(xml, "<memo><first>a</first><x>1</x><last>b</last></memo>");
        assert_eq!(from_str::<Memo>(&xml), Ok(memo));
    }

    #[test]
    fn nil_optional_reads_as_none() {
        let item: Item = from_str(
            r#"<item xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" id="3"><label xsi:nil="true"/></item>"#,
        )
        .unwrap();
        assert_eq!(item.label, None);
    }

    #[test]
    fn missing_and_invalid_values_are_reported() {
        assert_eq!(
            from_str::<Item>("<item/>"),
            Err(DecodeError::MissingAttribute {
                parent: "item",
                name: "id"
            })
        );
        assert!(matches!(
            from_str::<Item>(r#"<item id="x"/>"#),
            Err(DecodeError::InvalidValue { field: "id", .. })
        ));
        assert!(matches!(
            from_str::<Item>(r#"<other id="1"/>"#),
            Err(DecodeError::UnexpectedElement { .. })
        ));
    }

    #[test]
    fn matches_children_by_local_name() {
        let item: Item =
            from_str(r#"<p:item xmlns:p="urn:other" id="1"><p:label>l</p:label></p:item>"#).unwrap();
        assert_eq!(item.label.as_deref(), Some("l"));
    }
}
