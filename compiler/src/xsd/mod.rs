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

//! XML Schema 1.0 document model.
//!
//! Entities are created by the [`parser`] and are immutable
//! afterwards. A schema owns its top-level components; references
//! between components are kept as resolved [`QName`]s and looked up
//! through the compiler's schema context.
//!
//! # Notes
//!
//! `xs:redefine` and substitution groups are not modeled. `xs:include`
//! and `xs:import` are recorded but not followed.

/// Built-in datatypes.
pub mod builtin;

/// XSD document parser.
pub mod parser;

use crate::qname::QName;
use tagged_types::TaggedType;

#[doc(inline)]
pub use builtin::BuiltinType;

/// Element or attribute may carry `xsi:nil`.
pub type IsNillable = TaggedType<bool, IsNillableTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy, PartialEq, Eq)]
#[transparent(Debug)]
#[capability(inner_access)]
pub enum IsNillableTag {}

/// Complex type allows character data between child elements.
pub type IsMixed = TaggedType<bool, IsMixedTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy, PartialEq, Eq)]
#[transparent(Debug)]
#[capability(inner_access)]
pub enum IsMixedTag {}

/// Complex type cannot be used directly.
pub type IsAbstract = TaggedType<bool, IsAbstractTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy, PartialEq, Eq)]
#[transparent(Debug)]
#[capability(inner_access)]
pub enum IsAbstractTag {}

/// `elementFormDefault` / `attributeFormDefault` / `form`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Qualified,
    Unqualified,
}

impl Default for Form {
    fn default() -> Self {
        Self::Unqualified
    }
}

/// `maxOccurs` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxOccurs {
    Bounded(u64),
    Unbounded,
}

impl MaxOccurs {
    /// More than one occurrence is allowed.
    #[must_use]
    pub const fn is_many(self) -> bool {
        match self {
            Self::Bounded(n) => n > 1,
            Self::Unbounded => true,
        }
    }
}

impl Default for MaxOccurs {
    fn default() -> Self {
        Self::Bounded(1)
    }
}

/// `minOccurs` / `maxOccurs` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub min: u64,
    pub max: MaxOccurs,
}

impl Occurrence {
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.min == 0
    }

    #[must_use]
    pub const fn is_many(&self) -> bool {
        self.max.is_many()
    }
}

impl Default for Occurrence {
    fn default() -> Self {
        Self {
            min: 1,
            max: MaxOccurs::default(),
        }
    }
}

/// Text of `xs:annotation/xs:documentation`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub documentation: Vec<String>,
}

impl Annotation {
    /// Documentation paragraphs joined into one text, `None` if there
    /// is nothing but whitespace.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let text = self
            .documentation
            .iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        Some(text).filter(|t| !t.is_empty())
    }
}

/// XML Schema document.
#[derive(Debug, Default)]
pub struct Schema {
    pub target_namespace: Option<String>,
    pub element_form_default: Form,
    pub attribute_form_default: Form,
    pub imports: Vec<Import>,
    pub includes: Vec<Include>,
    pub elements: Vec<Element>,
    pub complex_types: Vec<ComplexType>,
    pub simple_types: Vec<SimpleType>,
    pub attributes: Vec<Attribute>,
    pub attribute_groups: Vec<AttributeGroup>,
    pub groups: Vec<Group>,
    pub annotations: Vec<Annotation>,
}

impl Schema {
    /// Schema declares no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
            && self.complex_types.is_empty()
            && self.simple_types.is_empty()
            && self.attributes.is_empty()
            && self.groups.is_empty()
            && self.attribute_groups.is_empty()
    }
}

/// `xs:import`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub namespace: Option<String>,
    pub schema_location: Option<String>,
}

/// `xs:include`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    pub schema_location: String,
}

/// `xs:element`, either top-level declaration or local particle.
#[derive(Debug)]
pub struct Element {
    /// Absent for references.
    pub name: Option<String>,
    pub type_name: Option<QName>,
    pub ref_name: Option<QName>,
    pub occurs: Occurrence,
    pub nillable: IsNillable,
    pub default: Option<String>,
    pub fixed: Option<String>,
    pub form: Option<Form>,
    pub complex_type: Option<Box<ComplexType>>,
    pub simple_type: Option<Box<SimpleType>>,
    pub annotation: Option<Annotation>,
    /// Byte offset of the declaration.
    pub position: u64,
}

/// What defines the shape of an element. Exactly one applies.
#[derive(Debug, Clone, Copy)]
pub enum ElementShape<'a> {
    Type(&'a QName),
    Ref(&'a QName),
    Complex(&'a ComplexType),
    Simple(&'a SimpleType),
    Untyped,
}

impl Element {
    /// Name of declared element, or local name of referenced one.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.name
            .as_deref()
            .or_else(|| self.ref_name.as_ref().map(|r| r.local.as_str()))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn shape(&self) -> ElementShape<'_> {
        if let Some(r) = &self.ref_name {
            ElementShape::Ref(r)
        } else if let Some(t) = &self.type_name {
            ElementShape::Type(t)
        } else if let Some(ct) = &self.complex_type {
            ElementShape::Complex(ct)
        } else if let Some(st) = &self.simple_type {
            ElementShape::Simple(st)
        } else {
            ElementShape::Untyped
        }
    }
}

/// `xs:complexType`, named or anonymous.
#[derive(Debug)]
pub struct ComplexType {
    pub name: Option<String>,
    pub mixed: IsMixed,
    pub is_abstract: IsAbstract,
    pub final_derivation: Option<String>,
    pub model: Option<ModelGroup>,
    pub attributes: Vec<Attribute>,
    pub attribute_groups: Vec<QName>,
    pub any_attribute: Option<AnyAttribute>,
    pub content: Option<Content>,
    pub annotation: Option<Annotation>,
}

/// Content model of complex type or group.
#[derive(Debug)]
pub enum ModelGroup {
    Sequence(Compositor),
    Choice(Compositor),
    All(Compositor),
    Group(GroupRef),
}

/// Particles of `xs:sequence`, `xs:choice` or `xs:all` in document
/// order.
#[derive(Debug, Default)]
pub struct Compositor {
    pub occurs: Occurrence,
    pub particles: Vec<Particle>,
}

#[derive(Debug)]
pub enum Particle {
    Element(Element),
    Sequence(Compositor),
    Choice(Compositor),
    Group(GroupRef),
    Any(Any),
}

/// Reference to a named model group.
#[derive(Debug)]
pub struct GroupRef {
    pub ref_name: QName,
    pub occurs: Occurrence,
}

/// `xs:simpleContent` or `xs:complexContent`.
#[derive(Debug)]
pub enum Content {
    Simple(Derivation),
    Complex(Derivation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivationKind {
    Extension,
    Restriction,
}

/// `xs:extension` / `xs:restriction` inside content.
#[derive(Debug)]
pub struct Derivation {
    pub kind: DerivationKind,
    pub base: QName,
    pub model: Option<ModelGroup>,
    pub attributes: Vec<Attribute>,
    pub attribute_groups: Vec<QName>,
    pub any_attribute: Option<AnyAttribute>,
    /// Facets of simple content restriction.
    pub facets: Facets,
}

/// `xs:simpleType`, named or anonymous.
#[derive(Debug, Default)]
pub struct SimpleType {
    pub name: Option<String>,
    pub variety: Option<SimpleVariety>,
    pub annotation: Option<Annotation>,
}

impl SimpleType {
    /// Enumeration values, empty unless type is an enumeration
    /// restriction.
    #[must_use]
    pub fn enumeration(&self) -> &[String] {
        match &self.variety {
            Some(SimpleVariety::Restriction(r)) => &r.facets.enumeration,
            _ => &[],
        }
    }
}

#[derive(Debug)]
pub enum SimpleVariety {
    Restriction(Restriction),
    List(List),
    Union(Union),
}

#[derive(Debug, Default)]
pub struct Restriction {
    pub base: Option<QName>,
    pub simple_type: Option<Box<SimpleType>>,
    pub facets: Facets,
}

#[derive(Debug, Default)]
pub struct List {
    pub item_type: Option<QName>,
    pub simple_type: Option<Box<SimpleType>>,
}

#[derive(Debug, Default)]
pub struct Union {
    pub member_types: Vec<QName>,
    pub simple_types: Vec<SimpleType>,
}

/// Constraining facets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub enumeration: Vec<String>,
    pub pattern: Vec<String>,
    pub min_inclusive: Option<String>,
    pub max_inclusive: Option<String>,
    pub min_exclusive: Option<String>,
    pub max_exclusive: Option<String>,
    pub length: Option<u64>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub white_space: Option<String>,
    pub total_digits: Option<u64>,
    pub fraction_digits: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeUse {
    Optional,
    Prohibited,
    Required,
}

impl Default for AttributeUse {
    fn default() -> Self {
        Self::Optional
    }
}

/// `xs:attribute`.
#[derive(Debug, Default)]
pub struct Attribute {
    /// Absent for references.
    pub name: Option<String>,
    pub type_name: Option<QName>,
    pub ref_name: Option<QName>,
    pub use_: AttributeUse,
    pub default: Option<String>,
    pub fixed: Option<String>,
    pub form: Option<Form>,
    pub simple_type: Option<Box<SimpleType>>,
    pub annotation: Option<Annotation>,
}

impl Attribute {
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.name
            .as_deref()
            .or_else(|| self.ref_name.as_ref().map(|r| r.local.as_str()))
            .unwrap_or_default()
    }
}

/// Named `xs:group`.
#[derive(Debug)]
pub struct Group {
    pub name: String,
    pub model: Option<ModelGroup>,
    pub annotation: Option<Annotation>,
}

/// Named `xs:attributeGroup`.
#[derive(Debug, Default)]
pub struct AttributeGroup {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub attribute_groups: Vec<QName>,
    pub any_attribute: Option<AnyAttribute>,
}

/// `namespace` of wildcards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceConstraint {
    Any,
    Other,
    /// URIs, `##local` and `##targetNamespace` tokens.
    List(Vec<String>),
}

impl NamespaceConstraint {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "##any" => Self::Any,
            "##other" => Self::Other,
            list => Self::List(list.split_whitespace().map(ToString::to_string).collect()),
        }
    }
}

impl Default for NamespaceConstraint {
    fn default() -> Self {
        Self::Any
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessContents {
    Strict,
    Lax,
    Skip,
}

impl Default for ProcessContents {
    fn default() -> Self {
        Self::Strict
    }
}

/// `xs:any`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Any {
    pub namespace: NamespaceConstraint,
    pub process_contents: ProcessContents,
    pub occurs: Occurrence,
}

/// `xs:anyAttribute`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnyAttribute {
    pub namespace: NamespaceConstraint,
    pub process_contents: ProcessContents,
}
