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

//! Anonymous (inline) complex types and enumerations.
//!
//! Inline types are identified by their node in the schema model.
//! They are named `Outer_Inner` after the enclosing declaration and
//! the declaring element or attribute; types nested in inline types
//! carry the whole chain (`Outer_Inner_Deep`). Inline
//! complex types that only wrap wildcards or untyped elements are not
//! emitted at all; fields of such a type capture raw XML.

use crate::compiler::type_registry::TypeRegistry;
use crate::generator::casemungler::to_pascal;
use crate::xsd::Annotation;
use crate::xsd::ComplexType;
use crate::xsd::ElementShape;
use crate::xsd::ModelGroup;
use crate::xsd::Particle;
use crate::xsd::Schema;
use crate::xsd::SimpleType;
use std::collections::HashMap;

/// Inline complex type emitted as a struct.
#[derive(Debug)]
pub struct AnonymousStruct<'a> {
    pub name: String,
    /// Local name of the declaring element.
    pub xml_name: String,
    pub complex_type: &'a ComplexType,
    pub schema: &'a Schema,
}

/// Inline enumeration emitted as a string newtype.
#[derive(Debug)]
pub struct InlineEnum<'a> {
    pub name: String,
    pub xml_name: String,
    pub values: &'a [String],
    pub annotation: Option<&'a Annotation>,
}

/// How a field of an inline complex type is represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnonymousType<'r> {
    Struct(&'r str),
    RawXml,
}

#[derive(Debug, Default)]
pub struct AnonymousTypes<'a> {
    structs: Vec<AnonymousStruct<'a>>,
    by_type: HashMap<*const ComplexType, Option<usize>>,
    enums: Vec<InlineEnum<'a>>,
    enum_by_type: HashMap<*const SimpleType, usize>,
}

impl<'a> AnonymousTypes<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register inline complex type declared by element `child` inside
    /// the declaration with type-name prefix `parent`. Returns `true` when the type is new
    /// and is emitted as a struct, so that its own inline types have
    /// to be registered too.
    pub fn register_struct(
        &mut self,
        registry: &mut TypeRegistry,
        parent: &str,
        child: &str,
        complex_type: &'a ComplexType,
        schema: &'a Schema,
    ) -> bool {
        let key = complex_type as *const ComplexType;
        if self.by_type.contains_key(&key) {
            return false;
        }
        if degrades_to_raw(complex_type) {
            self.by_type.insert(key, None);
            return false;
        }
        let name = registry.reserve(&inline_name(parent, child));
        self.by_type.insert(key, Some(self.structs.len()));
        self.structs.push(AnonymousStruct {
            name,
            xml_name: child.to_string(),
            complex_type,
            schema,
        });
        true
    }

    #[must_use]
    pub fn lookup(&self, complex_type: &ComplexType) -> Option<AnonymousType<'_>> {
        self.by_type
            .get(&(complex_type as *const ComplexType))
            .map(|index| match index {
                Some(i) => AnonymousType::Struct(&self.structs[*i].name),
                None => AnonymousType::RawXml,
            })
    }

    /// Register inline enumeration of element or attribute `local`
    /// inside the declaration with type-name prefix `parent`. Enumerations with identical
    /// value lists share one type.
    pub fn register_enum(
        &mut self,
        registry: &mut TypeRegistry,
        parent: &str,
        local: &str,
        simple_type: &'a SimpleType,
    ) -> &str {
        let key = simple_type as *const SimpleType;
        let values = simple_type.enumeration();
        let index = match self.enum_by_type.get(&key) {
            Some(i) => *i,
            None => {
                let i = match self.enums.iter().position(|e| e.values == values) {
                    Some(i) => i,
                    None => {
                        let name = registry.reserve(&inline_name(parent, local));
                        self.enums.push(InlineEnum {
                            name,
                            xml_name: local.to_string(),
                            values,
                            annotation: simple_type.annotation.as_ref(),
                        });
                        self.enums.len() - 1
                    }
                };
                self.enum_by_type.insert(key, i);
                i
            }
        };
        &self.enums[index].name
    }

    #[must_use]
    pub fn enum_name(&self, simple_type: &SimpleType) -> Option<&str> {
        self.enum_by_type
            .get(&(simple_type as *const SimpleType))
            .map(|i| self.enums[*i].name.as_str())
    }

    /// Emitted inline structs in registration order.
    #[must_use]
    pub fn structs(&self) -> &[AnonymousStruct<'a>] {
        &self.structs
    }

    /// Emitted inline enumerations in registration order.
    #[must_use]
    pub fn enums(&self) -> &[InlineEnum<'a>] {
        &self.enums
    }
}

/// Name of a type declared by `child` inside the declaration with
/// type-name prefix `parent` (already PascalCase).
#[must_use]
pub fn inline_name(parent: &str, child: &str) -> String {
    format!("{parent}_{}", to_pascal(child))
}

/// Inline complex type is captured as raw XML: it contains a wildcard,
/// or it has element children and none of them is typed. Derived
/// content never degrades.
#[must_use]
pub fn degrades_to_raw(complex_type: &ComplexType) -> bool {
    if complex_type.content.is_some() {
        return false;
    }
    let mut has_any = false;
    let mut elements = 0;
    let mut typed = 0;
    if let Some(model) = &complex_type.model {
        let particles: &[Particle] = match model {
            ModelGroup::Sequence(c) | ModelGroup::Choice(c) | ModelGroup::All(c) => &c.particles,
            ModelGroup::Group(_) => &[],
        };
        scan(particles, &mut has_any, &mut elements, &mut typed);
    }
    has_any || (elements > 0 && typed == 0)
}

fn scan(particles: &[Particle], has_any: &mut bool, elements: &mut usize, typed: &mut usize) {
    for particle in particles {
        match particle {
            Particle::Element(e) => {
                *elements += 1;
                if !matches!(e.shape(), ElementShape::Untyped) {
                    *typed += 1;
                }
            }
            Particle::Sequence(c) | Particle::Choice(c) => scan(&c.particles, has_any, elements, typed),
            // group content is declared elsewhere and assumed typed
            Particle::Group(_) => *typed += 1,
            Particle::Any(_) => *has_any = true,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn schema(body: &str) -> Schema {
        let xml = format!(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:t">{body}</xs:schema>"#
        );
        Schema::parse(xml.as_bytes()).unwrap()
    }

    fn inline_of(schema: &Schema, index: usize) -> &ComplexType {
        schema.elements[index].complex_type.as_deref().unwrap()
    }

    #[test]
    fn degrade_rule() {
        let s = schema(
            r#"<xs:element name="A"><xs:complexType><xs:sequence><xs:any/></xs:sequence></xs:complexType></xs:element>
               <xs:element name="B"><xs:complexType><xs:sequence><xs:element name="x"/><xs:element name="y"/></xs:sequence></xs:complexType></xs:element>
               <xs:element name="C"><xs:complexType><xs:sequence><xs:element name="x"/><xs:element name="y" type="xs:int"/></xs:sequence></xs:complexType></xs:element>
               <xs:element name="D"><xs:complexType/></xs:element>"#,
        );
        assert!(degrades_to_raw(inline_of(&s, 0)));
        assert!(degrades_to_raw(inline_of(&s, 1)));
        assert!(!degrades_to_raw(inline_of(&s, 2)));
        assert!(!degrades_to_raw(inline_of(&s, 3)));
    }

    #[test]
    fn names_and_lookup() {
        let s = schema(
            r#"<xs:element name="order"><xs:complexType><xs:attribute name="id" type="xs:int"/></xs:complexType></xs:element>
               <xs:element name="blob"><xs:complexType><xs:sequence><xs:any/></xs:sequence></xs:complexType></xs:element>"#,
        );
        let mut registry = TypeRegistry::new();
        let mut anonymous = AnonymousTypes::new();
        assert!(anonymous.register_struct(&mut registry, "Request", "order", inline_of(&s, 0), &s));
        assert!(!anonymous.register_struct(&mut registry, "Request", "order", inline_of(&s, 0), &s));
        assert!(!anonymous.register_struct(&mut registry, "Request", "blob", inline_of(&s, 1), &s));
        assert_eq!(
            anonymous.lookup(inline_of(&s, 0)),
            Some(AnonymousType::Struct("Request_Order"))
        );
        assert_eq!(anonymous.lookup(inline_of(&s, 1)), Some(AnonymousType::RawXml));
        assert_eq!(anonymous.structs().len(), 1);
    }

    #[test]
    fn identical_enumerations_share_a_name() {
        let s = schema(
            r#"<xs:simpleType name="A"><xs:restriction base="xs:string">
                 <xs:enumeration value="x"/><xs:enumeration value="y"/></xs:restriction></xs:simpleType>
               <xs:simpleType name="B"><xs:restriction base="xs:string">
                 <xs:enumeration value="x"/><xs:enumeration value="y"/></xs:restriction></xs:simpleType>"#,
        );
        let mut registry = TypeRegistry::new();
        let mut anonymous = AnonymousTypes::new();
        let first = anonymous
            .register_enum(&mut registry, "Shape", "kind", &s.simple_types[0])
            .to_string();
        let second = anonymous
            .register_enum(&mut registry, "Other", "kind", &s.simple_types[1])
            .to_string();
        assert_eq!(first, "Shape_Kind");
        assert_eq!(second, first);
        assert_eq!(anonymous.enum_name(&s.simple_types[1]), Some("Shape_Kind"));
        assert_eq!(anonymous.enums().len(), 1);
    }
}
