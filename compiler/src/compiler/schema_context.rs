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

//! Name resolution tables.
//!
//! [`SchemaContext`] indexes top-level components of one schema by
//! local name; the first declaration of a name wins. [`SchemaSet`]
//! resolves a [`QName`] across all schemas of a WSDL: by namespace and
//! local name when the namespace is a target namespace of some schema,
//! by local name alone otherwise.

use crate::qname::QName;
use crate::xsd::Attribute;
use crate::xsd::AttributeGroup;
use crate::xsd::ComplexType;
use crate::xsd::Element;
use crate::xsd::Group;
use crate::xsd::Schema;
use crate::xsd::SimpleType;
use std::collections::HashMap;

/// Component together with the schema declaring it.
pub type Resolved<'a, T> = (&'a Schema, &'a T);

/// Resolution tables of one schema.
pub struct SchemaContext<'a> {
    pub schema: &'a Schema,
    elements: HashMap<&'a str, &'a Element>,
    simple_types: HashMap<&'a str, &'a SimpleType>,
    complex_types: HashMap<&'a str, &'a ComplexType>,
    groups: HashMap<&'a str, &'a Group>,
    attribute_groups: HashMap<&'a str, &'a AttributeGroup>,
    attributes: HashMap<&'a str, &'a Attribute>,
}

fn index<'a, T>(items: &'a [T], name: impl Fn(&'a T) -> Option<&'a str>) -> HashMap<&'a str, &'a T> {
    let mut map = HashMap::new();
    for item in items {
        if let Some(name) = name(item) {
            map.entry(name).or_insert(item);
        }
    }
    map
}

impl<'a> SchemaContext<'a> {
    /// Build tables in one pass over top-level declarations.
    #[must_use]
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            elements: index(&schema.elements, |e| e.name.as_deref()),
            simple_types: index(&schema.simple_types, |t| t.name.as_deref()),
            complex_types: index(&schema.complex_types, |t| t.name.as_deref()),
            groups: index(&schema.groups, |g| Some(g.name.as_str())),
            attribute_groups: index(&schema.attribute_groups, |g| Some(g.name.as_str())),
            attributes: index(&schema.attributes, |a| a.name.as_deref()),
        }
    }

    #[must_use]
    pub fn element(&self, local: &str) -> Option<&'a Element> {
        self.elements.get(local).copied()
    }

    #[must_use]
    pub fn simple_type(&self, local: &str) -> Option<&'a SimpleType> {
        self.simple_types.get(local).copied()
    }

    #[must_use]
    pub fn complex_type(&self, local: &str) -> Option<&'a ComplexType> {
        self.complex_types.get(local).copied()
    }

    #[must_use]
    pub fn group(&self, local: &str) -> Option<&'a Group> {
        self.groups.get(local).copied()
    }

    #[must_use]
    pub fn attribute_group(&self, local: &str) -> Option<&'a AttributeGroup> {
        self.attribute_groups.get(local).copied()
    }

    #[must_use]
    pub fn attribute(&self, local: &str) -> Option<&'a Attribute> {
        self.attributes.get(local).copied()
    }
}

/// All schemas compiled together.
pub struct SchemaSet<'a> {
    contexts: Vec<SchemaContext<'a>>,
}

impl<'a> SchemaSet<'a> {
    #[must_use]
    pub fn new(schemas: &'a [Schema]) -> Self {
        Self {
            contexts: schemas.iter().map(SchemaContext::new).collect(),
        }
    }

    #[must_use]
    pub fn schemas(&self) -> impl Iterator<Item = &'a Schema> + '_ {
        self.contexts.iter().map(|c| c.schema)
    }

    /// Namespace is the target namespace of one of the schemas.
    #[must_use]
    pub fn is_known_namespace(&self, namespace: Option<&str>) -> bool {
        self.contexts
            .iter()
            .any(|c| c.schema.target_namespace.as_deref() == namespace)
    }

    fn lookup<T>(
        &self,
        name: &QName,
        table: impl Fn(&SchemaContext<'a>, &str) -> Option<&'a T>,
    ) -> Option<Resolved<'a, T>> {
        let namespace = name.namespace.as_deref();
        let exact = self.is_known_namespace(namespace);
        self.contexts
            .iter()
            .filter(|c| !exact || c.schema.target_namespace.as_deref() == namespace)
            .find_map(|c| table(c, &name.local).map(|item| (c.schema, item)))
    }

    #[must_use]
    pub fn resolve_element(&self, name: &QName) -> Option<Resolved<'a, Element>> {
        self.lookup(name, SchemaContext::element)
    }

    #[must_use]
    pub fn resolve_simple_type(&self, name: &QName) -> Option<Resolved<'a, SimpleType>> {
        self.lookup(name, SchemaContext::simple_type)
    }

    #[must_use]
    pub fn resolve_complex_type(&self, name: &QName) -> Option<Resolved<'a, ComplexType>> {
        self.lookup(name, SchemaContext::complex_type)
    }

    #[must_use]
    pub fn resolve_group(&self, name: &QName) -> Option<Resolved<'a, Group>> {
        self.lookup(name, SchemaContext::group)
    }

    #[must_use]
    pub fn resolve_attribute_group(&self, name: &QName) -> Option<Resolved<'a, AttributeGroup>> {
        self.lookup(name, SchemaContext::attribute_group)
    }

    #[must_use]
    pub fn resolve_attribute(&self, name: &QName) -> Option<Resolved<'a, Attribute>> {
        self.lookup(name, SchemaContext::attribute)
    }
}
