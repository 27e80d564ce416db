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

//! Serialisation descriptors.
//!
//! Every generated struct carries a [`StructDescriptor`] constant that
//! lists its XML name and, for each Rust field in declaration order,
//! the XML name, namespace, kind and cardinality. Generated
//! `read_fields` / `write_fields` bodies address fields by their index
//! in this list.

/// How a field is represented in XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Child element.
    Element,
    /// Attribute of the struct element.
    Attribute,
    /// Character data of the struct element (simple content).
    CharData,
    /// Every child node not consumed by other fields, captured as raw
    /// XML.
    InnerXml,
}

/// Cardinality of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occurs {
    /// Exactly once.
    One,
    /// Zero or one time.
    Optional,
    /// Any number of times.
    Many,
}

/// Descriptor of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// XML local name. Unused for `CharData` and `InnerXml` fields.
    pub name: &'static str,
    /// Namespace the element is written in. `None` means the element
    /// is unqualified.
    pub namespace: Option<&'static str>,
    pub kind: FieldKind,
    pub occurs: Occurs,
}

/// Descriptor of a generated struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructDescriptor {
    /// Local name of the root element when the struct is marshalled
    /// on its own.
    pub name: &'static str,
    /// Namespace of the root element. Present only for structs that
    /// are roots of SOAP messages.
    pub namespace: Option<&'static str>,
    pub fields: &'static [FieldDescriptor],
}

impl StructDescriptor {
    /// Descriptor of the field by index.
    ///
    /// # Panics
    ///
    /// Panics if index is out of range. Generated code addresses fields
    /// only by indices of its own descriptor.
    #[must_use]
    pub fn field(&self, index: usize) -> &'static FieldDescriptor {
        let fields: &'static [FieldDescriptor] = self.fields;
        &fields[index]
    }
}
