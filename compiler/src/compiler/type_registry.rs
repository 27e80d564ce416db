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

//! Registry of generated type names.
//!
//! All names of one generated file are allocated here. Names are
//! compared case-insensitively so that `UserRequest` and `userRequest`
//! never end up as one type; the second gets a numeric suffix.

use crate::generator::casemungler::to_pascal;
use std::collections::HashMap;
use tracing::debug;

/// Names used by generated code or by the Rust prelude.
const RESERVED: &[&str] = &[
    "Base64Binary",
    "Box",
    "CallOptions",
    "Client",
    "ClientConfig",
    "ClientOption",
    "Clone",
    "Cow",
    "Date",
    "DateTime",
    "DecodeError",
    "Debug",
    "Default",
    "Duration",
    "Err",
    "Error",
    "FieldDescriptor",
    "FieldKind",
    "FieldReader",
    "FieldWriter",
    "HexBinary",
    "HttpClient",
    "InvalidValue",
    "None",
    "Occurs",
    "Ok",
    "Option",
    "PartialEq",
    "QName",
    "RawXml",
    "Result",
    "Self",
    "SoapClient",
    "SoapVersion",
    "Some",
    "String",
    "StructDescriptor",
    "Time",
    "Vec",
    "XmlStruct",
    "XmlText",
];

/// Naming context of a registered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeContext {
    /// Data type named after its XML name.
    DataElement,
    /// Operation message named with the `Wrapper` suffix.
    SoapWrapper,
}

/// Shape used to decide whether two elements may share one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub local_name: String,
    pub has_complex_type: bool,
    pub sequence_count: usize,
    pub attribute_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    /// The name was allocated by this registration and its type has
    /// to be emitted.
    pub is_new: bool,
}

#[derive(Debug)]
struct Entry {
    context: Option<TypeContext>,
    signature: Option<Signature>,
}

/// Allocator of unique type names.
#[derive(Debug)]
pub struct TypeRegistry {
    /// Lowercase name to allocated name.
    taken: HashMap<String, String>,
    entries: HashMap<String, Entry>,
    /// Lowercase XML name and context to allocated name.
    by_xml_name: HashMap<(String, TypeContext), String>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        let taken = RESERVED
            .iter()
            .map(|name| (name.to_lowercase(), (*name).to_string()))
            .collect();
        Self {
            taken,
            entries: HashMap::new(),
            by_xml_name: HashMap::new(),
        }
    }

    #[must_use]
    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains_key(&name.to_lowercase())
    }

    /// First of `base`, `base2`, `base3`, ... that is not taken.
    #[must_use]
    pub fn unique(&self, base: &str) -> String {
        let base = if base.is_empty() { "Unnamed" } else { base };
        if !self.is_taken(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{base}{n}"))
            .find(|name| !self.is_taken(name))
            .unwrap_or_default()
    }

    /// Allocate a name without element signature (inline types,
    /// enumerations, synthesised wrappers).
    pub fn reserve(&mut self, base: &str) -> String {
        let name = self.unique(base);
        if name != base {
            debug!("type name {base} taken, using {name}");
        }
        self.insert(&name, None, None);
        name
    }

    /// Register a top-level element or named complex type.
    ///
    /// A data element reuses the name previously allocated to the
    /// same XML name (case-insensitively); the type is emitted again
    /// only when the signature of that earlier registration differs.
    pub fn register(
        &mut self,
        xml_name: &str,
        context: TypeContext,
        signature: Signature,
    ) -> Registration {
        let key = (xml_name.to_lowercase(), context);
        let base = match context {
            TypeContext::SoapWrapper => format!("{}Wrapper", to_pascal(xml_name)),
            TypeContext::DataElement => self
                .by_xml_name
                .get(&key)
                .cloned()
                .unwrap_or_else(|| to_pascal(xml_name)),
        };
        let existing = self
            .taken
            .get(&base.to_lowercase())
            .and_then(|name| self.entries.get(name).map(|entry| (name, entry)));
        if let Some((name, entry)) = existing {
            if entry.context == Some(context) && entry.signature.as_ref() == Some(&signature) {
                return Registration {
                    name: name.clone(),
                    is_new: false,
                };
            }
        }
        let name = self.unique(&base);
        if name != base {
            debug!("type name {base} of {xml_name} taken, using {name}");
        }
        self.insert(&name, Some(context), Some(signature));
        self.by_xml_name.entry(key).or_insert_with(|| name.clone());
        Registration { name, is_new: true }
    }

    fn insert(&mut self, name: &str, context: Option<TypeContext>, signature: Option<Signature>) {
        self.taken.insert(name.to_lowercase(), name.to_string());
        self.entries
            .insert(name.to_string(), Entry { context, signature });
    }
}
