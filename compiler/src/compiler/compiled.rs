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

//! Compiled representation of one WSDL document.
//!
//! Everything that ends up in generated files, already named and
//! ordered. Generators only walk these lists; they never look back
//! into the schema model.

use crate::compiler::binding_style::BindingStyle;
use crate::xsd::BuiltinType;
use soapgen_core::FieldKind;
use soapgen_core::Occurs;
use soapgen_core::SoapVersion;

/// Result of compilation of a WSDL document.
#[derive(Debug)]
pub struct Compiled {
    pub target_namespace: Option<String>,
    pub documentation: Option<String>,
    pub style: BindingStyle,
    /// Top-level enumerations, then inline enumerations.
    pub enums: Vec<EnumDef>,
    /// Named complex types (sorted by name), inline complex types,
    /// top-level elements (document order), synthesised wrappers.
    pub structs: Vec<StructDef>,
    pub client: Option<ClientDef>,
    pub services: Vec<ServiceDef>,
}

impl Compiled {
    /// Some field captures raw XML.
    #[must_use]
    pub fn uses_raw_xml(&self) -> bool {
        self.structs
            .iter()
            .flat_map(|s| s.fields.iter())
            .any(|f| f.ty == FieldType::RawXml)
    }

    #[must_use]
    pub fn find_struct(&self, name: &str) -> Option<&StructDef> {
        self.structs.iter().find(|s| s.name == name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty() && self.structs.is_empty()
    }
}

/// String enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    pub name: String,
    pub xml_name: String,
    pub values: Vec<String>,
    pub doc: Option<String>,
}

/// Origin of a struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructKind {
    ComplexType,
    /// Inline complex type; the name carries an underscore.
    Inline,
    Element,
    /// Wrapper of rpc message parts.
    Synthesized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDef {
    pub name: String,
    pub kind: StructKind,
    /// Local name of the root element.
    pub xml_name: String,
    /// Namespace of the root element; only operation messages have it.
    pub namespace: Option<String>,
    pub fields: Vec<FieldDef>,
    pub doc: Option<String>,
}

/// Type of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Builtin(BuiltinType),
    Enum(String),
    Struct(String),
    /// `xs:list` of a non-builtin item type.
    StringList,
    RawXml,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// PascalCase name from the field registry.
    pub name: String,
    pub xml_name: String,
    pub namespace: Option<String>,
    pub kind: FieldKind,
    pub occurs: Occurs,
    pub ty: FieldType,
    /// Field type reaches back to the containing struct.
    pub boxed: bool,
    pub doc: Option<String>,
    /// XSD type as written in the schema, for documentation.
    pub xsd_type: String,
}

/// Generated client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDef {
    pub port_type: String,
    /// Address of the first service port (SOAP 1.1 first); empty if
    /// there is none.
    pub default_endpoint: String,
    pub soap_version: SoapVersion,
    pub operations: Vec<OperationDef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDef {
    pub name: String,
    /// Empty if the binding has no `soapAction`.
    pub soap_action: String,
    /// Struct name of the request.
    pub input: String,
    /// Struct name of the response; `None` for one-way operations.
    pub output: Option<String>,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDef {
    pub name: String,
    pub doc: Option<String>,
    pub ports: Vec<PortDef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortDef {
    pub name: String,
    pub binding: String,
    /// `SOAP 1.1`, `SOAP 1.2` or `HTTP`.
    pub protocol: &'static str,
    pub address: Option<String>,
}
