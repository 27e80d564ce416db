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

//! WSDL 1.1 document model.
//!
//! # Contents
//!
//! [`Definitions`] holds embedded schemas, messages, port types,
//! bindings and services. Binding extensions of the SOAP 1.1, SOAP 1.2
//! and HTTP vocabularies are recognised by namespace URI.

/// WSDL document parser.
pub mod parser;

use crate::qname::QName;
use crate::xsd::Schema;
use soapgen_core::SoapVersion;

/// WSDL 1.1 namespace.
pub const WSDL_NS: &str = "http://schemas.xmlsoap.org/wsdl/";
/// SOAP 1.1 binding namespace.
pub const SOAP11_BINDING_NS: &str = "http://schemas.xmlsoap.org/wsdl/soap/";
/// SOAP 1.2 binding namespace.
pub const SOAP12_BINDING_NS: &str = "http://schemas.xmlsoap.org/wsdl/soap12/";
/// HTTP binding namespace.
pub const HTTP_BINDING_NS: &str = "http://schemas.xmlsoap.org/wsdl/http/";
/// MIME binding namespace.
pub const MIME_BINDING_NS: &str = "http://schemas.xmlsoap.org/wsdl/mime/";

/// `wsdl:definitions`.
#[derive(Debug, Default)]
pub struct Definitions {
    pub target_namespace: Option<String>,
    pub name: Option<String>,
    pub documentation: Option<String>,
    pub imports: Vec<Import>,
    /// Schemas of `wsdl:types`.
    pub types: Vec<Schema>,
    pub messages: Vec<Message>,
    pub port_types: Vec<PortType>,
    pub bindings: Vec<Binding>,
    pub services: Vec<Service>,
}

impl Definitions {
    /// Find message by name. Names of WSDL components live in the
    /// target namespace of the definitions.
    #[must_use]
    pub fn message(&self, name: &QName) -> Option<&Message> {
        self.find(name, &self.messages, |m| &m.name)
    }

    #[must_use]
    pub fn port_type(&self, name: &QName) -> Option<&PortType> {
        self.find(name, &self.port_types, |p| &p.name)
    }

    #[must_use]
    pub fn binding(&self, name: &QName) -> Option<&Binding> {
        self.find(name, &self.bindings, |b| &b.name)
    }

    /// Imported definitions are not followed, so every component is
    /// matched by local name.
    fn find<'a, T>(
        &self,
        name: &QName,
        items: &'a [T],
        item_name: impl Fn(&T) -> &String,
    ) -> Option<&'a T> {
        items.iter().find(|item| *item_name(item) == name.local)
    }
}

/// `wsdl:import`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub namespace: String,
    pub location: Option<String>,
}

/// `wsdl:message`.
#[derive(Debug)]
pub struct Message {
    pub name: String,
    pub parts: Vec<Part>,
}

/// `wsdl:part`.
#[derive(Debug)]
pub struct Part {
    pub name: String,
    pub element: Option<QName>,
    pub type_name: Option<QName>,
}

/// `wsdl:portType`.
#[derive(Debug)]
pub struct PortType {
    pub name: String,
    pub operations: Vec<Operation>,
}

/// Abstract operation of a port type.
#[derive(Debug)]
pub struct Operation {
    pub name: String,
    pub documentation: Option<String>,
    pub input: Option<OperationMessage>,
    pub output: Option<OperationMessage>,
    pub faults: Vec<OperationFault>,
}

impl Operation {
    /// Operation without output.
    #[must_use]
    pub const fn is_one_way(&self) -> bool {
        self.output.is_none()
    }
}

/// `wsdl:input` / `wsdl:output` of an operation.
#[derive(Debug)]
pub struct OperationMessage {
    pub name: Option<String>,
    pub message: QName,
}

#[derive(Debug)]
pub struct OperationFault {
    pub name: String,
    pub message: QName,
}

/// `style` of SOAP binding or operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Style {
    Document,
    Rpc,
    Other(String),
}

impl Style {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "document" => Self::Document,
            "rpc" => Self::Rpc,
            other => Self::Other(other.to_string()),
        }
    }
}

/// `use` of SOAP body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Use {
    Literal,
    Encoded,
}

/// `wsdl:binding`.
#[derive(Debug)]
pub struct Binding {
    pub name: String,
    pub port_type: QName,
    pub soap: Option<SoapBinding>,
    pub http: Option<HttpBinding>,
    pub operations: Vec<BindingOperation>,
}

/// `soap:binding` or `soap12:binding`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapBinding {
    pub version: SoapVersion,
    pub style: Option<Style>,
    pub transport: Option<String>,
}

/// `http:binding`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBinding {
    pub verb: String,
}

/// Operation of a binding.
#[derive(Debug, Default)]
pub struct BindingOperation {
    pub name: String,
    pub soap_action: Option<String>,
    pub style: Option<Style>,
    pub http_location: Option<String>,
    pub input: Option<BindingMessage>,
    pub output: Option<BindingMessage>,
    pub faults: Vec<BindingFault>,
}

/// `wsdl:input` / `wsdl:output` of a binding operation.
#[derive(Debug, Default)]
pub struct BindingMessage {
    pub body: Option<SoapBody>,
    pub headers: Vec<SoapHeader>,
}

/// `soap:body`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoapBody {
    pub use_: Option<Use>,
    pub namespace: Option<String>,
    pub encoding_style: Option<String>,
    /// Names of message parts in the body, all parts if absent.
    pub parts: Option<Vec<String>>,
}

/// `soap:header`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapHeader {
    pub message: QName,
    pub part: String,
    pub use_: Option<Use>,
}

/// `wsdl:fault` of a binding operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingFault {
    pub name: String,
    pub use_: Option<Use>,
    pub namespace: Option<String>,
}

/// `wsdl:service`.
#[derive(Debug)]
pub struct Service {
    pub name: String,
    pub documentation: Option<String>,
    pub ports: Vec<Port>,
}

/// `wsdl:port`.
#[derive(Debug)]
pub struct Port {
    pub name: String,
    pub binding: QName,
    pub address: Option<Address>,
}

/// Address extension of a port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    Soap11(String),
    Soap12(String),
    Http(String),
}

impl Address {
    #[must_use]
    pub fn location(&self) -> &str {
        match self {
            Self::Soap11(l) | Self::Soap12(l) | Self::Http(l) => l,
        }
    }
}
