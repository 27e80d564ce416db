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

use crate::parse::parse_document;
use crate::parse::required;
use crate::parse::ParseError;
use crate::parse::ParseErrorKind;
use crate::qname::QName;
use crate::wsdl::Address;
use crate::wsdl::Binding;
use crate::wsdl::BindingFault;
use crate::wsdl::BindingMessage;
use crate::wsdl::BindingOperation;
use crate::wsdl::Definitions;
use crate::wsdl::HttpBinding;
use crate::wsdl::Import;
use crate::wsdl::Message;
use crate::wsdl::Operation;
use crate::wsdl::OperationFault;
use crate::wsdl::OperationMessage;
use crate::wsdl::Part;
use crate::wsdl::Port;
use crate::wsdl::PortType;
use crate::wsdl::Service;
use crate::wsdl::SoapBinding;
use crate::wsdl::SoapBody;
use crate::wsdl::SoapHeader;
use crate::wsdl::Style;
use crate::wsdl::Use;
use crate::wsdl::HTTP_BINDING_NS;
use crate::wsdl::MIME_BINDING_NS;
use crate::wsdl::SOAP11_BINDING_NS;
use crate::wsdl::SOAP12_BINDING_NS;
use crate::wsdl::WSDL_NS;
use crate::xsd::Schema;
use soapgen_core::xml::Element as XmlElement;
use soapgen_core::SoapVersion;
use soapgen_core::XSD_NS;
use tracing::debug;

type Result<T> = std::result::Result<T, ParseError>;

/// Local names of the SOAP binding vocabulary (same for 1.1 and 1.2).
const SOAP_EXTENSIONS: &[&str] = &[
    "binding",
    "operation",
    "body",
    "header",
    "headerfault",
    "fault",
    "address",
];

impl Definitions {
    /// Parse WSDL document, including the schemas embedded in
    /// `wsdl:types`.
    ///
    /// # Errors
    ///
    /// Returns error if input is not well-formed XML, is not a WSDL
    /// document, or a binding declares its SOAP binding twice.
    pub fn parse(input: &[u8]) -> Result<Self> {
        Self::from_element(&parse_document(input)?)
    }

    /// Read definitions from the `wsdl:definitions` element.
    ///
    /// # Errors
    ///
    /// See [`Definitions::parse`].
    pub fn from_element(root: &XmlElement) -> Result<Self> {
        if !root.is(WSDL_NS, "definitions") {
            return Err(ParseError::malformed(root, "expected wsdl:definitions root"));
        }
        let mut defs = Self {
            target_namespace: root.attribute("targetNamespace").map(ToString::to_string),
            name: root.attribute("name").map(ToString::to_string),
            documentation: documentation(root),
            ..Self::default()
        };
        for child in wsdl_children(root) {
            match child.local_name() {
                "import" => defs.imports.push(Import {
                    namespace: required(child, "namespace")?.to_string(),
                    location: child.attribute("location").map(ToString::to_string),
                }),
                "types" => {
                    for schema in child.elements() {
                        if schema.is(XSD_NS, "schema") {
                            defs.types.push(Schema::from_element(schema)?);
                        } else {
                            debug!("skipping <{}> in wsdl:types", schema.name);
                        }
                    }
                }
                "message" => defs.messages.push(parse_message(child)?),
                "portType" => defs.port_types.push(parse_port_type(child)?),
                "binding" => defs.bindings.push(parse_binding(child)?),
                "service" => defs.services.push(parse_service(child)?),
                _ => (),
            }
        }
        Ok(defs)
    }
}

fn wsdl_children(e: &XmlElement) -> impl Iterator<Item = &XmlElement> {
    e.elements().filter(|c| c.namespace() == Some(WSDL_NS))
}

fn documentation(e: &XmlElement) -> Option<String> {
    wsdl_children(e)
        .find(|c| c.local_name() == "documentation")
        .map(|d| d.text().trim().to_string())
        .filter(|d| !d.is_empty())
}

fn qname_attr(e: &XmlElement, name: &str) -> Result<QName> {
    Ok(QName::resolve(e, required(e, name)?))
}

fn soap_version(e: &XmlElement) -> Option<SoapVersion> {
    match e.namespace() {
        Some(SOAP11_BINDING_NS) => Some(SoapVersion::V11),
        Some(SOAP12_BINDING_NS) => Some(SoapVersion::V12),
        _ => None,
    }
}

/// Extension element of one of the SOAP binding vocabularies.
/// Elements of other namespaces are skipped by callers; elements of
/// the SOAP namespaces outside the vocabulary are skipped here.
fn soap_extension(e: &XmlElement) -> Option<(SoapVersion, &str)> {
    let version = soap_version(e)?;
    if SOAP_EXTENSIONS.contains(&e.local_name()) {
        Some((version, e.local_name()))
    } else {
        debug!("skipping unknown SOAP extension <{}>", e.name);
        None
    }
}

fn parse_use(e: &XmlElement) -> Result<Option<Use>> {
    e.attribute("use")
        .map(|v| match v.trim() {
            "literal" => Ok(Use::Literal),
            "encoded" => Ok(Use::Encoded),
            other => Err(ParseError::malformed(e, format!("invalid `use`: {other}"))),
        })
        .transpose()
}

fn parse_message(e: &XmlElement) -> Result<Message> {
    let mut parts = Vec::new();
    for part in wsdl_children(e).filter(|c| c.local_name() == "part") {
        let element = part.attribute("element").map(|v| QName::resolve(part, v));
        let type_name = part.attribute("type").map(|v| QName::resolve(part, v));
        if element.is_some() && type_name.is_some() {
            return Err(ParseError::at(
                ParseErrorKind::AttrConflict,
                part,
                "`element` and `type` are mutually exclusive",
            ));
        }
        parts.push(Part {
            name: required(part, "name")?.to_string(),
            element,
            type_name,
        });
    }
    Ok(Message {
        name: required(e, "name")?.to_string(),
        parts,
    })
}

fn parse_port_type(e: &XmlElement) -> Result<PortType> {
    let mut operations = Vec::new();
    for op in wsdl_children(e).filter(|c| c.local_name() == "operation") {
        let message = |local: &str| -> Result<Option<OperationMessage>> {
            wsdl_children(op)
                .find(|c| c.local_name() == local)
                .map(|m| -> Result<OperationMessage> {
                    Ok(OperationMessage {
                        name: m.attribute("name").map(ToString::to_string),
                        message: qname_attr(m, "message")?,
                    })
                })
                .transpose()
        };
        operations.push(Operation {
            name: required(op, "name")?.to_string(),
            documentation: documentation(op),
            input: message("input")?,
            output: message("output")?,
            faults: wsdl_children(op)
                .filter(|c| c.local_name() == "fault")
                .map(|f| -> Result<OperationFault> {
                    Ok(OperationFault {
                        name: required(f, "name")?.to_string(),
                        message: qname_attr(f, "message")?,
                    })
                })
                .collect::<Result<_>>()?,
        });
    }
    Ok(PortType {
        name: required(e, "name")?.to_string(),
        operations,
    })
}

fn parse_binding(e: &XmlElement) -> Result<Binding> {
    let mut binding = Binding {
        name: required(e, "name")?.to_string(),
        port_type: qname_attr(e, "type")?,
        soap: None,
        http: None,
        operations: Vec::new(),
    };
    for child in e.elements() {
        if let Some((version, local)) = soap_extension(child) {
            if local == "binding" {
                if binding.soap.is_some() {
                    return Err(ParseError::at(
                        ParseErrorKind::UnknownBindingExtension,
                        child,
                        "SOAP binding declared twice",
                    ));
                }
                binding.soap = Some(SoapBinding {
                    version,
                    style: child.attribute("style").map(Style::parse),
                    transport: child.attribute("transport").map(ToString::to_string),
                });
            }
        } else if child.is(HTTP_BINDING_NS, "binding") {
            binding.http = Some(HttpBinding {
                verb: required(child, "verb")?.to_string(),
            });
        } else if child.is(WSDL_NS, "operation") {
            binding.operations.push(parse_binding_operation(child)?);
        } else if child.namespace() != Some(WSDL_NS) {
            debug!("skipping binding extension <{}>", child.name);
        }
    }
    Ok(binding)
}

fn parse_binding_operation(e: &XmlElement) -> Result<BindingOperation> {
    let mut op = BindingOperation {
        name: required(e, "name")?.to_string(),
        ..BindingOperation::default()
    };
    for child in e.elements() {
        if let Some((_, local)) = soap_extension(child) {
            if local == "operation" {
                op.soap_action = child.attribute("soapAction").map(ToString::to_string);
                op.style = child.attribute("style").map(Style::parse);
            }
        } else if child.is(HTTP_BINDING_NS, "operation") {
            op.http_location = child.attribute("location").map(ToString::to_string);
        } else if child.is(WSDL_NS, "input") {
            op.input = Some(parse_binding_message(child)?);
        } else if child.is(WSDL_NS, "output") {
            op.output = Some(parse_binding_message(child)?);
        } else if child.is(WSDL_NS, "fault") {
            let mut fault = BindingFault {
                name: required(child, "name")?.to_string(),
                use_: None,
                namespace: None,
            };
            for ext in child.elements() {
                if let Some((_, "fault")) = soap_extension(ext) {
                    fault.use_ = parse_use(ext)?;
                    fault.namespace = ext.attribute("namespace").map(ToString::to_string);
                }
            }
            op.faults.push(fault);
        }
    }
    Ok(op)
}

fn parse_binding_message(e: &XmlElement) -> Result<BindingMessage> {
    let mut message = BindingMessage::default();
    for child in e.elements() {
        if child.is(MIME_BINDING_NS, "multipartRelated") {
            let parts = child.elements().filter(|p| p.is(MIME_BINDING_NS, "part"));
            for ext in parts.flat_map(|p| p.elements()) {
                message_extension(&mut message, ext)?;
            }
        } else {
            message_extension(&mut message, child)?;
        }
    }
    Ok(message)
}

/// The first `soap:body` describes the envelope; in a multipart
/// message it belongs to the root part.
fn message_extension(message: &mut BindingMessage, e: &XmlElement) -> Result<()> {
    match soap_extension(e) {
        Some((_, "body")) if message.body.is_none() => {
            message.body = Some(SoapBody {
                use_: parse_use(e)?,
                namespace: e.attribute("namespace").map(ToString::to_string),
                encoding_style: e.attribute("encodingStyle").map(ToString::to_string),
                parts: e
                    .attribute("parts")
                    .map(|p| p.split_whitespace().map(ToString::to_string).collect()),
            });
        }
        Some((_, "header")) => message.headers.push(SoapHeader {
            message: qname_attr(e, "message")?,
            part: required(e, "part")?.to_string(),
            use_: parse_use(e)?,
        }),
        Some(_) => (),
        None => debug!("skipping message extension <{}>", e.name),
    }
    Ok(())
}

fn parse_service(e: &XmlElement) -> Result<Service> {
    let mut ports = Vec::new();
    for port in wsdl_children(e).filter(|c| c.local_name() == "port") {
        let mut address = None;
        for ext in port.elements() {
            address = match soap_extension(ext) {
                Some((SoapVersion::V11, "address")) => {
                    Some(Address::Soap11(required(ext, "location")?.to_string()))
                }
                Some((SoapVersion::V12, "address")) => {
                    Some(Address::Soap12(required(ext, "location")?.to_string()))
                }
                _ if ext.is(HTTP_BINDING_NS, "address") => {
                    Some(Address::Http(required(ext, "location")?.to_string()))
                }
                _ => continue,
            };
        }
        ports.push(Port {
            name: required(port, "name")?.to_string(),
            binding: qname_attr(port, "binding")?,
            address,
        });
    }
    Ok(Service {
        name: required(e, "name")?.to_string(),
        documentation: documentation(e),
        ports,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    const WSDL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
    xmlns:s="http://schemas.xmlsoap.org/wsdl/soap/"
    xmlns:s12="http://schemas.xmlsoap.org/wsdl/soap12/"
    xmlns:xs="http://www.w3.org/2001/XMLSchema"
    xmlns:tns="urn:calc" targetNamespace="urn:calc" name="Calc">
  <documentation>Calculator</documentation>
  <types>
    <xs:schema targetNamespace="urn:calc">
      <xs:element name="Add"><xs:complexType><xs:sequence>
        <xs:element name="a" type="xs:int"/><xs:element name="b" type="xs:int"/>
      </xs:sequence></xs:complexType></xs:element>
    </xs:schema>
  </types>
  <message name="AddIn"><part name="parameters" element="tns:Add"/></message>
  <message name="AddOut"><part name="result" type="xs:int"/></message>
  <portType name="CalcPort">
    <operation name="Add">
      <documentation>Adds numbers</documentation>
      <input message="tns:AddIn"/><output message="tns:AddOut"/>
    </operation>
    <operation name="Ping"><input message="tns:AddIn"/></operation>
  </portType>
  <binding name="CalcSoap" type="tns:CalcPort">
    <s:binding style="document" transport="http://schemas.xmlsoap.org/soap/http"/>
    <operation name="Add">
      <s:operation soapAction="urn:calc#Add"/>
      <input><s:body use="literal"/></input>
      <output><s:body use="literal" namespace="urn:out"/></output>
      <fault name="Oops"><s:fault name="Oops" use="literal"/></fault>
    </operation>
  </binding>
  <binding name="CalcSoap12" type="tns:CalcPort">
    <s12:binding style="rpc"/>
  </binding>
  <service name="CalcService">
    <port name="CalcSoap" binding="tns:CalcSoap"><s:address location="http://calc/soap"/></port>
    <port name="CalcSoap12" binding="tns:CalcSoap12"><s12:address location="http://calc/soap12"/></port>
  </service>
</definitions>"#;

    #[test]
    fn parses_complete_definitions() {
        let defs = Definitions::parse(WSDL.as_bytes()).unwrap();
        assert_eq!(defs.target_namespace.as_deref(), Some("urn:calc"));
        assert_eq!(defs.documentation.as_deref(), Some("Calculator"));
        assert_eq!(defs.types.len(), 1);
        assert_eq!(defs.types[0].elements[0].name.as_deref(), Some("Add"));

        let add_in = defs.message(&QName::new(Some("urn:calc"), "AddIn")).unwrap();
        assert_eq!(add_in.parts[0].element, Some(QName::new(Some("urn:calc"), "Add")));
        let add_out = defs.message(&QName::new(Some("urn:calc"), "AddOut")).unwrap();
        assert_eq!(add_out.parts[0].type_name, Some(QName::new(Some(XSD_NS), "int")));

        let port_type = &defs.port_types[0];
        assert_eq!(port_type.operations[0].documentation.as_deref(), Some("Adds numbers"));
        assert!(!port_type.operations[0].is_one_way());
        assert!(port_type.operations[1].is_one_way());

        let soap = &defs.bindings[0];
        assert_eq!(
            soap.soap,
            Some(SoapBinding {
                version: SoapVersion::V11,
                style: Some(Style::Document),
                transport: Some("http://schemas.xmlsoap.org/soap/http".into()),
            })
        );
        let op = &soap.operations[0];
        assert_eq!(op.soap_action.as_deref(), Some("urn:calc#Add"));
        let output = op.output.as_ref().and_then(|o| o.body.as_ref()).unwrap();
        assert_eq!(output.use_, Some(Use::Literal));
        assert_eq!(output.namespace.as_deref(), Some("urn:out"));
        assert_eq!(op.faults[0].use_, Some(Use::Literal));
        assert_eq!(defs.bindings[1].soap.as_ref().unwrap().version, SoapVersion::V12);

        let ports = &defs.services[0].ports;
        assert_eq!(ports[0].address, Some(Address::Soap11("http://calc/soap".into())));
        assert_eq!(ports[1].address, Some(Address::Soap12("http://calc/soap12".into())));
        assert_eq!(ports[1].binding.local, "CalcSoap12");
    }

    #[test]
    fn unknown_soap_extension_is_skipped() {
        let wsdl = r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
            xmlns:s="http://schemas.xmlsoap.org/wsdl/soap/" xmlns:x="urn:vendor">
            <binding name="B" type="P"><x:policy/><s:bogus/><s:binding style="rpc"/>
              <operation name="Op"><s:extra/><s:operation soapAction="urn:op"/>
                <input><s:unknown/><s:body use="literal"/></input></operation>
            </binding></definitions>"#;
        let defs = Definitions::parse(wsdl.as_bytes()).unwrap();
        let binding = &defs.bindings[0];
        assert_eq!(binding.soap.as_ref().unwrap().style, Some(Style::Rpc));
        assert_eq!(binding.operations[0].soap_action.as_deref(), Some("urn:op"));
        assert!(binding.operations[0].input.as_ref().unwrap().body.is_some());
    }

    #[test]
    fn duplicate_soap_binding_is_rejected() {
        let wsdl = r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
            xmlns:s="http://schemas.xmlsoap.org/wsdl/soap/"
            xmlns:s12="http://schemas.xmlsoap.org/wsdl/soap12/">
            <binding name="B" type="P"><s:binding/><s12:binding/></binding></definitions>"#;
        let err = Definitions::parse(wsdl.as_bytes()).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownBindingExtension);
    }

    #[test]
    fn soap_body_inside_mime_multipart() {
        let wsdl = r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
            xmlns:s="http://schemas.xmlsoap.org/wsdl/soap/"
            xmlns:mime="http://schemas.xmlsoap.org/wsdl/mime/">
            <binding name="B" type="P"><s:binding style="document"/>
              <operation name="Upload"><s:operation soapAction="urn:upload"/>
                <input><mime:multipartRelated>
                  <mime:part><s:body use="literal" namespace="urn:root" parts="meta"/></mime:part>
                  <mime:part><mime:content part="file" type="application/octet-stream"/></mime:part>
                </mime:multipartRelated></input>
              </operation>
            </binding></definitions>"#;
        let defs = Definitions::parse(wsdl.as_bytes()).unwrap();
        let input = defs.bindings[0].operations[0].input.as_ref().unwrap();
        let body = input.body.as_ref().unwrap();
        assert_eq!(body.use_, Some(Use::Literal));
        assert_eq!(body.namespace.as_deref(), Some("urn:root"));
        assert_eq!(body.parts, Some(vec!["meta".to_string()]));
    }

    #[test]
    fn foreign_extensions_are_skipped() {
        let wsdl = r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/" xmlns:x="urn:vendor">
            <binding name="B" type="P"><x:policy/></binding></definitions>"#;
        let defs = Definitions::parse(wsdl.as_bytes()).unwrap();
        assert!(defs.bindings[0].soap.is_none());
        assert!(Definitions::parse(b"<root/>").is_err());
    }
}
