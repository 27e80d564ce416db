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

//! Resolution of WSDL references.
//!
//! Every reference between WSDL components and from message parts to
//! schema components has to resolve; the first unresolved reference
//! is reported together with the chain of enclosing components.

use crate::compiler::error::Error;
use crate::compiler::schema_context::SchemaSet;
use crate::wsdl::Definitions;
use crate::wsdl::Message;
use crate::wsdl::Part;
use crate::wsdl::PortType;
use crate::xsd::BuiltinType;

/// Check all references of `defs`.
///
/// # Errors
///
/// Returns the first reference that cannot be resolved.
pub fn validate<'a>(defs: &'a Definitions, schemas: &SchemaSet<'a>) -> Result<(), Error<'a>> {
    for message in &defs.messages {
        validate_message(message, schemas).map_err(|e| Error::Message(&message.name, Box::new(e)))?;
    }
    for port_type in &defs.port_types {
        validate_port_type(defs, port_type)?;
    }
    for binding in &defs.bindings {
        if defs.port_type(&binding.port_type).is_none() {
            return Err(Error::Binding(
                &binding.name,
                Box::new(Error::PortTypeNotFound(&binding.port_type)),
            ));
        }
    }
    for service in &defs.services {
        for port in &service.ports {
            if defs.binding(&port.binding).is_none() {
                return Err(Error::Service(
                    &service.name,
                    Box::new(Error::BindingNotFound(&port.binding)),
                ));
            }
        }
    }
    Ok(())
}

fn validate_message<'a>(message: &'a Message, schemas: &SchemaSet<'a>) -> Result<(), Error<'a>> {
    message.parts.iter().try_for_each(|part| {
        validate_part(part, schemas).map_err(|e| Error::Part(&part.name, Box::new(e)))
    })
}

fn validate_part<'a>(part: &'a Part, schemas: &SchemaSet<'a>) -> Result<(), Error<'a>> {
    match (&part.element, &part.type_name) {
        (Some(element), _) => schemas
            .resolve_element(element)
            .map(|_| ())
            .ok_or(Error::ElementNotFound(element)),
        (None, Some(type_name)) => {
            let known = BuiltinType::from_qname(type_name).is_some()
                || schemas.resolve_simple_type(type_name).is_some()
                || schemas.resolve_complex_type(type_name).is_some();
            if known {
                Ok(())
            } else {
                Err(Error::TypeNotFound(type_name))
            }
        }
        (None, None) => Err(Error::UntypedPart),
    }
}

fn validate_port_type<'a>(defs: &'a Definitions, port_type: &'a PortType) -> Result<(), Error<'a>> {
    for op in &port_type.operations {
        let messages = op
            .input
            .iter()
            .chain(op.output.iter())
            .map(|m| &m.message)
            .chain(op.faults.iter().map(|f| &f.message));
        for message in messages {
            if defs.message(message).is_none() {
                return Err(Error::Operation(
                    &op.name,
                    Box::new(Error::MessageNotFound(message)),
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn check(body: &str) -> Result<(), String> {
        let xml = format!(
            r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/" xmlns:tns="urn:t"
                 xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:t">
               <types><xs:schema targetNamespace="urn:t">
                 <xs:element name="Req" type="xs:string"/></xs:schema></types>
               {body}</definitions>"#
        );
        let defs = Definitions::parse(xml.as_bytes()).unwrap();
        let schemas = SchemaSet::new(&defs.types);
        validate(&defs, &schemas).map_err(|e| e.to_string())
    }

    #[test]
    fn resolved_references_pass() {
        let result = check(
            r#"<message name="In"><part name="p" element="tns:Req"/></message>
               <message name="Out"><part name="r" type="xs:int"/></message>
               <portType name="P"><operation name="Op">
                 <input message="tns:In"/><output message="tns:Out"/></operation></portType>
               <binding name="B" type="tns:P"/>
               <service name="S"><port name="SP" binding="tns:B"/></service>"#,
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn missing_part_element_names_the_chain() {
        let result = check(r#"<message name="In"><part name="p" element="tns:Missing"/></message>"#);
        assert_eq!(
            result,
            Err("while compiling message: In\nwhile compiling part: p\nelement not found: {urn:t}Missing".into())
        );
    }

    #[test]
    fn missing_binding_and_port_type() {
        let result = check(r#"<binding name="B" type="tns:Nope"/>"#);
        assert_eq!(
            result,
            Err("while compiling binding: B\nport type not found: {urn:t}Nope".into())
        );
        let result = check(r#"<service name="S"><port name="SP" binding="tns:Nope"/></service>"#);
        assert_eq!(
            result,
            Err("while compiling service: S\nbinding not found: {urn:t}Nope".into())
        );
    }

    #[test]
    fn missing_operation_message() {
        let result = check(
            r#"<portType name="P"><operation name="Op"><input message="tns:In"/></operation></portType>"#,
        );
        assert_eq!(
            result,
            Err("while compiling operation: Op\nmessage not found: {urn:t}In".into())
        );
    }
}
