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

//! Compilation of WSDL definitions.
//!
//! # Contents
//!
//! Compilation validates references of the WSDL, infers the binding
//! style, classifies top-level elements and allocates names of all
//! emitted types. The result is [`Compiled`]: named enumerations,
//! structs with their fields, and the client description.
//!
//! # Notes
//!
//! Names depend only on the order of declarations in the input, so
//! compilation of the same document always yields the same result.

/// Resolution tables of schemas.
pub mod schema_context;

/// Binding style inference.
pub mod binding_style;

/// Classification of top-level elements.
pub mod classifier;

/// Type name registry.
pub mod type_registry;

/// Field name registry.
pub mod field_registry;

/// Inline complex types and enumerations.
pub mod anonymous_types;

/// Reference validation.
pub mod validate;

/// Compiled representation.
pub mod compiled;

/// Builder of the compiled representation.
pub mod types_builder;

/// Compilation errors.
pub mod error;

use crate::compiler::classifier::Classifier;
use crate::compiler::schema_context::SchemaSet;
use crate::compiler::types_builder::TypesBuilder;
use crate::wsdl::Definitions;
use tracing::debug;
use tracing::warn;

pub type BindingStyle = binding_style::BindingStyle;
pub type Compiled = compiled::Compiled;
pub type Error<'a> = error::Error<'a>;
pub type WrapperPolicy = classifier::WrapperPolicy;

/// Compilation options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub wrapper: WrapperPolicy,
}

impl Config {
    #[must_use]
    pub const fn wrapper(mut self, wrapper: WrapperPolicy) -> Self {
        self.wrapper = wrapper;
        self
    }
}

/// Compile WSDL definitions.
///
/// # Errors
///
/// Returns error if a reference between WSDL components, or from a
/// message part to a schema component, cannot be resolved.
pub fn compile<'a>(defs: &'a Definitions, config: &Config) -> Result<Compiled, Error<'a>> {
    let schemas = SchemaSet::new(&defs.types);
    validate::validate(defs, &schemas)?;
    if defs.types.iter().all(|s| s.is_empty()) {
        warn!("WSDL has no schema components");
    }
    let style = BindingStyle::infer(defs);
    let classifier = Classifier::new(defs, &schemas);
    let use_wrappers = classifier.use_wrappers(&style, config.wrapper);
    debug!("binding style {style}, wrappers: {use_wrappers}");
    Ok(TypesBuilder::new(defs, &schemas, &classifier, use_wrappers).build(style))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::compiler::compiled::FieldType;
    use crate::compiler::compiled::StructKind;
    use crate::xsd::BuiltinType;
    use soapgen_core::FieldKind;
    use soapgen_core::Occurs;

    fn compile_str(wsdl: &str, config: Config) -> Compiled {
        let defs = Definitions::parse(wsdl.as_bytes()).unwrap();
        compile(&defs, &config).unwrap()
    }

    const WEATHER: &str = r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
        xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
        xmlns:s="http://www.w3.org/2001/XMLSchema"
        xmlns:tns="http://www.webserviceX.NET" targetNamespace="http://www.webserviceX.NET">
      <types>
        <s:schema elementFormDefault="qualified" targetNamespace="http://www.webserviceX.NET">
          <s:element name="GetWeather">
            <s:complexType><s:sequence>
              <s:element minOccurs="0" maxOccurs="1" name="CityName" type="s:string"/>
              <s:element minOccurs="0" maxOccurs="1" name="CountryName" type="s:string"/>
            </s:sequence></s:complexType>
          </s:element>
          <s:element name="GetWeatherResponse">
            <s:complexType><s:sequence>
              <s:element minOccurs="0" maxOccurs="1" name="GetWeatherResult" type="s:string"/>
            </s:sequence></s:complexType>
          </s:element>
          <s:element name="getWeatherEnvelope">
            <s:complexType><s:sequence><s:element ref="tns:GetWeather"/></s:sequence></s:complexType>
          </s:element>
        </s:schema>
      </types>
      <message name="GetWeatherSoapIn"><part name="parameters" element="tns:GetWeather"/></message>
      <message name="GetWeatherSoapOut"><part name="parameters" element="tns:GetWeatherResponse"/></message>
      <portType name="GlobalWeatherSoap">
        <operation name="GetWeather">
          <input message="tns:GetWeatherSoapIn"/><output message="tns:GetWeatherSoapOut"/>
        </operation>
      </portType>
      <binding name="GlobalWeatherSoap" type="tns:GlobalWeatherSoap">
        <soap:binding transport="http://schemas.xmlsoap.org/soap/http"/>
        <operation name="GetWeather">
          <soap:operation soapAction="http://www.webserviceX.NET/GetWeather" style="document"/>
          <input><soap:body use="literal"/></input><output><soap:body use="literal"/></output>
        </operation>
      </binding>
      <service name="GlobalWeather">
        <port name="GlobalWeatherSoap" binding="tns:GlobalWeatherSoap">
          <soap:address location="http://www.webservicex.net/globalweather.asmx"/>
        </port>
      </service>
    </definitions>"#;

    #[test]
    fn document_literal_with_wrapper_pattern() {
        let compiled = compile_str(WEATHER, Config::default());
        let request = compiled.find_struct("GetWeatherWrapper").unwrap();
        assert_eq!(request.kind, StructKind::Element);
        assert_eq!(request.xml_name, "GetWeather");
        assert_eq!(request.namespace.as_deref(), Some("http://www.webserviceX.NET"));
        let names = request.fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["CityName", "CountryName"]);
        assert!(request.fields.iter().all(|f| f.occurs == Occurs::Optional));
        assert_eq!(
            request.fields[0].ty,
            FieldType::Builtin(BuiltinType::String)
        );
        assert_eq!(
            request.fields[0].namespace.as_deref(),
            Some("http://www.webserviceX.NET")
        );

        let envelope = compiled.find_struct("GetWeatherEnvelope").unwrap();
        assert_eq!(envelope.namespace, None);
        assert_eq!(envelope.fields[0].ty, FieldType::Struct("GetWeatherWrapper".into()));

        let client = compiled.client.unwrap();
        assert_eq!(client.default_endpoint, "http://www.webservicex.net/globalweather.asmx");
        assert_eq!(client.operations[0].soap_action, "http://www.webserviceX.NET/GetWeather");
        assert_eq!(client.operations[0].input, "GetWeatherWrapper");
        assert_eq!(
            client.operations[0].output.as_deref(),
            Some("GetWeatherResponseWrapper")
        );
    }

    #[test]
    fn wrapper_policy_override() {
        let compiled = compile_str(WEATHER, Config::default().wrapper(WrapperPolicy::Never));
        assert!(compiled.find_struct("GetWeather").is_some());
        assert!(compiled.find_struct("GetWeatherWrapper").is_none());
    }

    #[test]
    fn compilation_is_deterministic() {
        let first = compile_str(WEATHER, Config::default());
        let second = compile_str(WEATHER, Config::default());
        assert_eq!(first.structs, second.structs);
        assert_eq!(first.enums, second.enums);
        assert_eq!(first.client, second.client);
    }

    const RPC: &str = r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
        xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
        xmlns:xs="http://www.w3.org/2001/XMLSchema"
        xmlns:tns="urn:calc" targetNamespace="urn:calc">
      <types><xs:schema targetNamespace="urn:calc">
        <xs:complexType name="Node"><xs:sequence>
          <xs:element name="value" type="xs:int"/>
          <xs:element name="next" type="tns:Node" minOccurs="0"/>
          <xs:element name="children" type="tns:Node" maxOccurs="unbounded"/>
        </xs:sequence><xs:attribute name="value" type="xs:string"/></xs:complexType>
        <xs:simpleType name="Mode"><xs:restriction base="xs:string">
          <xs:enumeration value="fast"/><xs:enumeration value="exact"/>
        </xs:restriction></xs:simpleType>
      </xs:schema></types>
      <message name="AddIn"><part name="a" type="xs:int"/><part name="mode" type="tns:Mode"/></message>
      <message name="AddOut"><part name="sum" type="tns:Node"/></message>
      <portType name="Calc"><operation name="Add">
        <input message="tns:AddIn"/><output message="tns:AddOut"/></operation></portType>
      <binding name="CalcBinding" type="tns:Calc">
        <soap:binding style="rpc" transport="http://schemas.xmlsoap.org/soap/http"/>
        <operation name="Add"><soap:operation soapAction=""/>
          <input><soap:body use="literal" namespace="urn:calc:rpc"/></input>
          <output><soap:body use="literal" namespace="urn:calc:rpc"/></output>
        </operation>
      </binding>
    </definitions>"#;

    #[test]
    fn rpc_type_parts_are_wrapped() {
        let compiled = compile_str(RPC, Config::default());
        let request = compiled.find_struct("AddWrapper").unwrap();
        assert_eq!(request.kind, StructKind::Synthesized);
        assert_eq!(request.xml_name, "Add");
        assert_eq!(request.namespace.as_deref(), Some("urn:calc:rpc"));
        assert_eq!(request.fields[0].xml_name, "a");
        assert_eq!(request.fields[0].namespace, None);
        assert_eq!(request.fields[1].ty, FieldType::Enum("Mode".into()));
        let response = compiled.find_struct("AddResponseWrapper").unwrap();
        assert_eq!(response.fields[0].ty, FieldType::Struct("Node".into()));
        assert_eq!(compiled.enums[0].values, ["fast", "exact"]);
        let client = compiled.client.unwrap();
        assert_eq!(client.operations[0].soap_action, "");
        assert_eq!(client.default_endpoint, "");
    }

    #[test]
    fn recursion_is_boxed_and_names_collide() {
        let compiled = compile_str(RPC, Config::default());
        let node = compiled.find_struct("Node").unwrap();
        let summary = node
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.kind, f.occurs, f.boxed))
            .collect::<Vec<_>>();
        assert_eq!(
            summary,
            [
                ("Value", FieldKind::Element, Occurs::One, false),
                ("Next", FieldKind::Element, Occurs::Optional, true),
                ("Children", FieldKind::Element, Occurs::Many, false),
                ("ValueAttr", FieldKind::Attribute, Occurs::Optional, false),
            ]
        );
    }

    #[test]
    fn unresolved_message_is_an_error() {
        let wsdl = r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/" xmlns:tns="urn:t">
            <portType name="P"><operation name="Op"><input message="tns:Gone"/></operation></portType>
          </definitions>"#;
        let defs = Definitions::parse(wsdl.as_bytes()).unwrap();
        let err = compile(&defs, &Config::default()).unwrap_err();
        assert!(err.to_string().ends_with("message not found: {urn:t}Gone"));
    }
}
