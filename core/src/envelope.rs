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

//! SOAP envelope.
//!
//! The body is kept as raw XML: generated structs are marshalled into
//! it on the way out and unmarshalled from it on the way back. Parsing
//! is tolerant: the envelope may use any prefix or the default
//! namespace, and an envelope without namespace is read as SOAP 1.1.

use crate::error::DecodeError;
use crate::fault::Fault;
use crate::marshal::marshal;
use crate::marshal::unmarshal;
use crate::marshal::XmlStruct;
use crate::raw_xml::RawXml;
use crate::xml::write_attribute;
use crate::xml::write_declaration;
use crate::xml::Element;
use crate::xml::XmlError;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// SOAP 1.1 envelope namespace.
pub const SOAP11_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// SOAP 1.2 envelope namespace.
pub const SOAP12_ENVELOPE_NS: &str = "http://www.w3.org/2003/05/soap-envelope";

const PREFIX: &str = "soap";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoapVersion {
    V11,
    V12,
}

impl Default for SoapVersion {
    fn default() -> Self {
        Self::V11
    }
}

impl SoapVersion {
    /// Envelope namespace of the version.
    #[must_use]
    pub const fn namespace(self) -> &'static str {
        match self {
            Self::V11 => SOAP11_ENVELOPE_NS,
            Self::V12 => SOAP12_ENVELOPE_NS,
        }
    }

    #[must_use]
    pub fn from_namespace(namespace: &str) -> Option<Self> {
        match namespace {
            SOAP11_ENVELOPE_NS => Some(Self::V11),
            SOAP12_ENVELOPE_NS => Some(Self::V12),
            _ => None,
        }
    }

    /// HTTP `Content-Type` of a request. SOAP 1.2 carries the action
    /// as a media type parameter.
    #[must_use]
    pub fn content_type(self, action: &str) -> String {
        match self {
            Self::V11 => "text/xml; charset=utf-8".to_string(),
            Self::V12 if action.is_empty() => "application/soap+xml; charset=utf-8".to_string(),
            Self::V12 => format!("application/soap+xml; charset=utf-8; action=\"{action}\""),
        }
    }

    /// SOAP 1.1 transmits the action in the `SOAPAction` header.
    #[must_use]
    pub const fn uses_soap_action_header(self) -> bool {
        matches!(self, Self::V11)
    }

    const fn actor_attribute(self) -> &'static str {
        match self {
            Self::V11 => "actor",
            Self::V12 => "role",
        }
    }
}

impl Display for SoapVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::V11 => "SOAP 1.1",
            Self::V12 => "SOAP 1.2",
        })
    }
}

/// Entry of the SOAP header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderEntry {
    /// Local name of the entry element.
    pub name: String,
    pub namespace: Option<String>,
    /// `mustUnderstand` attribute: absent, true or false.
    pub must_understand: Option<bool>,
    /// `actor` (SOAP 1.1) or `role` (SOAP 1.2) URI.
    pub actor: Option<String>,
    /// Inner XML of the entry element.
    pub content: RawXml,
}

impl HeaderEntry {
    #[must_use]
    pub fn new(name: &str, namespace: Option<&str>, content: impl Into<RawXml>) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.map(ToString::to_string),
            must_understand: None,
            actor: None,
            content: content.into(),
        }
    }

    #[must_use]
    pub const fn with_must_understand(mut self, v: bool) -> Self {
        self.must_understand = Some(v);
        self
    }

    #[must_use]
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    fn from_element(element: &Element, version: SoapVersion) -> Self {
        let ns = version.namespace();
        let must_understand = element
            .attribute_ns(ns, "mustUnderstand")
            .and_then(|v| match v.trim() {
                "1" | "true" => Some(true),
                "0" | "false" => Some(false),
                _ => None,
            });
        Self {
            name: element.local_name().to_string(),
            namespace: element.namespace().map(ToString::to_string),
            must_understand,
            actor: element
                .attribute_ns(ns, version.actor_attribute())
                .map(ToString::to_string),
            content: RawXml(element.inner_xml()),
        }
    }

    fn write_to(&self, version: SoapVersion, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        if let Some(ns) = &self.namespace {
            write_declaration(out, "", ns);
        }
        if let Some(v) = self.must_understand {
            let value = match (version, v) {
                (SoapVersion::V11, true) => "1",
                (SoapVersion::V11, false) => "0",
                (SoapVersion::V12, true) => "true",
                (SoapVersion::V12, false) => "false",
            };
            write_attribute(out, &format!("{PREFIX}:mustUnderstand"), value);
        }
        if let Some(actor) = &self.actor {
            write_attribute(out, &format!("{PREFIX}:{}", version.actor_attribute()), actor);
        }
        out.push('>');
        out.push_str(self.content.as_str());
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

/// SOAP envelope.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Envelope {
    pub version: SoapVersion,
    pub headers: Vec<HeaderEntry>,
    /// Content of the `Body` element.
    pub body: RawXml,
}

impl Envelope {
    /// SOAP 1.1 envelope with given body content.
    #[must_use]
    pub fn new(body: impl Into<RawXml>) -> Self {
        Self {
            version: SoapVersion::V11,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Envelope with the marshalled struct as body.
    #[must_use]
    pub fn from_struct<S: XmlStruct>(value: &S) -> Self {
        Self::new(marshal(value))
    }

    #[must_use]
    pub const fn with_version(mut self, version: SoapVersion) -> Self {
        self.version = version;
        self
    }

    #[must_use]
    pub fn with_header(mut self, entry: HeaderEntry) -> Self {
        self.headers.push(entry);
        self
    }

    /// Envelope as XML text (without XML declaration).
    #[must_use]
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("<{PREFIX}:Envelope"));
        write_declaration(&mut out, PREFIX, self.version.namespace());
        out.push('>');
        if !self.headers.is_empty() {
            out.push_str(&format!("<{PREFIX}:Header>"));
            for entry in &self.headers {
                entry.write_to(self.version, &mut out);
            }
            out.push_str(&format!("</{PREFIX}:Header>"));
        }
        out.push_str(&format!("<{PREFIX}:Body>"));
        out.push_str(self.body.as_str());
        out.push_str(&format!("</{PREFIX}:Body></{PREFIX}:Envelope>"));
        out
    }

    /// Parse envelope.
    ///
    /// # Errors
    ///
    /// Returns error if the document is not well formed, its root is
    /// not an `Envelope` or it has no `Body`.
    pub fn parse(xml: &str) -> Result<Self, EnvelopeError> {
        let root = Element::parse(xml)?;
        let version = match (root.local_name(), root.namespace()) {
            ("Envelope", None) => SoapVersion::V11,
            ("Envelope", Some(ns)) => SoapVersion::from_namespace(ns)
                .ok_or_else(|| EnvelopeError::NotAnEnvelope(format!("{{{ns}}}Envelope")))?,
            (name, _) => return Err(EnvelopeError::NotAnEnvelope(name.to_string())),
        };
        let in_envelope = |e: &Element| e.namespace().map_or(true, |ns| ns == version.namespace());
        let headers = root
            .elements()
            .find(|e| e.local_name() == "Header" && in_envelope(e))
            .map(|header| {
                header
                    .elements()
                    .map(|e| HeaderEntry::from_element(e, version))
                    .collect()
            })
            .unwrap_or_default();
        let body = root
            .elements()
            .find(|e| e.local_name() == "Body" && in_envelope(e))
            .ok_or(EnvelopeError::MissingBody)?;
        Ok(Self {
            version,
            headers,
            body: RawXml(body.inner_xml()),
        })
    }

    /// First element of the body.
    ///
    /// # Errors
    ///
    /// Returns error if the body content is not well formed.
    pub fn body_element(&self) -> Result<Option<Element>, XmlError> {
        Ok(self.body.elements()?.into_iter().next())
    }

    /// Fault carried in the body. Only a `Fault` element in the
    /// envelope namespace counts.
    #[must_use]
    pub fn fault(&self) -> Option<Fault> {
        self.body_element()
            .ok()
            .flatten()
            .filter(|e| e.is(self.version.namespace(), "Fault"))
            .map(|e| Fault::from_element(&e))
    }

    /// Unmarshal the first body element.
    ///
    /// # Errors
    ///
    /// Returns error if the body is empty or its first element cannot
    /// be decoded as `S`.
    pub fn decode_body<S: XmlStruct>(&self) -> Result<S, DecodeError> {
        let element = self.body_element()?.ok_or(DecodeError::MissingElement {
            parent: "Body",
            name: S::DESCRIPTOR.name,
        })?;
        unmarshal(&element)
    }
}

impl Display for Envelope {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.to_xml())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    /// Root element is not a SOAP envelope.
    NotAnEnvelope(String),
    MissingBody,
    Xml(XmlError),
}

impl From<XmlError> for EnvelopeError {
    fn from(value: XmlError) -> Self {
        Self::Xml(value)
    }
}

impl Display for EnvelopeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::NotAnEnvelope(name) => write!(f, "not a SOAP envelope: root element is <{name}>"),
            Self::MissingBody => write!(f, "SOAP envelope has no Body"),
            Self::Xml(err) => write!(f, "SOAP envelope: {err}"),
        }
    }
}

impl StdError for EnvelopeError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Xml(err) => Some(err),
            _ => None,
        }
    }
}
