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

use crate::envelope::SoapVersion;
use crate::raw_xml::RawXml;
use crate::xml::escape_text;
use crate::xml::write_declaration;
use crate::xml::Element;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// SOAP fault.
///
/// SOAP 1.2 faults are mapped onto the same record: `Code/Value` is the
/// code, the first `Reason/Text` is the message, `Node` (or `Role`) is
/// the actor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fault {
    /// `faultcode`, usually a QName such as `soap:Client`.
    pub code: String,
    /// `faultstring`.
    pub message: String,
    /// `faultactor`.
    pub actor: Option<String>,
    /// Inner XML of `detail`.
    pub detail: Option<RawXml>,
}

impl Fault {
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            actor: None,
            detail: None,
        }
    }

    /// Read fault from its `Fault` element. Children are matched by
    /// local name.
    #[must_use]
    pub fn from_element(element: &Element) -> Self {
        let child = |name: &str| element.elements().find(|e| e.local_name() == name);
        let text = |name: &str| child(name).map(|e| e.text().trim().to_string());
        if let Some(code) = child("Code") {
            let value = code
                .elements()
                .find(|e| e.local_name() == "Value")
                .map(|e| e.text().trim().to_string())
                .unwrap_or_default();
            let reason = child("Reason")
                .and_then(|r| r.elements().find(|e| e.local_name() == "Text"))
                .map(|e| e.text().trim().to_string())
                .unwrap_or_default();
            Self {
                code: value,
                message: reason,
                actor: text("Node").or_else(|| text("Role")),
                detail: child("Detail").map(|d| RawXml(d.inner_xml())),
            }
        } else {
            Self {
                code: text("faultcode").unwrap_or_default(),
                message: text("faultstring").unwrap_or_default(),
                actor: text("faultactor"),
                detail: child("detail").map(|d| RawXml(d.inner_xml())),
            }
        }
    }

    /// `Fault` element for the given SOAP version. The envelope prefix
    /// is declared on the element itself.
    #[must_use]
    pub fn to_xml(&self, version: SoapVersion) -> String {
        let mut out = String::from("<soap:Fault");
        write_declaration(&mut out, "soap", version.namespace());
        out.push('>');
        match version {
            SoapVersion::V11 => {
                push_text_element(&mut out, "faultcode", &self.code);
                push_text_element(&mut out, "faultstring", &self.message);
                if let Some(actor) = &self.actor {
                    push_text_element(&mut out, "faultactor", actor);
                }
                if let Some(detail) = &self.detail {
                    out.push_str("<detail>");
                    out.push_str(detail.as_str());
                    out.push_str("</detail>");
                }
            }
            SoapVersion::V12 => {
                out.push_str("<soap:Code>");
                push_text_element(&mut out, "soap:Value", &self.code);
                out.push_str("</soap:Code><soap:Reason>");
                out.push_str("<soap:Text xml:lang=\"en\">");
                out.push_str(&escape_text(&self.message));
                out.push_str("</soap:Text></soap:Reason>");
                if let Some(actor) = &self.actor {
                    push_text_element(&mut out, "soap:Node", actor);
                }
                if let Some(detail) = &self.detail {
                    out.push_str("<soap:Detail>");
                    out.push_str(detail.as_str());
                    out.push_str("</soap:Detail>");
                }
            }
        }
        out.push_str("</soap:Fault>");
        out
    }
}

fn push_text_element(out: &mut String, name: &str, text: &str) {
    out.push('<');
    out.push_str(name);
    out.push('>');
    out.push_str(&escape_text(text));
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

impl Display for Fault {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "SOAP fault: {}: {}", self.code, self.message)
    }
}

impl StdError for Fault {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::envelope::Envelope;

    #[test]
    fn reads_soap11_fault() {
        let e = Element::parse(
            "<soap:Fault xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\">\
             <faultcode>soap:Server</faultcode><faultstring> boom </faultstring>\
             <faultactor>urn:node</faultactor><detail><code xmlns=\"urn:app\">42</code></detail>\
             </soap:Fault>",
        )
        .unwrap();
        let f = Fault::from_element(&e);
        assert_eq!(f.code, "soap:Server");
        assert_eq!(f.message, "boom");
        assert_eq!(f.actor.as_deref(), Some("urn:node"));
        assert_eq!(
            f.detail.unwrap().as_str(),
            "<code xmlns=\"urn:app\">42</code>"
        );
        assert_eq!(
            Fault::new("Client", "Invalid request").to_string(),
            "SOAP fault: Client: Invalid request"
        );
    }

    #[test]
    fn reads_soap12_fault() {
        let e = Element::parse(
            "<env:Fault xmlns:env=\"http://www.w3.org/2003/05/soap-envelope\">\
             <env:Code><env:Value>env:Sender</env:Value></env:Code>\
             <env:Reason><env:Text xml:lang=\"en\">Bad input</env:Text></env:Reason>\
             </env:Fault>",
        )
        .unwrap();
        let f = Fault::from_element(&e);
        assert_eq!(f.code, "env:Sender");
        assert_eq!(f.message, "Bad input");
        assert_eq!(f.detail, None);
    }

    #[test]
    fn written_fault_reads_back() {
        let mut fault = Fault::new("soap:Client", "a < b");
        fault.detail = Some(RawXml::from("<x xmlns=\"urn:d\">1</x>"));
        for version in [SoapVersion::V11, SoapVersion::V12] {
            let env = Envelope::new(fault.to_xml(version)).with_version(version);
            let parsed = Envelope::parse(&env.to_xml()).unwrap();
            assert_eq!(parsed.fault(), Some(fault.clone()));
        }
    }
}
