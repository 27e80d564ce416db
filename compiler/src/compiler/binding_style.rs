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

use crate::wsdl::Binding;
use crate::wsdl::Definitions;
use crate::wsdl::Style;
use crate::wsdl::Use;
use soapgen_core::SoapVersion;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use tracing::debug;

/// Binding style of WSDL as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingStyle {
    pub style: Style,
    pub use_: Use,
    pub encoding_style: Option<String>,
}

impl Default for BindingStyle {
    fn default() -> Self {
        Self {
            style: Style::Document,
            use_: Use::Literal,
            encoding_style: None,
        }
    }
}

impl BindingStyle {
    /// Infer the style from SOAP bindings. SOAP 1.1 bindings are
    /// preferred over SOAP 1.2; the first binding defines the style
    /// and its first operation defines `use` (output body, else input
    /// body). Document/literal when nothing is specified.
    #[must_use]
    pub fn infer(defs: &Definitions) -> Self {
        let Some(binding) = primary_binding(defs) else {
            return Self::default();
        };
        let first = binding.operations.first();
        let mut result = Self::default();
        if let Some(style) = binding
            .soap
            .as_ref()
            .and_then(|s| s.style.clone())
            .or_else(|| first.and_then(|op| op.style.clone()))
        {
            result.style = style;
        }
        let body = first.and_then(|op| {
            op.output
                .as_ref()
                .and_then(|m| m.body.as_ref())
                .or_else(|| op.input.as_ref().and_then(|m| m.body.as_ref()))
        });
        if let Some(body) = body {
            if let Some(use_) = body.use_ {
                result.use_ = use_;
            }
            result.encoding_style = body.encoding_style.clone();
        }
        debug!("binding style of {}: {result}", binding.name);
        result
    }

    #[must_use]
    pub fn is_rpc(&self) -> bool {
        self.style == Style::Rpc
    }
}

impl Display for BindingStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let style = match &self.style {
            Style::Document => "document",
            Style::Rpc => "rpc",
            Style::Other(s) => s,
        };
        let use_ = match self.use_ {
            Use::Literal => "literal",
            Use::Encoded => "encoded",
        };
        write!(f, "{style}/{use_}")
    }
}

/// First SOAP 1.1 binding, else first SOAP 1.2 binding.
#[must_use]
pub fn primary_binding(defs: &Definitions) -> Option<&Binding> {
    let of_version = |version| {
        defs.bindings
            .iter()
            .find(|b| b.soap.as_ref().map(|s| s.version) == Some(version))
    };
    of_version(SoapVersion::V11).or_else(|| of_version(SoapVersion::V12))
}

#[cfg(test)]
mod test {
    use super::*;

    fn defs(bindings: &str) -> Definitions {
        let xml = format!(
            r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
                 xmlns:s="http://schemas.xmlsoap.org/wsdl/soap/"
                 xmlns:s12="http://schemas.xmlsoap.org/wsdl/soap12/">{bindings}</definitions>"#
        );
        Definitions::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn defaults_to_document_literal() {
        assert_eq!(BindingStyle::infer(&defs("")), BindingStyle::default());
        assert_eq!(BindingStyle::default().to_string(), "document/literal");
    }

    #[test]
    fn prefers_soap11_binding() {
        let d = defs(
            r#"<binding name="B12" type="P"><s12:binding style="document"/></binding>
               <binding name="B11" type="P"><s:binding style="rpc"/>
                 <operation name="Op">
                   <input><s:body use="encoded" encodingStyle="http://schemas.xmlsoap.org/soap/encoding/"/></input>
                   <output><s:body use="literal"/></output>
                 </operation>
               </binding>"#,
        );
        let style = BindingStyle::infer(&d);
        assert!(style.is_rpc());
        assert_eq!(style.use_, Use::Literal);
        assert_eq!(primary_binding(&d).unwrap().name, "B11");
    }

    #[test]
    fn input_body_used_for_one_way() {
        let d = defs(
            r#"<binding name="B" type="P"><s:binding/>
                 <operation name="Op"><s:operation style="rpc"/>
                   <input><s:body use="encoded"/></input></operation>
               </binding>"#,
        );
        let style = BindingStyle::infer(&d);
        assert_eq!(style.to_string(), "rpc/encoded");
    }
}
