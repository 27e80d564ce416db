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

use soapgen_core::xml::Element;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Reference to a schema or WSDL component.
///
/// Prefix is resolved while parsing through the `xmlns` bindings in
/// scope of the referencing element, so the name is a pair of
/// namespace URI and local name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    pub namespace: Option<String>,
    pub local: String,
}

impl QName {
    #[must_use]
    pub fn new(namespace: Option<&str>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(ToString::to_string),
            local: local.into(),
        }
    }

    /// Resolve QName-valued attribute content in scope of `element`.
    #[must_use]
    pub fn resolve(element: &Element, value: &str) -> Self {
        let (namespace, local) = element.resolve_qname(value);
        Self { namespace, local }
    }

    /// Name belongs to the namespace.
    #[must_use]
    pub fn is_in(&self, namespace: &str) -> bool {
        self.namespace.as_deref() == Some(namespace)
    }
}

impl Display for QName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.namespace {
            Some(ns) => write!(f, "{{{ns}}}{}", self.local),
            None => f.write_str(&self.local),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn resolves_prefix_in_scope() {
        let e = Element::parse(r#"<e xmlns:tns="urn:t" xmlns="urn:d"/>"#).unwrap();
        assert_eq!(QName::resolve(&e, "tns:Foo"), QName::new(Some("urn:t"), "Foo"));
        assert_eq!(QName::resolve(&e, "Bar"), QName::new(Some("urn:d"), "Bar"));
        assert_eq!(QName::resolve(&e, "x:Baz"), QName::new(None, "Baz"));
        assert_eq!(QName::new(Some("urn:t"), "Foo").to_string(), "{urn:t}Foo");
    }
}
