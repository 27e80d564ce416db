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

use crate::xml::Element;
use crate::xml::Node;
use crate::xml::XmlError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Verbatim XML captured for content that has no structured type:
/// wildcards, untyped elements and anonymous types that are not worth
/// a struct of their own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RawXml(pub String);

impl RawXml {
    #[must_use]
    pub fn new(xml: impl Into<String>) -> Self {
        Self(xml.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Parse captured content into elements. Text between elements is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns error if captured content is not well-formed XML.
    pub fn elements(&self) -> Result<Vec<Element>, XmlError> {
        Ok(Element::parse_fragment(&self.0)?
            .into_iter()
            .filter_map(|node| match node {
                Node::Element(e) => Some(e),
                _ => None,
            })
            .collect())
    }
}

impl From<String> for RawXml {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RawXml {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for RawXml {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}
