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
use soapgen_core::XmlError;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Kind of parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Document is not well-formed XML or violates the structure of
    /// the vocabulary.
    Malformed,
    /// Root element is not `xs:schema`.
    SchemaRootMissing,
    /// Mutually exclusive attributes or children are present together.
    AttrConflict,
    /// SOAP binding extension that cannot be interpreted, such as a
    /// second SOAP binding in one `wsdl:binding`.
    UnknownBindingExtension,
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Malformed => "malformed document",
            Self::SchemaRootMissing => "schema root missing",
            Self::AttrConflict => "conflicting attributes",
            Self::UnknownBindingExtension => "invalid binding extension",
        }
        .fmt(f)
    }
}

/// Error of WSDL or XSD parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Byte offset in the document.
    pub position: u64,
    pub detail: String,
}

impl ParseError {
    #[must_use]
    pub fn new(kind: ParseErrorKind, position: u64, detail: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            detail: detail.into(),
        }
    }

    /// Error located at the element. Detail is prefixed with the
    /// element name.
    #[must_use]
    pub fn at(kind: ParseErrorKind, element: &Element, detail: impl Display) -> Self {
        Self::new(kind, element.position, format!("<{}>: {detail}", element.name))
    }

    #[must_use]
    pub fn malformed(element: &Element, detail: impl Display) -> Self {
        Self::at(ParseErrorKind::Malformed, element, detail)
    }
}

impl From<XmlError> for ParseError {
    fn from(err: XmlError) -> Self {
        Self::new(ParseErrorKind::Malformed, err.position, err.message)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} at byte {}: {}", self.kind, self.position, self.detail)
    }
}

impl StdError for ParseError {}

/// Parse bytes as XML document.
///
/// # Errors
///
/// Returns `Malformed` if the input is not UTF-8 or not well formed.
pub fn parse_document(input: &[u8]) -> Result<Element, ParseError> {
    let text = std::str::from_utf8(input).map_err(|e| {
        ParseError::new(
            ParseErrorKind::Malformed,
            e.valid_up_to() as u64,
            "invalid UTF-8",
        )
    })?;
    Ok(Element::parse(text.trim_start_matches('\u{feff}'))?)
}

/// Required attribute of element.
///
/// # Errors
///
/// Returns `Malformed` if attribute is absent.
pub fn required<'a>(element: &'a Element, name: &str) -> Result<&'a str, ParseError> {
    element
        .attribute(name)
        .ok_or_else(|| ParseError::malformed(element, format!("missing attribute `{name}`")))
}

/// Non-negative integer attribute.
///
/// # Errors
///
/// Returns `Malformed` if the value is not a non-negative integer.
pub fn unsigned(element: &Element, name: &str) -> Result<Option<u64>, ParseError> {
    element
        .attribute(name)
        .map(|v| {
            v.trim().parse::<u64>().map_err(|_| {
                ParseError::malformed(element, format!("`{name}` is not a non-negative integer: {v}"))
            })
        })
        .transpose()
}

/// Boolean attribute (`true`, `false`, `1`, `0`).
///
/// # Errors
///
/// Returns `Malformed` for any other lexical form.
pub fn boolean(element: &Element, name: &str) -> Result<Option<bool>, ParseError> {
    element
        .attribute(name)
        .map(|v| match v.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(ParseError::malformed(
                element,
                format!("`{name}` is not a boolean: {v}"),
            )),
        })
        .transpose()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reports_position_of_malformed_input() {
        let err = parse_document(b"<a><b></a>").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Malformed);
        let err = parse_document(&[0x3c, 0xff, 0x3e]).unwrap_err();
        assert_eq!(err.position, 1);
    }

    #[test]
    fn reads_typed_attributes() {
        let e = Element::parse(r#"<e n="3" b="1" bad="x"/>"#).unwrap();
        assert_eq!(unsigned(&e, "n").unwrap(), Some(3));
        assert_eq!(unsigned(&e, "m").unwrap(), None);
        assert_eq!(boolean(&e, "b").unwrap(), Some(true));
        assert!(boolean(&e, "bad").is_err());
        assert!(required(&e, "missing").unwrap_err().detail.contains("missing"));
    }
}
