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

//! Runtime support for code generated by soapgen.
//!
//! The crate provides:
//! - a small namespace-aware XML tree ([`xml::Element`]) built on top of
//!   `quick-xml`;
//! - the [`XmlText`] conversion for XSD simple values and the wrapper
//!   types for XSD values that have no direct Rust counterpart;
//! - serialisation descriptors ([`StructDescriptor`]) together with the
//!   generic driver ([`marshal`], [`unmarshal`]) that generated structs
//!   plug into through [`XmlStruct`];
//! - the SOAP [`Envelope`] and [`Fault`] model;
//! - XML declaration and pretty-printing helpers.

/// Namespace-aware XML tree.
pub mod xml;

/// XSD simple value conversion.
pub mod text;

/// Serialisation descriptors of generated structs.
pub mod descriptor;

/// Generic marshal/unmarshal driver.
pub mod marshal;

/// XSD `dateTime`, `date` and `time` values.
pub mod date_time;

/// XSD `duration` values.
pub mod duration;

/// XSD `hexBinary` and `base64Binary` values.
pub mod binary;

/// XSD `QName` values.
pub mod qname;

/// Captured raw XML content.
pub mod raw_xml;

/// SOAP envelope.
pub mod envelope;

/// SOAP fault.
pub mod fault;

/// XML declaration handling and pretty-printing.
pub mod format;

/// Decoding errors.
pub mod error;

#[doc(inline)]
pub use binary::Base64Binary;
#[doc(inline)]
pub use binary::HexBinary;
#[doc(inline)]
pub use date_time::Date;
#[doc(inline)]
pub use date_time::DateTime;
#[doc(inline)]
pub use date_time::Time;
#[doc(inline)]
pub use descriptor::FieldDescriptor;
#[doc(inline)]
pub use descriptor::FieldKind;
#[doc(inline)]
pub use descriptor::Occurs;
#[doc(inline)]
pub use descriptor::StructDescriptor;
#[doc(inline)]
pub use duration::Duration;
#[doc(inline)]
pub use envelope::Envelope;
#[doc(inline)]
pub use envelope::EnvelopeError;
#[doc(inline)]
pub use envelope::HeaderEntry;
#[doc(inline)]
pub use envelope::SoapVersion;
#[doc(inline)]
pub use error::DecodeError;
#[doc(inline)]
pub use fault::Fault;
#[doc(inline)]
pub use format::add_xml_declaration;
#[doc(inline)]
pub use format::format_xml;
#[doc(inline)]
pub use format::strip_xml_declaration;
#[doc(inline)]
pub use marshal::from_str;
#[doc(inline)]
pub use marshal::marshal;
#[doc(inline)]
pub use marshal::to_document;
#[doc(inline)]
pub use marshal::unmarshal;
#[doc(inline)]
pub use marshal::FieldReader;
#[doc(inline)]
pub use marshal::FieldWriter;
#[doc(inline)]
pub use marshal::XmlStruct;
#[doc(inline)]
pub use qname::QName;
#[doc(inline)]
pub use raw_xml::RawXml;
#[doc(inline)]
pub use text::InvalidValue;
#[doc(inline)]
pub use text::XmlText;
#[doc(inline)]
pub use xml::XmlError;

/// XML Schema namespace.
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";

/// XML Schema instance namespace (`xsi:nil`, `xsi:type`).
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Namespace bound to the reserved `xml` prefix.
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";
