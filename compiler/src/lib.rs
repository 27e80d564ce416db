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

//! WSDL 1.1 / XML Schema compiler producing typed Rust SOAP clients.
//!
//! # Contents
//!
//! * [`xsd`] and [`wsdl`]: document models and their parsers.
//! * [`compiler`]: name resolution, classification, and the
//!   intermediate representation of everything that is emitted.
//! * [`generator`]: Rust code and Markdown documentation generators.
//! * [`commands`]: command processing shared by the CLI and build
//!   scripts.

/// Qualified names of schema components.
pub mod qname;

/// Parse errors of WSDL and XSD documents.
pub mod parse;

/// XML Schema model and parser.
pub mod xsd;

/// WSDL model and parser.
pub mod wsdl;

/// Compilation of WSDL definitions into emitted types and operations.
pub mod compiler;

/// Code and documentation generators.
pub mod generator;

/// Generation manifest.
pub mod manifest;

/// Commands processing.
pub mod commands;

/// Top-level errors.
pub mod error;

#[doc(inline)]
pub use error::Error;
