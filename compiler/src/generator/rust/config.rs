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

use proc_macro2::Ident;
use proc_macro2::Span;

/// Configuration of generation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the runtime crate with XML support.
    pub core_crate: String,
    /// Path of the runtime crate with the SOAP client.
    pub http_crate: String,
    /// Derives of every generated struct. Enumerations always derive
    /// `Debug, Clone, PartialEq, Eq, Hash`.
    pub derives: Vec<Ident>,
    /// Turn `xs:documentation` and `wsdl:documentation` into doc
    /// comments.
    pub emit_docs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            core_crate: "soapgen_core".into(),
            http_crate: "soapgen_http".into(),
            derives: ["Debug", "Clone", "PartialEq", "Default"]
                .iter()
                .map(|d| Ident::new(d, Span::call_site()))
                .collect(),
            emit_docs: true,
        }
    }
}

impl Config {
    #[must_use]
    pub fn core_crate<S: Into<String>>(mut self, path: S) -> Self {
        self.core_crate = path.into();
        self
    }

    #[must_use]
    pub fn http_crate<S: Into<String>>(mut self, path: S) -> Self {
        self.http_crate = path.into();
        self
    }

    #[must_use]
    pub const fn emit_docs(mut self, v: bool) -> Self {
        self.emit_docs = v;
        self
    }

    /// Path of an item of the core crate.
    #[must_use]
    pub fn core(&self, item: &str) -> String {
        format!("{}::{item}", self.core_crate)
    }

    /// Path of an item of the HTTP crate.
    #[must_use]
    pub fn http(&self, item: &str) -> String {
        format!("{}::{item}", self.http_crate)
    }
}
