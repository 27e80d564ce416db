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

//! Binary XSD types.

use crate::text::InvalidValue;
use crate::text::XmlText;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::ops::Deref;

/// Type corresponding to `xs:base64Binary`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Base64Binary(pub Vec<u8>);

impl Deref for Base64Binary {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Base64Binary {
    fn from(v: Vec<u8>) -> Self {
        Self(v)
    }
}

impl XmlText for Base64Binary {
    fn to_text(&self) -> String {
        STANDARD.encode(&self.0)
    }

    fn from_text(text: &str) -> Result<Self, InvalidValue> {
        // Line breaks are allowed inside the lexical form.
        let compact = text
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect::<String>();
        STANDARD
            .decode(compact.as_bytes())
            .map(Self)
            .map_err(|_| InvalidValue::new("base64Binary", text))
    }
}

/// Type corresponding to `xs:hexBinary`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct HexBinary(pub Vec<u8>);

impl Deref for HexBinary {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for HexBinary {
    fn from(v: Vec<u8>) -> Self {
        Self(v)
    }
}

impl XmlText for HexBinary {
    fn to_text(&self) -> String {
        hex::encode_upper(&self.0)
    }

    fn from_text(text: &str) -> Result<Self, InvalidValue> {
        hex::decode(text.trim())
            .map(Self)
            .map_err(|_| InvalidValue::new("hexBinary", text))
    }
}
