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

use crate::text::InvalidValue;
use crate::text::XmlText;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Type corresponding to `xs:QName` values in messages.
///
/// The prefix is kept as written; it is not resolved against namespace
/// declarations of the message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QName {
    pub prefix: Option<String>,
    pub local: String,
}

impl QName {
    #[must_use]
    pub fn new(prefix: Option<&str>, local: &str) -> Self {
        Self {
            prefix: prefix.map(ToString::to_string),
            local: local.to_string(),
        }
    }
}

impl Display for QName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.prefix {
            Some(prefix) => write!(f, "{prefix}:{}", self.local),
            None => f.write_str(&self.local),
        }
    }
}

impl XmlText for QName {
    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_text(text: &str) -> Result<Self, InvalidValue> {
        let text_trimmed = text.trim();
        let (prefix, local) = match text_trimmed.split_once(':') {
            Some((prefix, local)) => (Some(prefix), local),
            None => (None, text_trimmed),
        };
        if local.is_empty() || local.contains(':') || prefix.map_or(false, str::is_empty) {
            return Err(InvalidValue::new("QName", text));
        }
        Ok(Self::new(prefix, local))
    }
}
