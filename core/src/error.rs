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
use crate::xml::XmlError;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Error of converting XML into a generated struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Required child element is absent.
    MissingElement {
        parent: &'static str,
        name: &'static str,
    },
    /// Required attribute is absent.
    MissingAttribute {
        parent: &'static str,
        name: &'static str,
    },
    /// Text of element or attribute cannot be converted.
    InvalidValue {
        parent: &'static str,
        field: &'static str,
        error: InvalidValue,
    },
    /// Root element has a name different from the expected one.
    UnexpectedElement {
        expected: &'static str,
        found: String,
    },
    Xml(XmlError),
}

impl From<XmlError> for DecodeError {
    fn from(value: XmlError) -> Self {
        Self::Xml(value)
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::MissingElement { parent, name } => {
                write!(f, "required element <{name}> is missing in <{parent}>")
            }
            Self::MissingAttribute { parent, name } => {
                write!(f, "required attribute `{name}` is missing in <{parent}>")
            }
            Self::InvalidValue {
                parent,
                field,
                error,
            } => write!(f, "<{parent}>: field `{field}`: {error}"),
            Self::UnexpectedElement { expected, found } => {
                write!(f, "expected element <{expected}> but found <{found}>")
            }
            Self::Xml(err) => err.fmt(f),
        }
    }
}

impl StdError for DecodeError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::InvalidValue { error, .. } => Some(error),
            Self::Xml(err) => Some(err),
            _ => None,
        }
    }
}
