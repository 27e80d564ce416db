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

use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Lexical value that cannot be converted to the requested type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidValue {
    /// XSD type the value was supposed to have.
    pub expected: &'static str,
    pub value: String,
}

impl InvalidValue {
    #[must_use]
    pub fn new(expected: &'static str, value: &str) -> Self {
        Self {
            expected,
            value: value.to_string(),
        }
    }
}

impl Display for InvalidValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "invalid {} value: {:?}", self.expected, self.value)
    }
}

impl StdError for InvalidValue {}

/// Conversion between Rust value and XSD lexical representation.
///
/// Implemented for all types that are used as element text, attribute
/// values or simple content in generated structs.
pub trait XmlText: Sized {
    /// Canonical lexical representation.
    fn to_text(&self) -> String;

    /// Parse lexical representation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if `text` is not a valid lexical
    /// representation of the type.
    fn from_text(text: &str) -> Result<Self, InvalidValue>;
}

impl XmlText for String {
    fn to_text(&self) -> String {
        self.clone()
    }

    fn from_text(text: &str) -> Result<Self, InvalidValue> {
        Ok(text.to_string())
    }
}

impl XmlText for bool {
    fn to_text(&self) -> String {
        (if *self { "true" } else { "false" }).to_string()
    }

    fn from_text(text: &str) -> Result<Self, InvalidValue> {
        match text.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(InvalidValue::new("boolean", text)),
        }
    }
}

macro_rules! integer_text {
    ($($ty:ty => $xsd:expr),* $(,)?) => {
        $(
            impl XmlText for $ty {
                fn to_text(&self) -> String {
                    self.to_string()
                }

                fn from_text(text: &str) -> Result<Self, InvalidValue> {
                    let text_trimmed = text.trim();
                    text_trimmed
                        .strip_prefix('+')
                        .unwrap_or(text_trimmed)
                        .parse()
                        .map_err(|_| InvalidValue::new($xsd, text))
                }
            }
        )*
    };
}

integer_text! {
    i8 => "byte",
    i16 => "short",
    i32 => "int",
    i64 => "long",
    u8 => "unsignedByte",
    u16 => "unsignedShort",
    u32 => "unsignedInt",
    u64 => "unsignedLong",
}

macro_rules! float_text {
    ($($ty:ty => $xsd:expr),* $(,)?) => {
        $(
            impl XmlText for $ty {
                fn to_text(&self) -> String {
                    if self.is_nan() {
                        "NaN".to_string()
                    } else if self.is_infinite() {
                        (if self.is_sign_positive() { "INF" } else { "-INF" }).to_string()
                    } else {
                        self.to_string()
                    }
                }

                fn from_text(text: &str) -> Result<Self, InvalidValue> {
                    match text.trim() {
                        "INF" | "+INF" => Ok(<$ty>::INFINITY),
                        "-INF" => Ok(<$ty>::NEG_INFINITY),
                        "NaN" => Ok(<$ty>::NAN),
                        // Rust also accepts spellings like `inf`
                        // that are not valid XSD.
                        v if v.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => {
                            Err(InvalidValue::new($xsd, text))
                        }
                        v => v.parse().map_err(|_| InvalidValue::new($xsd, text)),
                    }
                }
            }
        )*
    };
}

float_text! {
    f32 => "float",
    f64 => "double",
}

/// Space separated lists (`NMTOKENS`, `IDREFS`, `ENTITIES`).
impl XmlText for Vec<String> {
    fn to_text(&self) -> String {
        self.join(" ")
    }

    fn from_text(text: &str) -> Result<Self, InvalidValue> {
        Ok(text.split_whitespace().map(ToString::to_string).collect())
    }
}
