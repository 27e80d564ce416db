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

/// Generation errors.
#[derive(Debug)]
pub enum Error<'a> {
    /// Struct referenced from a field or operation is not compiled.
    StructNotFound(&'a str),
    /// Enumeration referenced from a field is not compiled.
    EnumNotFound(&'a str),
    /// Name cannot be turned into a Rust identifier.
    InvalidIdentifier(String),
    Struct(&'a str, Box<Error<'a>>),
    Enum(&'a str, Box<Error<'a>>),
    Field(&'a str, Box<Error<'a>>),
    Operation(&'a str, Box<Error<'a>>),
}

impl Display for Error<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::StructNotFound(name) => write!(f, "struct not found: {name}"),
            Self::EnumNotFound(name) => write!(f, "enumeration not found: {name}"),
            Self::InvalidIdentifier(name) => write!(f, "invalid identifier: {name}"),
            Self::Struct(name, err) => write!(f, "while generating struct: {name}\n{err}"),
            Self::Enum(name, err) => write!(f, "while generating enumeration: {name}\n{err}"),
            Self::Field(name, err) => write!(f, "while generating field: {name}\n{err}"),
            Self::Operation(name, err) => {
                write!(f, "while generating operation: {name}\n{err}")
            }
        }
    }
}

impl StdError for Error<'_> {}
