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

use crate::qname::QName;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Compilation error kinds.
#[derive(Debug)]
pub enum Error<'a> {
    /// Message referenced from an operation was not found.
    MessageNotFound(&'a QName),
    /// Port type referenced from a binding was not found.
    PortTypeNotFound(&'a QName),
    /// Binding referenced from a service port was not found.
    BindingNotFound(&'a QName),
    /// Element referenced from a message part was not found.
    ElementNotFound(&'a QName),
    /// Type referenced from a message part was not found.
    TypeNotFound(&'a QName),
    /// Message part has neither `element` nor `type`.
    UntypedPart,
    /// Error while compiling a message part.
    Part(&'a str, Box<Error<'a>>),
    /// Error while compiling a message.
    Message(&'a str, Box<Error<'a>>),
    /// Error while compiling an operation.
    Operation(&'a str, Box<Error<'a>>),
    /// Error while compiling a binding.
    Binding(&'a str, Box<Error<'a>>),
    /// Error while compiling a service.
    Service(&'a str, Box<Error<'a>>),
}

impl Display for Error<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::MessageNotFound(v) => write!(f, "message not found: {v}"),
            Self::PortTypeNotFound(v) => write!(f, "port type not found: {v}"),
            Self::BindingNotFound(v) => write!(f, "binding not found: {v}"),
            Self::ElementNotFound(v) => write!(f, "element not found: {v}"),
            Self::TypeNotFound(v) => write!(f, "type not found: {v}"),
            Self::UntypedPart => write!(f, "part has neither element nor type"),
            Self::Part(name, err) => write!(f, "while compiling part: {name}\n{err}"),
            Self::Message(name, err) => write!(f, "while compiling message: {name}\n{err}"),
            Self::Operation(name, err) => {
                write!(f, "while compiling operation: {name}\n{err}")
            }
            Self::Binding(name, err) => write!(f, "while compiling binding: {name}\n{err}"),
            Self::Service(name, err) => write!(f, "while compiling service: {name}\n{err}"),
        }
    }
}
