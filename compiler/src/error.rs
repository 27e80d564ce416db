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

use crate::compiler::Error as CompileError;
use crate::generator::rust::Error as GenerateError;
use crate::manifest::Error as ManifestError;
use crate::parse::ParseError;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::io::Error as IoError;
use std::path::PathBuf;

/// Compiler errors.
#[derive(Debug)]
pub enum Error {
    Io(PathBuf, IoError),
    Parse(PathBuf, ParseError),
    Compile(Vec<String>),
    Generate(Vec<String>),
    ParseGenerated(syn::Error),
    WriteOutput(PathBuf, IoError),
    Manifest(PathBuf, ManifestError),
    InvalidPackageName(String),
    /// Neither input file nor manifest is given.
    MissingInput,
}

// Passing by reference would break possibility to use it as
// `map_err(Error::compile_error)` etc.
#[allow(clippy::needless_pass_by_value)]
impl Error {
    pub fn compile_error(e: CompileError<'_>) -> Self {
        Self::Compile(
            format!("{e}")
                .split('\n')
                .map(ToString::to_string)
                .collect(),
        )
    }

    pub fn generate_error(e: GenerateError<'_>) -> Self {
        Self::Generate(
            format!("{e}")
                .split('\n')
                .map(ToString::to_string)
                .collect(),
        )
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Io(fname, error) => {
                write!(f, "input/output error: file: {}: {error}", fname.display())
            }
            Self::Parse(fname, error) => {
                write!(f, "WSDL parse error: file: {}: {error}", fname.display())
            }
            Self::Compile(lines) => {
                write!(f, "compilation error:")?;
                lines
                    .iter()
                    .enumerate()
                    .try_for_each(|(no, line)| write!(f, "\n #{no}: {line}"))
            }
            Self::Generate(lines) => {
                write!(f, "generation error:")?;
                lines
                    .iter()
                    .enumerate()
                    .try_for_each(|(no, line)| write!(f, "\n #{no}: {line}"))
            }
            Self::ParseGenerated(error) => {
                write!(f, "failed to parse generated file: {error}")
            }
            Self::WriteOutput(fname, error) => {
                write!(f, "failed write output file: {}: {error}", fname.display())
            }
            Self::Manifest(fname, error) => {
                write!(f, "manifest: file: {}: {error}", fname.display())
            }
            Self::InvalidPackageName(name) => {
                write!(f, "package name is not a Rust identifier: {name}")
            }
            Self::MissingInput => "either input WSDL or manifest is required".fmt(f),
        }
    }
}

impl StdError for Error {}
