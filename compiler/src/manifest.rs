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

//! Generation manifest.
//!
//! The manifest lists several generation jobs in one TOML file so a
//! build script or `gen --manifest` can process them together:
//!
//! ```toml
//! [[service]]
//! wsdl = "wsdl/calculator.wsdl"
//! package = "calculator"
//!
//! [[service]]
//! wsdl = "wsdl/weather.wsdl"
//! package = "weather"
//! wrapper = "never"
//! ```
//!
//! Relative `wsdl` paths are resolved against the directory of the
//! manifest file.

use crate::compiler::WrapperPolicy;
use serde::Deserialize;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::fs::File;
use std::io::Error as IoError;
use std::io::Read as _;
use std::path::Path;
use std::path::PathBuf;
use toml::de::Error as TomlError;

/// Manifest with generation jobs.
#[derive(Deserialize, Debug)]
pub struct Manifest {
    #[serde(rename = "service", default)]
    pub services: Vec<ServiceJob>,
}

impl Manifest {
    /// Read manifest from toml file. Relative WSDL paths are resolved
    /// against the manifest directory.
    ///
    /// # Errors
    ///
    /// - `Error::Io` if failed to read file
    /// - `Error::Toml` if failed to parse content as TOML / invalid manifest.
    pub fn read(fname: &Path) -> Result<Self, Error> {
        let mut file = File::open(fname).map_err(Error::Io)?;
        let mut content = String::new();
        file.read_to_string(&mut content).map_err(Error::Io)?;
        let manifest = Self::parse(&content)?;
        Ok(manifest.relative_to(fname.parent().unwrap_or_else(|| Path::new("."))))
    }

    /// Parse manifest content.
    ///
    /// # Errors
    ///
    /// Returns `Error::Toml` if content is not a valid manifest.
    pub fn parse(content: &str) -> Result<Self, Error> {
        toml::from_str(content).map_err(Error::Toml)
    }

    /// Resolve relative WSDL paths against `base`.
    #[must_use]
    pub fn relative_to(self, base: &Path) -> Self {
        Self {
            services: self
                .services
                .into_iter()
                .map(|job| ServiceJob {
                    wsdl: base.join(job.wsdl),
                    ..job
                })
                .collect(),
        }
    }
}

/// Generation of one package from one WSDL document.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServiceJob {
    /// WSDL document.
    pub wsdl: PathBuf,
    /// Name of the generated module directory.
    pub package: String,
    /// Override of the wrapper naming policy.
    #[serde(default)]
    pub wrapper: Option<WrapperPolicy>,
}

#[derive(Debug)]
pub enum Error {
    Io(IoError),
    Toml(TomlError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Io(err) => write!(f, "input/output error: {err}"),
            Self::Toml(err) => write!(f, "manifest file format error: {err}"),
        }
    }
}

impl StdError for Error {}
