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

//! Command-line entry points for the compiler
//!
//! Provides two subcommands used by build scripts or users:
//! - `Generate` (`gen`): parse and compile a WSDL document, then write
//!   `types.rs`, `client.rs` (only if the primary binding has
//!   operations) and `mod.rs` into `<output_dir>/<package>/`. Several
//!   documents may be listed in a manifest instead.
//! - `Doc`: write Markdown documentation of a WSDL document.

use crate::compiler::compile;
use crate::compiler::Config as CompilerConfig;
use crate::compiler::WrapperPolicy;
use crate::generator::markdown;
use crate::generator::rust::to_source;
use crate::generator::rust::Config as GeneratorConfig;
use crate::generator::rust::RustGenerator;
use crate::manifest::Manifest;
use crate::manifest::ServiceJob;
use crate::wsdl::Definitions;
use crate::Error;
use clap::Subcommand;
use std::fs::create_dir_all;
use std::fs::read;
use std::fs::write;
use std::path::Path;
use std::path::PathBuf;
use tracing::info;
use tracing::warn;

/// Compiler high-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate Rust types and client from WSDL.
    #[command(name = "gen")]
    Generate {
        /// WSDL document to compile.
        #[arg(short, long, required_unless_present = "manifest")]
        input: Option<PathBuf>,
        /// Directory where the package directory is created.
        #[arg(short = 'd', long, default_value = ".")]
        output_dir: PathBuf,
        /// Name of the generated package (module directory).
        #[arg(short, long, required_unless_present = "manifest")]
        package: Option<String>,
        /// Manifest listing several WSDL documents and their packages.
        #[arg(short, long, conflicts_with_all = ["input", "package"])]
        manifest: Option<PathBuf>,
        /// Override of the wrapper naming policy.
        #[arg(short, long, value_enum)]
        wrapper: Option<WrapperPolicy>,
    },
    /// Generate Markdown documentation of WSDL.
    Doc {
        /// WSDL document.
        #[arg(short, long)]
        input: PathBuf,
        /// Output file. Documentation is printed if not specified.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Sources generated from one WSDL document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSources {
    pub types: String,
    /// `None` if the primary binding has no operations.
    pub client: Option<String>,
    pub module: String,
}

/// Process a compiler command.
///
/// # Errors
///
/// Returns an error if command processing fails.
pub fn process_command(command: &Commands) -> Result<Vec<String>, Error> {
    match command {
        Commands::Generate {
            input,
            output_dir,
            package,
            manifest,
            wrapper,
        } => {
            let jobs = match (manifest, input, package) {
                (Some(manifest), _, _) => {
                    Manifest::read(manifest)
                        .map_err(|e| Error::Manifest(manifest.clone(), e))?
                        .services
                }
                (None, Some(input), Some(package)) => vec![ServiceJob {
                    wsdl: input.clone(),
                    package: package.clone(),
                    wrapper: None,
                }],
                (None, _, _) => return Err(Error::MissingInput),
            };
            let mut display_output = Vec::new();
            for job in jobs {
                let policy = wrapper.or(job.wrapper).unwrap_or_default();
                let config = CompilerConfig::default().wrapper(policy);
                let written = generate_package(&job.wsdl, output_dir, &job.package, &config)?;
                display_output.extend(
                    written
                        .iter()
                        .map(|p| format!("{} file has been written", p.display())),
                );
            }
            Ok(display_output)
        }
        Commands::Doc { input, output } => {
            let content = read(input).map_err(|e| Error::Io(input.clone(), e))?;
            let defs = Definitions::parse(&content).map_err(|e| Error::Parse(input.clone(), e))?;
            let compiled = compile(&defs, &CompilerConfig::default()).map_err(Error::compile_error)?;
            let doc = markdown::generate(&compiled);
            match output {
                Some(output) => {
                    write(output, doc).map_err(|e| Error::WriteOutput(output.clone(), e))?;
                    info!("{} has been written", output.display());
                    Ok(vec![format!("{} file has been written", output.display())])
                }
                None => Ok(vec![doc]),
            }
        }
    }
}

/// Compile `wsdl` and write generated files into
/// `<output_dir>/<package>/`. Returns paths of written files.
///
/// # Errors
///
/// Returns error if the package name is not an identifier, the WSDL
/// cannot be read, parsed, compiled, or output cannot be written.
pub fn generate_package(
    wsdl: &Path,
    output_dir: &Path,
    package: &str,
    config: &CompilerConfig,
) -> Result<Vec<PathBuf>, Error> {
    if syn::parse_str::<syn::Ident>(package).is_err() {
        return Err(Error::InvalidPackageName(package.to_string()));
    }
    let content = read(wsdl).map_err(|e| Error::Io(wsdl.to_path_buf(), e))?;
    let sources = generate_sources(&content, config).map_err(|e| match e {
        Error::Parse(_, e) => Error::Parse(wsdl.to_path_buf(), e),
        e => e,
    })?;
    let dir = output_dir.join(package);
    create_dir_all(&dir).map_err(|e| Error::WriteOutput(dir.clone(), e))?;

    let mut files = vec![("types.rs", sources.types), ("mod.rs", sources.module)];
    match sources.client {
        Some(client) => files.push(("client.rs", client)),
        None => warn!(
            "{}: primary binding has no operations, client file skipped",
            wsdl.display()
        ),
    }
    files
        .into_iter()
        .map(|(name, content)| {
            let path = dir.join(name);
            write(&path, content).map_err(|e| Error::WriteOutput(path.clone(), e))?;
            info!("{} has been written", path.display());
            Ok(path)
        })
        .collect()
}

/// Generate sources from WSDL content with default generator
/// configuration.
///
/// # Errors
///
/// Returns error if the WSDL cannot be parsed or compiled, or
/// generated code is invalid.
pub fn generate_sources(wsdl: &[u8], config: &CompilerConfig) -> Result<GeneratedSources, Error> {
    let defs = Definitions::parse(wsdl).map_err(|e| Error::Parse(PathBuf::new(), e))?;
    let compiled = compile(&defs, config).map_err(Error::compile_error)?;
    let generator =
        RustGenerator::new(&compiled, GeneratorConfig::default()).map_err(Error::generate_error)?;
    let types = to_source(generator.generate_types()).map_err(Error::ParseGenerated)?;
    let client = generator
        .generate_client()
        .map(to_source)
        .transpose()
        .map_err(Error::ParseGenerated)?;
    let module = to_source(generator.generate_mod()).map_err(Error::ParseGenerated)?;
    Ok(GeneratedSources {
        types,
        client,
        module,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    const WSDL: &str = r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
        xmlns:xs="http://www.w3.org/2001/XMLSchema"
        xmlns:tns="urn:types" targetNamespace="urn:types">
      <types><xs:schema targetNamespace="urn:types">
        <xs:complexType name="Point"><xs:sequence>
          <xs:element name="x" type="xs:double"/><xs:element name="y" type="xs:double"/>
        </xs:sequence></xs:complexType>
      </xs:schema></types>
    </definitions>"#;

    #[test]
    fn no_binding_means_no_client() {
        let sources = generate_sources(WSDL.as_bytes(), &CompilerConfig::default()).unwrap();
        assert!(sources.types.contains("pub struct Point {"));
        assert_eq!(sources.client, None);
        assert!(!sources.module.contains("pub mod client;"));
    }

    #[test]
    fn generation_is_deterministic() {
        let first = generate_sources(WSDL.as_bytes(), &CompilerConfig::default()).unwrap();
        let second = generate_sources(WSDL.as_bytes(), &CompilerConfig::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn package_name_must_be_identifier() {
        let err = generate_package(
            Path::new("missing.wsdl"),
            Path::new("."),
            "my-package",
            &CompilerConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidPackageName(name) if name == "my-package"));
    }

    #[test]
    fn malformed_wsdl_is_a_parse_error() {
        let err = generate_sources(b"<definitions", &CompilerConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Parse(..)));
    }
}
