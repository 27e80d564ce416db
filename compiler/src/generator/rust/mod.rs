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

//! Rust code generator.
//!
//! # Contents
//!
//! [`RustGenerator`] turns [`Compiled`] into three source files:
//! `types.rs` with enumerations and structs implementing
//! `XmlStruct`, `client.rs` with the typed SOAP client and `mod.rs`
//! tying them together.
//!
//! # Notes
//!
//! Generated files carry no inner attributes, so they can be pulled
//! into a crate with `include!`.

/// Generator configuration.
pub mod config;

/// Generation errors.
pub mod error;

/// Names of generated types.
pub mod type_name;

/// Names of generated fields and methods.
pub mod field_name;

/// `use` declarations of generated files.
pub mod imports;

/// Doc comments.
pub mod doc;

/// Enumerations.
pub mod enum_def;

/// Structs.
pub mod struct_def;

/// Client.
pub mod client_def;

use crate::compiler::compiled::FieldType;
use crate::compiler::compiled::StructDef as CompiledStruct;
use crate::compiler::Compiled;
use proc_macro2::TokenStream;
use quote::quote;

pub type Config = config::Config;
pub type Error<'a> = error::Error<'a>;
pub type TypeName<'a> = type_name::TypeName<'a>;
pub type FieldName = field_name::FieldName;
pub type Imports = imports::Imports;
pub type EnumDef<'a> = enum_def::EnumDef<'a>;
pub type StructDef<'a> = struct_def::StructDef<'a>;
pub type ClientDef<'a> = client_def::ClientDef<'a>;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// Code generated by soapgen. DO NOT EDIT.\n";

/// Generator of Rust sources of one compiled WSDL.
pub struct RustGenerator<'a> {
    compiled: &'a Compiled,
    config: Config,
}

impl<'a> RustGenerator<'a> {
    /// Create generator. All names are checked to be valid Rust
    /// identifiers and all references between types to be resolvable.
    ///
    /// # Errors
    ///
    /// Returns error if a name cannot be an identifier or a struct or
    /// enumeration referenced by a field or operation does not exist.
    pub fn new(compiled: &'a Compiled, config: Config) -> Result<Self, Error<'a>> {
        for path in [&config.core_crate, &config.http_crate] {
            if syn::parse_str::<syn::Path>(path).is_err() {
                return Err(Error::InvalidIdentifier(path.clone()));
            }
        }
        for e in &compiled.enums {
            check_type_name(&e.name).map_err(|err| Error::Enum(&e.name, Box::new(err)))?;
            enum_def::const_names(&e.values)
                .into_iter()
                .try_for_each(|c| {
                    if syn::parse_str::<syn::Ident>(&c).is_ok() {
                        Ok(())
                    } else {
                        Err(Error::InvalidIdentifier(c))
                    }
                })
                .map_err(|err| Error::Enum(&e.name, Box::new(err)))?;
        }
        for s in &compiled.structs {
            check_struct(compiled, s).map_err(|err| Error::Struct(&s.name, Box::new(err)))?;
        }
        if let Some(client) = &compiled.client {
            let methods = client_def::method_names(&client.operations);
            for (op, method) in client.operations.iter().zip(&methods) {
                let check = || {
                    if !method.is_valid() {
                        return Err(Error::InvalidIdentifier(method.to_string()));
                    }
                    op.output
                        .iter()
                        .chain(Some(&op.input))
                        .try_for_each(|name| check_struct_ref(compiled, name))
                };
                check().map_err(|err| Error::Operation(&op.name, Box::new(err)))?;
            }
        }
        Ok(Self { compiled, config })
    }

    /// Enumerations and structs.
    #[must_use]
    pub fn generate_types(&self) -> TokenStream {
        let mut imports = Imports::new();
        let mut tokens = TokenStream::new();
        for e in &self.compiled.enums {
            EnumDef::new(e).generate(&mut tokens, &mut imports, &self.config);
        }
        for s in &self.compiled.structs {
            StructDef::new(s).generate(&mut tokens, &mut imports, &self.config);
        }
        let mut file = imports.generate();
        file.extend(tokens);
        file
    }

    /// Client of the primary binding; `None` if it has no operations.
    #[must_use]
    pub fn generate_client(&self) -> Option<TokenStream> {
        let client = self.compiled.client.as_ref()?;
        let mut imports = Imports::new();
        let mut tokens = TokenStream::new();
        ClientDef::new(client).generate(&mut tokens, &mut imports, &self.config);
        let mut file = imports.generate();
        file.extend(tokens);
        Some(file)
    }

    /// Module declarations of the generated files.
    #[must_use]
    pub fn generate_mod(&self) -> TokenStream {
        let client = self
            .compiled
            .client
            .as_ref()
            .map(|_| quote! { pub mod client; });
        let doc = self
            .compiled
            .target_namespace
            .as_ref()
            .map(|ns| format!(" Types of the WSDL with target namespace `{ns}`."));
        let doc = doc.map(|d| quote! { #[doc = #d] });
        quote! {
            #doc
            pub mod types;
            #client
        }
    }
}

/// Pretty-printed source text of generated tokens, starting with the
/// "do not edit" header.
///
/// # Errors
///
/// Returns error if `tokens` is not a valid Rust file.
pub fn to_source(tokens: TokenStream) -> Result<String, syn::Error> {
    let file = syn::parse2::<syn::File>(tokens)?;
    Ok(format!("{GENERATED_HEADER}\n{}", prettyplease::unparse(&file)))
}

fn check_type_name(name: &str) -> Result<(), Error<'_>> {
    if TypeName::new(name).is_valid() {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier(name.to_string()))
    }
}

fn check_struct<'a>(compiled: &'a Compiled, s: &'a CompiledStruct) -> Result<(), Error<'a>> {
    check_type_name(&s.name)?;
    for f in &s.fields {
        let check = || {
            let name = FieldName::new(&f.name);
            if !name.is_valid() {
                return Err(Error::InvalidIdentifier(name.to_string()));
            }
            match &f.ty {
                FieldType::Struct(target) => check_struct_ref(compiled, target),
                FieldType::Enum(target) => {
                    if compiled.enums.iter().any(|e| &e.name == target) {
                        Ok(())
                    } else {
                        Err(Error::EnumNotFound(target))
                    }
                }
                FieldType::Builtin(_) | FieldType::StringList | FieldType::RawXml => Ok(()),
            }
        };
        check().map_err(|err| Error::Field(&f.name, Box::new(err)))?;
    }
    Ok(())
}

fn check_struct_ref<'a>(compiled: &'a Compiled, name: &'a str) -> Result<(), Error<'a>> {
    compiled
        .find_struct(name)
        .map(|_| ())
        .ok_or(Error::StructNotFound(name))
}
