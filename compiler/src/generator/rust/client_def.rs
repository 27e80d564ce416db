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

use crate::compiler::compiled::ClientDef as CompiledClient;
use crate::compiler::compiled::OperationDef;
use crate::generator::casemungler::to_pascal;
use crate::generator::rust::doc::format_with_note as doc_format_with_note;
use crate::generator::rust::imports::path_tokens;
use crate::generator::rust::Config;
use crate::generator::rust::FieldName;
use crate::generator::rust::Imports;
use crate::generator::rust::TypeName;
use proc_macro2::TokenStream;
use quote::quote;
use soapgen_core::SoapVersion;
use std::collections::HashSet;

/// Methods of the generated client that operations must not shadow.
const CLIENT_METHODS: &[&str] = &["new", "with_http_client", "inner"];

/// Generation of the SOAP client of one port type.
#[derive(Debug)]
pub struct ClientDef<'a> {
    pub compiled: &'a CompiledClient,
    methods: Vec<FieldName>,
}

impl<'a> ClientDef<'a> {
    #[must_use]
    pub fn new(compiled: &'a CompiledClient) -> Self {
        Self {
            compiled,
            methods: method_names(&compiled.operations),
        }
    }

    /// Method names, one per operation.
    #[must_use]
    pub fn methods(&self) -> &[FieldName] {
        &self.methods
    }

    /// Generate rust code for the client.
    pub fn generate(self, tokens: &mut TokenStream, imports: &mut Imports, config: &Config) {
        let http_client = imports.add(config.http("HttpClient"));
        let soap_client = imports.add(config.http("SoapClient"));
        let client_config = imports.add(config.http("ClientConfig"));
        let call_options = imports.add(config.http("CallOptions"));
        let error = imports.add(config.http("Error"));
        let soap_version = imports.add(config.core("SoapVersion"));
        let transport = path_tokens(&config.http("reqwest::Client"));
        let version = match self.compiled.soap_version {
            SoapVersion::V11 => quote! { V11 },
            SoapVersion::V12 => quote! { V12 },
        };
        let endpoint = &self.compiled.default_endpoint;
        let doc = doc_format_with_note(
            None,
            &format!("Client of the `{}` port type.", self.compiled.port_type),
            config,
        );

        let methods = self
            .compiled
            .operations
            .iter()
            .zip(&self.methods)
            .map(|(op, method)| operation(op, method, imports, config))
            .collect::<Vec<_>>();

        tokens.extend(quote! {
            /// Options of a single call.
            pub type ClientOption = #call_options;

            /// Service address from the WSDL; empty if it has none.
            pub const DEFAULT_ENDPOINT: &str = #endpoint;

            #doc
            #[derive(Clone)]
            pub struct Client<C: #http_client = #transport> {
                inner: #soap_client<C>,
            }

            impl Client {
                /// Client over the default HTTP transport. The endpoint
                /// from the WSDL is used unless `config` sets one.
                ///
                /// # Errors
                ///
                /// Returns error if the HTTP transport cannot be created.
                pub fn new(config: #client_config) -> Result<Self, #error> {
                    Ok(Self {
                        inner: #soap_client::new(seed_config(config))?,
                    })
                }
            }

            impl<C: #http_client> Client<C> {
                /// Client over a custom HTTP transport.
                #[must_use]
                pub fn with_http_client(client: C, config: #client_config) -> Self {
                    Self {
                        inner: #soap_client::with_client(client, seed_config(config)),
                    }
                }

                /// Underlying SOAP client.
                #[must_use]
                pub const fn inner(&self) -> &#soap_client<C> {
                    &self.inner
                }

                #(#methods)*
            }

            fn seed_config(config: #client_config) -> #client_config {
                config
                    .default_endpoint(DEFAULT_ENDPOINT)
                    .soap_version(#soap_version::#version)
            }
        });
    }
}

fn operation(op: &OperationDef, method: &FieldName, imports: &mut Imports, config: &Config) -> TokenStream {
    let error = imports.add(config.http("Error"));
    let input = imports.add(format!("super::types::{}", TypeName::new(&op.input)));
    let action = &op.soap_action;
    let doc = doc_format_with_note(
        op.doc.as_deref(),
        &format!("Operation `{}`.", op.name),
        config,
    );
    match &op.output {
        Some(output) => {
            let output = imports.add(format!("super::types::{}", TypeName::new(output)));
            quote! {
                #doc
                ///
                /// # Errors
                ///
                /// Returns error on transport failure, SOAP fault or a
                /// response that cannot be decoded.
                pub async fn #method(
                    &self,
                    request: &#input,
                    opts: &ClientOption,
                ) -> Result<#output, #error> {
                    self.inner.invoke(#action, request, opts).await
                }
            }
        }
        None => quote! {
            #doc
            ///
            /// # Errors
            ///
            /// Returns error on transport failure or SOAP fault.
            pub async fn #method(&self, request: &#input, opts: &ClientOption) -> Result<(), #error> {
                self.inner.send(#action, request, opts).await
            }
        },
    }
}

/// Snake case method names of operations; repeated names (operation
/// overloading) and names of built-in methods get numeric suffixes.
#[must_use]
pub fn method_names(operations: &[OperationDef]) -> Vec<FieldName> {
    let mut taken = CLIENT_METHODS
        .iter()
        .map(ToString::to_string)
        .collect::<HashSet<_>>();
    operations
        .iter()
        .map(|op| {
            let base = FieldName::new(&to_pascal(&op.name));
            let mut name = base.clone();
            let mut n = 2;
            while taken.contains(name.snake()) {
                name = base.with_suffix(n);
                n += 1;
            }
            taken.insert(name.snake().to_string());
            name
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn op(name: &str, output: Option<&str>) -> OperationDef {
        OperationDef {
            name: name.into(),
            soap_action: format!("urn:calc#{name}"),
            input: format!("{name}Wrapper"),
            output: output.map(ToString::to_string),
            doc: None,
        }
    }

    #[test]
    fn overloaded_operations_get_suffixes() {
        let ops = [op("Add", None), op("add", None), op("New", None), op("GetUser", None)];
        let names = method_names(&ops)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(names, ["add", "add_2", "new_2", "get_user"]);
    }

    #[test]
    fn request_response_and_one_way_methods() {
        let compiled = CompiledClient {
            port_type: "Calc".into(),
            default_endpoint: "http://localhost/calc".into(),
            soap_version: SoapVersion::V12,
            operations: vec![op("Add", Some("AddResponseWrapper")), op("Reset", None)],
        };
        let mut tokens = TokenStream::new();
        let mut imports = Imports::new();
        ClientDef::new(&compiled).generate(&mut tokens, &mut imports, &Config::default());
        let mut file = imports.generate();
        file.extend(tokens);
        let file = syn::parse2::<syn::File>(file).unwrap();
        let text = prettyplease::unparse(&file);
        let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
        assert!(text.contains("use super::types::AddResponseWrapper;"));
        assert!(text.contains("use soapgen_http::SoapClient;"));
        assert!(flat.contains("pub const DEFAULT_ENDPOINT: &str = \"http://localhost/calc\";"));
        assert!(flat.contains("pub struct Client<C: HttpClient = soapgen_http::reqwest::Client>"));
        assert!(flat.contains(".soap_version(SoapVersion::V12)"));
        assert!(flat.contains("-> Result<AddResponseWrapper, Error>"));
        assert!(flat.contains("self.inner.invoke(\"urn:calc#Add\", request, opts).await"));
        assert!(flat.contains("-> Result<(), Error>"));
        assert!(flat.contains("self.inner.send(\"urn:calc#Reset\", request, opts).await"));
    }
}
