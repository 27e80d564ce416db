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

use crate::compiler::compiled::EnumDef as CompiledEnum;
use crate::generator::casemungler::to_screaming_snake;
use crate::generator::rust::doc::format_with_note as doc_format_with_note;
use crate::generator::rust::Config;
use crate::generator::rust::Imports;
use crate::generator::rust::TypeName;
use proc_macro2::Ident;
use proc_macro2::Literal;
use proc_macro2::Span;
use proc_macro2::TokenStream;
use quote::quote;
use std::collections::HashSet;

/// String enumeration: a newtype over the lexical value with one
/// associated constant per enumerated value. Values outside of the
/// set are representable; `is_valid` tells them apart.
#[derive(Debug)]
pub struct EnumDef<'a> {
    pub name: TypeName<'a>,
    pub compiled: &'a CompiledEnum,
}

impl<'a> EnumDef<'a> {
    #[must_use]
    pub fn new(compiled: &'a CompiledEnum) -> Self {
        Self {
            name: TypeName::new(&compiled.name),
            compiled,
        }
    }

    /// Generate rust code for the enumeration.
    pub fn generate(self, tokens: &mut TokenStream, imports: &mut Imports, config: &Config) {
        let name = self.name;
        let cow = imports.add("std::borrow::Cow".into());
        let fmt = imports.add("std::fmt".into());
        let xml_text = imports.add(config.core("XmlText"));
        let invalid_value = imports.add(config.core("InvalidValue"));

        let values = &self.compiled.values;
        let consts = const_names(values)
            .into_iter()
            .map(|n| Ident::new(&n, Span::call_site()))
            .collect::<Vec<_>>();
        let literals = values.iter().map(|v| Literal::string(v)).collect::<Vec<_>>();
        let is_valid = if values.is_empty() {
            quote! { false }
        } else {
            quote! { matches!(self.as_str(), #(#literals)|*) }
        };
        let default = consts
            .first()
            .map_or_else(|| quote! { Self(#cow::Borrowed("")) }, |c| quote! { Self::#c });
        let allow = if name.inner().contains('_') {
            quote! { #[allow(non_camel_case_types)] }
        } else {
            TokenStream::new()
        };
        let doc = doc_format_with_note(
            self.compiled.doc.as_deref(),
            &format!("XML name: `{}`.", self.compiled.xml_name),
            config,
        );

        tokens.extend(quote! {
            #doc
            #[derive(Debug, Clone, PartialEq, Eq, Hash)]
            #allow
            pub struct #name(pub #cow<'static, str>);

            impl #name {
                #(pub const #consts: Self = Self(#cow::Borrowed(#literals));)*

                #[must_use]
                pub fn new<S: Into<String>>(value: S) -> Self {
                    Self(#cow::Owned(value.into()))
                }

                #[must_use]
                pub fn as_str(&self) -> &str {
                    &self.0
                }

                /// Value is one of the enumerated values.
                #[must_use]
                pub fn is_valid(&self) -> bool {
                    #is_valid
                }
            }

            impl Default for #name {
                fn default() -> Self {
                    #default
                }
            }

            impl #fmt::Display for #name {
                fn fmt(&self, f: &mut #fmt::Formatter<'_>) -> #fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl #xml_text for #name {
                fn to_text(&self) -> String {
                    self.0.to_string()
                }

                fn from_text(text: &str) -> Result<Self, #invalid_value> {
                    Ok(Self::new(text))
                }
            }
        });
    }
}

/// Names of constants of the enumerated values, in value order.
/// Values that reduce to the same name get `_2`, `_3`, ... suffixes.
#[must_use]
pub fn const_names(values: &[String]) -> Vec<String> {
    let mut taken = HashSet::new();
    values
        .iter()
        .map(|v| {
            let base = to_screaming_snake(v);
            let name = if taken.contains(&base) {
                (2..)
                    .map(|n| format!("{base}_{n}"))
                    .find(|name| !taken.contains(name))
                    .unwrap_or_default()
            } else {
                base
            };
            taken.insert(name.clone());
            name
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn compiled(values: &[&str]) -> CompiledEnum {
        CompiledEnum {
            name: "Unit".into(),
            xml_name: "unit".into(),
            values: values.iter().map(ToString::to_string).collect(),
            doc: None,
        }
    }

    #[test]
    fn constants_are_unique() {
        let values = ["kg", "Kg", "m/s", "1.5", ""].map(String::from);
        assert_eq!(const_names(&values), ["KG", "KG_2", "M_S", "V_1_5", "EMPTY"]);
    }

    #[test]
    fn generates_newtype_with_constants() {
        let compiled = compiled(&["kg", "lb"]);
        let mut tokens = TokenStream::new();
        let mut imports = Imports::new();
        EnumDef::new(&compiled).generate(&mut tokens, &mut imports, &Config::default());
        let text = tokens.to_string();
        assert!(text.contains("pub struct Unit (pub Cow < 'static , str >)"));
        assert!(text.contains("pub const KG : Self = Self (Cow :: Borrowed (\"kg\")) ;"));
        assert!(text.contains("matches ! (self . as_str () , \"kg\" | \"lb\")"));
        assert!(text.contains("Self :: KG"));
        assert!(syn::parse2::<syn::File>(tokens).is_ok());
    }
}
