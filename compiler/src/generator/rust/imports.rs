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

use proc_macro2::Ident;
use proc_macro2::Punct;
use proc_macro2::Spacing;
use proc_macro2::Span;
use proc_macro2::TokenStream;
use proc_macro2::TokenTree;
use quote::quote;
use std::collections::BTreeSet;

/// Symbols referenced by one generated file.
///
/// Generators ask for a symbol by its full path and use the returned
/// short name; `use` declarations are emitted once for the whole file,
/// sorted and deduplicated.
#[derive(Debug, Default)]
pub struct Imports {
    paths: BTreeSet<String>,
}

impl Imports {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path` and return its last segment.
    pub fn add(&mut self, path: String) -> Ident {
        let name = Ident::new(path.rsplit("::").next().unwrap_or(&path), Span::call_site());
        self.paths.insert(path);
        name
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// `use` declarations of all recorded symbols.
    #[must_use]
    pub fn generate(&self) -> TokenStream {
        let mut tokens = TokenStream::new();
        for path in &self.paths {
            let path = path_tokens(path);
            tokens.extend(quote! { use #path; });
        }
        tokens
    }
}

/// Tokens of a `::` separated path.
#[must_use]
pub fn path_tokens(path: &str) -> TokenStream {
    let mut tokens = TokenStream::new();
    for (no, segment) in path.split("::").enumerate() {
        if no > 0 {
            tokens.extend([
                TokenTree::Punct(Punct::new(':', Spacing::Joint)),
                TokenTree::Punct(Punct::new(':', Spacing::Alone)),
            ]);
        }
        tokens.extend([TokenTree::Ident(Ident::new(segment, Span::call_site()))]);
    }
    tokens
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn imports_are_sorted_and_deduplicated() {
        let mut imports = Imports::new();
        assert_eq!(imports.add("soapgen_core::XmlStruct".into()), "XmlStruct");
        imports.add("soapgen_core::FieldKind".into());
        imports.add("soapgen_core::XmlStruct".into());
        imports.add("std::borrow::Cow".into());
        let text = imports.generate().to_string().replace(' ', "");
        assert_eq!(
            text,
            "usesoapgen_core::FieldKind;usesoapgen_core::XmlStruct;usestd::borrow::Cow;"
        );
    }
}
