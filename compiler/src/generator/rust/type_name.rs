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
use proc_macro2::Span;
use proc_macro2::TokenStream;
use quote::ToTokens;
use quote::TokenStreamExt as _;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Name of a generated type (struct or enumeration).
///
/// Names come from the type registry already in PascalCase; a name
/// starting with a digit gets a leading underscore.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct TypeName<'a>(&'a str);

impl<'a> TypeName<'a> {
    #[must_use]
    pub const fn new(v: &'a str) -> Self {
        Self(v)
    }

    /// Name as written in the schema model.
    #[must_use]
    pub const fn inner(&self) -> &'a str {
        self.0
    }

    /// The name is a valid Rust identifier.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        syn::parse_str::<syn::Ident>(&self.to_string()).is_ok()
    }
}

impl ToTokens for TypeName<'_> {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.append(Ident::new(&self.to_string(), Span::call_site()));
    }
}

impl Display for TypeName<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.0.starts_with(|c: char| c.is_ascii_digit()) {
            write!(f, "_{}", self.0)
        } else {
            f.write_str(self.0)
        }
    }
}

impl Debug for TypeName<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(self, f)
    }
}
