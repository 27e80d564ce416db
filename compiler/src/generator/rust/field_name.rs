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

use crate::generator::casemungler::camel_to_snake;
use proc_macro2::Ident;
use proc_macro2::Span;
use proc_macro2::TokenStream;
use quote::ToTokens;
use quote::TokenStreamExt as _;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const NOT_RAW: &[&str] = &["crate", "self", "super", "Self"];

/// Snake case identifier of a struct field or a client method.
///
/// Example of representation: `get_weather_result`, `r#type`, `self_`.
#[derive(PartialEq, Eq, Hash, Clone, Ord, PartialOrd)]
pub struct FieldName(String);

impl FieldName {
    /// Identifier for a PascalCase name.
    #[must_use]
    pub fn new(pascal: &str) -> Self {
        Self(camel_to_snake(pascal))
    }

    /// Same name with a numeric suffix, for disambiguation.
    #[must_use]
    pub fn with_suffix(&self, n: usize) -> Self {
        Self(format!("{}_{n}", self.0))
    }

    /// Snake case form without raw prefix or escaping.
    #[must_use]
    pub fn snake(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        syn::parse_str::<syn::Ident>(&self.to_string()).is_ok()
    }

    fn is_raw(&self) -> bool {
        KEYWORDS.contains(&self.0.as_str())
    }
}

impl ToTokens for FieldName {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        if self.is_raw() {
            tokens.append(Ident::new_raw(&self.0, Span::call_site()));
        } else {
            tokens.append(Ident::new(&self.to_string(), Span::call_site()));
        }
    }
}

impl Display for FieldName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = self.0.as_str();
        if self.is_raw() {
            write!(f, "r#{name}")
        } else if NOT_RAW.contains(&name) {
            write!(f, "{name}_")
        } else if name.starts_with(|c: char| c.is_ascii_digit()) {
            write!(f, "_{name}")
        } else {
            f.write_str(name)
        }
    }
}

impl Debug for FieldName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use quote::quote;

    #[test]
    fn keywords_are_escaped() {
        assert_eq!(FieldName::new("Type").to_string(), "r#type");
        assert_eq!(FieldName::new("Self").to_string(), "self_");
        assert_eq!(FieldName::new("Crate").to_string(), "crate_");
        assert_eq!(FieldName::new("2ndLine").to_string(), "_2nd_line");
        assert_eq!(FieldName::new("CityName").to_string(), "city_name");
        let name = FieldName::new("Match");
        assert_eq!(quote! { #name }.to_string(), "r#match");
    }

    #[test]
    fn escaped_names_are_valid_identifiers() {
        for name in ["Type", "Self", "Super", "Async", "1", "GetWeatherResult"] {
            assert!(FieldName::new(name).is_valid(), "{name}");
        }
    }
}
