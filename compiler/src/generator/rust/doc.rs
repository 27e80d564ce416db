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

//! Generation of Rust doc by documentation of schema components.

use crate::generator::rust::Config;
use proc_macro2::Delimiter;
use proc_macro2::Group;
use proc_macro2::Ident;
use proc_macro2::Literal;
use proc_macro2::Punct;
use proc_macro2::Spacing;
use proc_macro2::Span;
use proc_macro2::TokenStream;
use proc_macro2::TokenTree;

/// Doc attributes for optional documentation text. Nothing is
/// generated if docs are disabled or there is no text.
#[must_use]
pub fn format_and_generate(doc: Option<&str>, config: &Config) -> TokenStream {
    if !config.emit_docs {
        return TokenStream::new();
    }
    doc.and_then(format)
        .map(|lines| generate(&lines))
        .unwrap_or_default()
}

/// Doc attributes for documentation text followed by a paragraph
/// with `note`. The note is generated even if docs are disabled.
#[must_use]
pub fn format_with_note(doc: Option<&str>, note: &str, config: &Config) -> TokenStream {
    let mut lines = doc
        .filter(|_| config.emit_docs)
        .and_then(format)
        .map(|mut lines| {
            lines.push(String::new());
            lines
        })
        .unwrap_or_default();
    lines.push(format!(" {note}"));
    generate(&lines)
}

/// Doc lines of the documentation text: indentation is dropped,
/// leading and trailing blank lines are removed.
#[must_use]
pub fn format(doc: &str) -> Option<Vec<String>> {
    let lines = doc.lines().map(str::trim).collect::<Vec<_>>();
    let first = lines.iter().position(|l| !l.is_empty())?;
    let last = lines.iter().rposition(|l| !l.is_empty())?;
    Some(
        lines[first..=last]
            .iter()
            .map(|l| {
                if l.is_empty() {
                    String::new()
                } else {
                    format!(" {l}")
                }
            })
            .collect(),
    )
}

#[must_use]
pub fn generate(lines: &[impl ToString]) -> TokenStream {
    let mut ts = TokenStream::new();
    for l in lines {
        let mut attr_inner = TokenStream::new();
        attr_inner.extend([
            TokenTree::Ident(Ident::new("doc", Span::call_site())),
            TokenTree::Punct(Punct::new('=', Spacing::Alone)),
            TokenTree::Literal(Literal::string(&l.to_string())),
        ]);
        ts.extend([
            TokenTree::Punct(Punct::new('#', Spacing::Alone)),
            TokenTree::Group(Group::new(Delimiter::Bracket, attr_inner)),
        ]);
    }
    ts
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn documentation_is_trimmed() {
        let lines = format("\n   Get weather report.\n\n   For a city.\n  ").unwrap();
        assert_eq!(lines, [" Get weather report.", "", " For a city."]);
        assert_eq!(format("  \n "), None);
    }

    #[test]
    fn note_follows_documentation() {
        let config = Config::default();
        let doc = format_with_note(Some("Weather."), "XML name: `w`.", &config).to_string();
        assert!(doc.contains("\" Weather.\""));
        assert!(doc.contains("\"\""));
        assert!(doc.contains("\" XML name: `w`.\""));
        let config = Config::default().emit_docs(false);
        let doc = format_with_note(Some("Weather."), "XML name: `w`.", &config).to_string();
        assert!(!doc.contains("Weather"));
    }

    #[test]
    fn disabled_docs_generate_nothing() {
        let config = Config::default().emit_docs(false);
        assert!(format_and_generate(Some("text"), &config).is_empty());
        let config = Config::default();
        let doc = format_and_generate(Some("text"), &config).to_string();
        assert!(doc.contains("doc"));
        assert!(doc.contains("\" text\""));
    }
}
