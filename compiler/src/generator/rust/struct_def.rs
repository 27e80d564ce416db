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

use crate::compiler::compiled::FieldDef;
use crate::compiler::compiled::FieldType;
use crate::compiler::compiled::StructDef as CompiledStruct;
use crate::generator::rust::doc::format_and_generate as doc_format_and_generate;
use crate::generator::rust::doc::format_with_note as doc_format_with_note;
use crate::generator::rust::Config;
use crate::generator::rust::FieldName;
use crate::generator::rust::Imports;
use crate::generator::rust::TypeName;
use crate::xsd::BuiltinType;
use proc_macro2::Delimiter;
use proc_macro2::Group;
use proc_macro2::Ident;
use proc_macro2::Literal;
use proc_macro2::TokenStream;
use quote::quote;
use quote::TokenStreamExt as _;
use soapgen_core::FieldKind;
use soapgen_core::Occurs;

/// Generation of Rust struct together with its `XmlStruct`
/// implementation.
#[derive(Debug)]
pub struct StructDef<'a> {
    pub name: TypeName<'a>,
    pub compiled: &'a CompiledStruct,
}

/// How a field is read and written by the generic driver.
enum Access {
    /// Simple value (`XmlText`).
    Value(TokenStream),
    /// Nested struct (`XmlStruct`).
    Child(TokenStream),
    /// Raw XML capture.
    Raw,
}

impl<'a> StructDef<'a> {
    #[must_use]
    pub fn new(compiled: &'a CompiledStruct) -> Self {
        Self {
            name: TypeName::new(&compiled.name),
            compiled,
        }
    }

    /// Generate rust code for the structure.
    pub fn generate(self, tokens: &mut TokenStream, imports: &mut Imports, config: &Config) {
        let name = self.name;
        let xml_struct = imports.add(config.core("XmlStruct"));
        let struct_descriptor = imports.add(config.core("StructDescriptor"));
        let field_writer = imports.add(config.core("FieldWriter"));
        let field_reader = imports.add(config.core("FieldReader"));
        let decode_error = imports.add(config.core("DecodeError"));

        let mut fields_content = TokenStream::new();
        let mut descriptors = Vec::new();
        let mut writes = Vec::new();
        let mut reads = Vec::new();
        for (index, field) in self.compiled.fields.iter().enumerate() {
            let field_name = FieldName::new(&field.name);
            let index = Literal::usize_unsuffixed(index);
            let access = access(field, imports, config);
            let rust_type = rust_type(field, &access, imports, config);
            fields_content.extend([
                doc_format_and_generate(field.doc.as_deref(), config),
                quote! { pub #field_name: #rust_type, },
            ]);
            descriptors.push(descriptor(field, imports, config));
            writes.push(write_field(field, &field_name, &index, &access));
            let read = read_field(field, &index, &access);
            reads.push(quote! { #field_name: #read });
        }

        let doc = doc_format_with_note(
            self.compiled.doc.as_deref(),
            &self.xml_note(),
            config,
        );
        let derives = &config.derives;
        let allow = if name.inner().contains('_') {
            quote! { #[allow(non_camel_case_types)] }
        } else {
            TokenStream::new()
        };
        tokens.extend(quote! {
            #doc
            #[derive(#(#derives),*)]
            #allow
            pub struct #name
        });
        tokens.append(Group::new(Delimiter::Brace, fields_content));

        let xml_name = &self.compiled.xml_name;
        let namespace = option_literal(self.compiled.namespace.as_deref());
        let (w, r) = if self.compiled.fields.is_empty() {
            (quote! { _w }, quote! { _r })
        } else {
            (quote! { w }, quote! { r })
        };
        tokens.extend(quote! {
            impl #xml_struct for #name {
                const DESCRIPTOR: #struct_descriptor = #struct_descriptor {
                    name: #xml_name,
                    namespace: #namespace,
                    fields: &[#(#descriptors),*],
                };

                fn write_fields(&self, #w: &mut #field_writer<'_>) {
                    #(#writes)*
                }

                fn read_fields(#r: &mut #field_reader<'_>) -> Result<Self, #decode_error> {
                    Ok(Self {
                        #(#reads),*
                    })
                }
            }
        });
    }

    fn xml_note(&self) -> String {
        match &self.compiled.namespace {
            Some(ns) => format!("XML element: `{{{ns}}}{}`.", self.compiled.xml_name),
            None => format!("XML element: `{}`.", self.compiled.xml_name),
        }
    }
}

fn access(field: &FieldDef, imports: &mut Imports, config: &Config) -> Access {
    match &field.ty {
        FieldType::Builtin(builtin) => {
            builtin_type(builtin, imports, config).map_or(Access::Raw, Access::Value)
        }
        FieldType::Enum(name) => {
            let name = TypeName::new(name);
            Access::Value(quote! { #name })
        }
        FieldType::Struct(name) => {
            let name = TypeName::new(name);
            Access::Child(quote! { #name })
        }
        FieldType::StringList => Access::Value(quote! { Vec<String> }),
        FieldType::RawXml => Access::Raw,
    }
}

fn rust_type(field: &FieldDef, access: &Access, imports: &mut Imports, config: &Config) -> TokenStream {
    match (access, field.occurs) {
        (Access::Raw, _) => {
            let raw_xml = imports.add(config.core("RawXml"));
            quote! { #raw_xml }
        }
        (Access::Value(t), Occurs::One) => t.clone(),
        (Access::Value(t), Occurs::Optional) => quote! { Option<#t> },
        (Access::Value(t) | Access::Child(t), Occurs::Many) => quote! { Vec<#t> },
        (Access::Child(t), Occurs::One) if field.boxed => quote! { Box<#t> },
        (Access::Child(t), Occurs::One) => t.clone(),
        (Access::Child(t), Occurs::Optional) if field.boxed => quote! { Option<Box<#t>> },
        (Access::Child(t), Occurs::Optional) => quote! { Option<#t> },
    }
}

fn write_field(field: &FieldDef, name: &FieldName, index: &Literal, access: &Access) -> TokenStream {
    match (access, field.occurs) {
        (Access::Raw, _) => quote! { w.raw(#index, &self.#name); },
        (Access::Value(_), Occurs::One) => quote! { w.value(#index, &self.#name); },
        (Access::Value(_), Occurs::Optional) => quote! { w.value_opt(#index, self.#name.as_ref()); },
        (Access::Value(_), Occurs::Many) => quote! { w.values(#index, &self.#name); },
        (Access::Child(_), Occurs::One) if field.boxed => quote! { w.child(#index, &*self.#name); },
        (Access::Child(_), Occurs::One) => quote! { w.child(#index, &self.#name); },
        (Access::Child(_), Occurs::Optional) if field.boxed => {
            quote! { w.child_opt(#index, self.#name.as_deref()); }
        }
        (Access::Child(_), Occurs::Optional) => quote! { w.child_opt(#index, self.#name.as_ref()); },
        (Access::Child(_), Occurs::Many) => quote! { w.children(#index, &self.#name); },
    }
}

fn read_field(field: &FieldDef, index: &Literal, access: &Access) -> TokenStream {
    match (access, field.occurs) {
        (Access::Raw, _) => quote! { r.raw(#index)? },
        (Access::Value(_), Occurs::One) => quote! { r.value(#index)? },
        (Access::Value(_), Occurs::Optional) => quote! { r.value_opt(#index)? },
        (Access::Value(_), Occurs::Many) => quote! { r.values(#index)? },
        (Access::Child(_), Occurs::One) if field.boxed => quote! { Box::new(r.child(#index)?) },
        (Access::Child(_), Occurs::One) => quote! { r.child(#index)? },
        (Access::Child(_), Occurs::Optional) if field.boxed => {
            quote! { r.child_opt(#index)?.map(Box::new) }
        }
        (Access::Child(_), Occurs::Optional) => quote! { r.child_opt(#index)? },
        (Access::Child(_), Occurs::Many) => quote! { r.children(#index)? },
    }
}

fn descriptor(field: &FieldDef, imports: &mut Imports, config: &Config) -> TokenStream {
    let field_descriptor = imports.add(config.core("FieldDescriptor"));
    let field_kind = imports.add(config.core("FieldKind"));
    let occurs_type = imports.add(config.core("Occurs"));
    let name = match field.kind {
        FieldKind::CharData | FieldKind::InnerXml => "",
        FieldKind::Element | FieldKind::Attribute => &field.xml_name,
    };
    let namespace = option_literal(field.namespace.as_deref());
    let kind = match field.kind {
        FieldKind::Element => quote! { Element },
        FieldKind::Attribute => quote! { Attribute },
        FieldKind::CharData => quote! { CharData },
        FieldKind::InnerXml => quote! { InnerXml },
    };
    let occurs = match field.occurs {
        Occurs::One => quote! { One },
        Occurs::Optional => quote! { Optional },
        Occurs::Many => quote! { Many },
    };
    quote! {
        #field_descriptor {
            name: #name,
            namespace: #namespace,
            kind: #field_kind::#kind,
            occurs: #occurs_type::#occurs,
        }
    }
}

fn option_literal(v: Option<&str>) -> TokenStream {
    v.map_or_else(|| quote! { None }, |v| quote! { Some(#v) })
}

/// Rust type of a built-in XSD type; `None` for types that are
/// captured as raw XML.
fn builtin_type(builtin: &BuiltinType, imports: &mut Imports, config: &Config) -> Option<TokenStream> {
    let mut core = |name: &str| {
        let ident: Ident = imports.add(config.core(name));
        quote! { #ident }
    };
    let tokens = match builtin {
        BuiltinType::AnySimpleType
        | BuiltinType::String
        | BuiltinType::NormalizedString
        | BuiltinType::Token
        | BuiltinType::Language
        | BuiltinType::NmToken
        | BuiltinType::Name
        | BuiltinType::NcName
        | BuiltinType::Id
        | BuiltinType::IdRef
        | BuiltinType::Entity
        | BuiltinType::AnyUri
        | BuiltinType::Notation
        | BuiltinType::GYear
        | BuiltinType::GMonth
        | BuiltinType::GDay
        | BuiltinType::GYearMonth
        | BuiltinType::GMonthDay => quote! { String },
        BuiltinType::NmTokens | BuiltinType::IdRefs | BuiltinType::Entities => {
            quote! { Vec<String> }
        }
        BuiltinType::Boolean => quote! { bool },
        BuiltinType::Float | BuiltinType::Double | BuiltinType::Decimal => quote! { f64 },
        BuiltinType::Byte => quote! { i8 },
        BuiltinType::Short => quote! { i16 },
        BuiltinType::Int => quote! { i32 },
        BuiltinType::Long
        | BuiltinType::Integer
        | BuiltinType::NonPositiveInteger
        | BuiltinType::NegativeInteger => quote! { i64 },
        BuiltinType::UnsignedByte => quote! { u8 },
        BuiltinType::UnsignedShort => quote! { u16 },
        BuiltinType::UnsignedInt => quote! { u32 },
        BuiltinType::UnsignedLong
        | BuiltinType::NonNegativeInteger
        | BuiltinType::PositiveInteger => quote! { u64 },
        BuiltinType::DateTime => core("DateTime"),
        BuiltinType::Date => core("Date"),
        BuiltinType::Time => core("Time"),
        BuiltinType::Duration => core("Duration"),
        BuiltinType::HexBinary => core("HexBinary"),
        BuiltinType::Base64Binary => core("Base64Binary"),
        BuiltinType::QName => core("QName"),
        BuiltinType::AnyType | BuiltinType::Custom(_) => return None,
    };
    Some(tokens)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::compiler::compiled::StructKind;

    fn field(name: &str, ty: FieldType, kind: FieldKind, occurs: Occurs) -> FieldDef {
        FieldDef {
            name: name.into(),
            xml_name: name.to_lowercase(),
            namespace: None,
            kind,
            occurs,
            ty,
            boxed: false,
            doc: None,
            xsd_type: String::new(),
        }
    }

    fn generate(compiled: &CompiledStruct) -> (String, String) {
        let mut tokens = TokenStream::new();
        let mut imports = Imports::new();
        StructDef::new(compiled).generate(&mut tokens, &mut imports, &Config::default());
        let mut file = imports.generate();
        file.extend(tokens);
        let file = syn::parse2::<syn::File>(file).unwrap();
        let text = prettyplease::unparse(&file);
        (text.clone(), text.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    #[test]
    fn fields_follow_occurrence_and_boxing() {
        let mut next = field("Next", FieldType::Struct("Node".into()), FieldKind::Element, Occurs::Optional);
        next.boxed = true;
        let compiled = CompiledStruct {
            name: "Node".into(),
            kind: StructKind::ComplexType,
            xml_name: "Node".into(),
            namespace: None,
            fields: vec![
                field("Value", FieldType::Builtin(BuiltinType::Int), FieldKind::Element, Occurs::One),
                next,
                field("Tags", FieldType::Builtin(BuiltinType::String), FieldKind::Element, Occurs::Many),
                field("Stamp", FieldType::Builtin(BuiltinType::DateTime), FieldKind::Attribute, Occurs::Optional),
                field("Any", FieldType::RawXml, FieldKind::InnerXml, Occurs::One),
            ],
            doc: None,
        };
        let (text, flat) = generate(&compiled);
        assert!(text.contains("use soapgen_core::DateTime;"));
        assert!(text.contains("use soapgen_core::RawXml;"));
        assert!(flat.contains("pub value: i32,"));
        assert!(flat.contains("pub next: Option<Box<Node>>,"));
        assert!(flat.contains("pub tags: Vec<String>,"));
        assert!(flat.contains("pub stamp: Option<DateTime>,"));
        assert!(flat.contains("pub any: RawXml,"));
        assert!(flat.contains("w.child_opt(1, self.next.as_deref());"));
        assert!(flat.contains("next: r.child_opt(1)?.map(Box::new),"));
        assert!(flat.contains("w.value_opt(3, self.stamp.as_ref());"));
        assert!(flat.contains("kind: FieldKind::InnerXml,"));
    }

    #[test]
    fn keyword_fields_and_namespaces() {
        let mut ty = field("Type", FieldType::Enum("Mode".into()), FieldKind::Attribute, Occurs::One);
        ty.xml_name = "type".into();
        let mut result = field("Result", FieldType::Struct("Node".into()), FieldKind::Element, Occurs::One);
        result.namespace = Some("urn:calc".into());
        let compiled = CompiledStruct {
            name: "Add_Result".into(),
            kind: StructKind::Inline,
            xml_name: "Add".into(),
            namespace: Some("urn:calc".into()),
            fields: vec![ty, result],
            doc: Some("Sum of numbers.".into()),
        };
        let (text, flat) = generate(&compiled);
        assert!(text.contains("#[allow(non_camel_case_types)]"));
        assert!(text.contains("/// Sum of numbers."));
        assert!(text.contains("/// XML element: `{urn:calc}Add`."));
        assert!(flat.contains("pub r#type: Mode,"));
        assert!(flat.contains("name: \"Add\", namespace: Some(\"urn:calc\"),"));
        assert!(flat.contains("name: \"result\", namespace: Some(\"urn:calc\"),"));
        assert!(flat.contains("r#type: r.value(0)?,"));
    }

    #[test]
    fn empty_struct_ignores_reader_and_writer() {
        let compiled = CompiledStruct {
            name: "Ping".into(),
            kind: StructKind::Element,
            xml_name: "Ping".into(),
            namespace: None,
            fields: vec![],
            doc: None,
        };
        let (_, flat) = generate(&compiled);
        assert!(flat.contains("pub struct Ping {}"));
        assert!(flat.contains("fn write_fields(&self, _w: &mut FieldWriter<'_>) {}"));
        assert!(flat.contains("Ok(Self {})"));
    }
}
