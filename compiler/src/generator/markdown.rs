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

//! Markdown documentation of a compiled WSDL.
//!
//! The document lists services with their ports and addresses, the
//! operations of the generated client, then every generated struct
//! with its fields and every enumeration with its values.

use crate::compiler::compiled::FieldDef;
use crate::compiler::compiled::StructDef;
use crate::compiler::Compiled;
use soapgen_core::FieldKind;
use soapgen_core::Occurs;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Markdown text of `compiled`.
#[must_use]
pub fn generate(compiled: &Compiled) -> String {
    MarkdownDoc(compiled).to_string()
}

/// Markdown rendering of compiled WSDL.
pub struct MarkdownDoc<'a>(pub &'a Compiled);

impl Display for MarkdownDoc<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let compiled = self.0;
        let title = compiled
            .services
            .first()
            .map_or("SOAP service", |s| s.name.as_str());
        writeln!(f, "# {title}")?;
        paragraph(f, compiled.documentation.as_deref())?;
        writeln!(f)?;
        if let Some(ns) = &compiled.target_namespace {
            writeln!(f, "- **Target namespace:** `{ns}`")?;
        }
        writeln!(f, "- **Binding style:** {}", compiled.style)?;
        self.services(f)?;
        self.operations(f)?;
        self.types(f)?;
        self.enums(f)
    }
}

impl MarkdownDoc<'_> {
    fn services(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.0.services.is_empty() {
            return Ok(());
        }
        writeln!(f, "\n## Services")?;
        for service in &self.0.services {
            writeln!(f, "\n### {}", service.name)?;
            paragraph(f, service.doc.as_deref())?;
            writeln!(f, "\n| Port | Binding | Protocol | Address |")?;
            writeln!(f, "|------|---------|----------|---------|")?;
            for port in &service.ports {
                writeln!(
                    f,
                    "| {} | {} | {} | {} |",
                    cell(&port.name),
                    cell(&port.binding),
                    port.protocol,
                    port.address.as_deref().map_or_else(String::new, cell)
                )?;
            }
        }
        Ok(())
    }

    fn operations(&self, f: &mut Formatter<'_>) -> FmtResult {
        let Some(client) = &self.0.client else {
            return Ok(());
        };
        writeln!(f, "\n## Operations")?;
        writeln!(f, "\nPort type `{}`, {}.", client.port_type, client.soap_version)?;
        if !client.default_endpoint.is_empty() {
            writeln!(f, "Default endpoint: <{}>.", client.default_endpoint)?;
        }
        for op in &client.operations {
            writeln!(f, "\n### {}", op.name)?;
            paragraph(f, op.doc.as_deref())?;
            writeln!(f)?;
            if op.soap_action.is_empty() {
                writeln!(f, "- **SOAPAction:** none")?;
            } else {
                writeln!(f, "- **SOAPAction:** `{}`", op.soap_action)?;
            }
            writeln!(f, "- **Input:** {}", type_link(&op.input))?;
            match &op.output {
                Some(output) => writeln!(f, "- **Output:** {}", type_link(output))?,
                None => writeln!(f, "- **Output:** none (one-way)")?,
            }
        }
        Ok(())
    }

    fn types(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.0.structs.is_empty() {
            return Ok(());
        }
        writeln!(f, "\n## Types")?;
        self.0.structs.iter().try_for_each(|s| struct_section(f, s))
    }

    fn enums(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.0.enums.is_empty() {
            return Ok(());
        }
        writeln!(f, "\n## Enumerations")?;
        for e in &self.0.enums {
            writeln!(f, "\n### {}", e.name)?;
            paragraph(f, e.doc.as_deref())?;
            let values = e
                .values
                .iter()
                .map(|v| format!("`{v}`"))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "\nValues: {values}")?;
        }
        Ok(())
    }
}

fn struct_section(f: &mut Formatter<'_>, s: &StructDef) -> FmtResult {
    writeln!(f, "\n### {}", s.name)?;
    paragraph(f, s.doc.as_deref())?;
    match &s.namespace {
        Some(ns) => writeln!(f, "\nXML element `{}` in `{ns}`.", s.xml_name)?,
        None => writeln!(f, "\nXML element `{}`.", s.xml_name)?,
    }
    if s.fields.is_empty() {
        return writeln!(f, "\nNo fields.");
    }
    writeln!(f, "\n| Field | XML name | XSD type | Occurrence |")?;
    writeln!(f, "|-------|----------|----------|------------|")?;
    for field in &s.fields {
        writeln!(
            f,
            "| {} | {} | {} | {} |",
            field.name,
            xml_name(field),
            cell(&field.xsd_type),
            occurrence(field.occurs)
        )?;
    }
    Ok(())
}

fn paragraph(f: &mut Formatter<'_>, doc: Option<&str>) -> FmtResult {
    let Some(doc) = doc.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(());
    };
    writeln!(f)?;
    doc.lines().try_for_each(|l| writeln!(f, "{}", l.trim()))
}

fn xml_name(field: &FieldDef) -> String {
    match field.kind {
        FieldKind::Element => format!("`{}`", field.xml_name),
        FieldKind::Attribute => format!("`@{}`", field.xml_name),
        FieldKind::CharData => "(text)".into(),
        FieldKind::InnerXml => "(any)".into(),
    }
}

const fn occurrence(occurs: Occurs) -> &'static str {
    match occurs {
        Occurs::One => "required",
        Occurs::Optional => "optional",
        Occurs::Many => "repeated",
    }
}

fn type_link(name: &str) -> String {
    format!("[`{name}`](#{})", name.to_lowercase())
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}
