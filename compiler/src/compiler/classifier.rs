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

//! Classification of top-level elements and wrapper policy.

use crate::compiler::binding_style::BindingStyle;
use crate::compiler::schema_context::SchemaSet;
use crate::wsdl::Definitions;
use crate::wsdl::Style;
use crate::wsdl::Use;
use crate::xsd::Element;
use crate::xsd::ElementShape;
use crate::xsd::ModelGroup;
use crate::xsd::Particle;
use serde::Deserialize;
use std::collections::HashSet;

/// Role of a top-level element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementClass {
    /// Stand-alone data type.
    DataElement,
    /// Root of a SOAP request or response body.
    OperationMessageElement,
    /// Thin element whose content is a single reference to another
    /// element.
    MessageWrapper,
}

/// Override of the wrapper naming policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WrapperPolicy {
    /// Decide from binding style and schema shape.
    Auto,
    Always,
    Never,
}

impl Default for WrapperPolicy {
    fn default() -> Self {
        Self::Auto
    }
}

/// Classifier of top-level elements of a schema set.
pub struct Classifier<'a> {
    /// Elements referenced by `element` of some message part.
    message_elements: HashSet<*const Element>,
    schemas: &'a SchemaSet<'a>,
}

impl<'a> Classifier<'a> {
    #[must_use]
    pub fn new(defs: &'a Definitions, schemas: &'a SchemaSet<'a>) -> Self {
        let message_elements = defs
            .messages
            .iter()
            .flat_map(|m| m.parts.iter())
            .filter_map(|p| p.element.as_ref())
            .filter_map(|name| schemas.resolve_element(name))
            .map(|(_, e)| e as *const Element)
            .collect();
        Self {
            message_elements,
            schemas,
        }
    }

    #[must_use]
    pub fn classify(&self, element: &Element) -> ElementClass {
        if self.message_elements.contains(&(element as *const Element)) {
            ElementClass::OperationMessageElement
        } else if is_message_wrapper(element) {
            ElementClass::MessageWrapper
        } else {
            ElementClass::DataElement
        }
    }

    /// Some top-level element of the schema set has the message
    /// wrapper shape.
    #[must_use]
    pub fn has_message_wrapper(&self) -> bool {
        self.schemas
            .schemas()
            .flat_map(|s| s.elements.iter())
            .any(|e| self.classify(e) == ElementClass::MessageWrapper)
    }

    /// Operation-message elements get the `Wrapper` suffix.
    #[must_use]
    pub fn use_wrappers(&self, style: &BindingStyle, policy: WrapperPolicy) -> bool {
        match policy {
            WrapperPolicy::Always => true,
            WrapperPolicy::Never => false,
            WrapperPolicy::Auto => match (&style.style, style.use_) {
                (Style::Rpc, _) => true,
                (Style::Document, Use::Literal) => self.has_message_wrapper(),
                (Style::Document, Use::Encoded) => false,
                (Style::Other(_), _) => true,
            },
        }
    }
}

/// Inline complex type holds exactly one child element, a reference to
/// an element with another local name, and the wrapper name is
/// camelCase or ends in "response".
fn is_message_wrapper(element: &Element) -> bool {
    let ct = match element.shape() {
        ElementShape::Complex(ct) => ct,
        _ => return false,
    };
    let mut children = Vec::new();
    if let Some(model) = &ct.model {
        collect_elements(model, &mut children);
    }
    let name = element.local_name();
    match children[..] {
        [child] => {
            let refers_elsewhere = child
                .ref_name
                .as_ref()
                .map_or(false, |r| r.local != name);
            let camel = name.chars().next().map_or(false, char::is_lowercase);
            refers_elsewhere && (camel || name.to_lowercase().ends_with("response"))
        }
        _ => false,
    }
}

fn collect_elements<'a>(model: &'a ModelGroup, out: &mut Vec<&'a Element>) {
    let particles = match model {
        ModelGroup::Sequence(c) | ModelGroup::Choice(c) | ModelGroup::All(c) => &c.particles,
        ModelGroup::Group(_) => return,
    };
    collect_particles(particles, out);
}

fn collect_particles<'a>(particles: &'a [Particle], out: &mut Vec<&'a Element>) {
    for particle in particles {
        match particle {
            Particle::Element(e) => out.push(e),
            Particle::Sequence(c) | Particle::Choice(c) => collect_particles(&c.particles, out),
            Particle::Group(_) | Particle::Any(_) => (),
        }
    }
}
