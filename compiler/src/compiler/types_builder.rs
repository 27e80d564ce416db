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

//! Builder of the compiled representation.
//!
//! Works in three passes:
//!
//! 1. Top-level names: enumerations, named complex types (sorted by
//!    name), top-level elements (document order) and wrappers of rpc
//!    messages that have no single element part.
//! 2. Inline names: anonymous complex types and inline enumerations,
//!    so that fields can refer to them.
//! 3. Fields of every emitted struct, followed by boxing of recursive
//!    fields.

use crate::compiler::anonymous_types::inline_name;
use crate::compiler::anonymous_types::AnonymousType;
use crate::compiler::anonymous_types::AnonymousTypes;
use crate::compiler::binding_style::primary_binding;
use crate::compiler::binding_style::BindingStyle;
use crate::compiler::classifier::Classifier;
use crate::compiler::classifier::ElementClass;
use crate::compiler::compiled::ClientDef;
use crate::compiler::compiled::Compiled;
use crate::compiler::compiled::EnumDef;
use crate::compiler::compiled::FieldDef;
use crate::compiler::compiled::FieldType;
use crate::compiler::compiled::OperationDef;
use crate::compiler::compiled::PortDef;
use crate::compiler::compiled::ServiceDef;
use crate::compiler::compiled::StructDef;
use crate::compiler::compiled::StructKind;
use crate::compiler::field_registry::FieldRegistry;
use crate::compiler::schema_context::SchemaSet;
use crate::compiler::type_registry::Signature;
use crate::compiler::type_registry::TypeContext;
use crate::compiler::type_registry::TypeRegistry;
use crate::generator::casemungler::to_pascal;
use crate::qname::QName;
use crate::wsdl::Address;
use crate::wsdl::Binding;
use crate::wsdl::Definitions;
use crate::wsdl::Message;
use crate::wsdl::Operation;
use crate::wsdl::OperationMessage;
use crate::xsd::Annotation;
use crate::xsd::Attribute;
use crate::xsd::AttributeUse;
use crate::xsd::BuiltinType;
use crate::xsd::ComplexType;
use crate::xsd::Content;
use crate::xsd::DerivationKind;
use crate::xsd::Element;
use crate::xsd::ElementShape;
use crate::xsd::Form;
use crate::xsd::GroupRef;
use crate::xsd::ModelGroup;
use crate::xsd::Occurrence;
use crate::xsd::Particle;
use crate::xsd::Schema;
use crate::xsd::SimpleType;
use crate::xsd::SimpleVariety;
use soapgen_core::FieldKind;
use soapgen_core::Occurs;
use soapgen_core::SoapVersion;
use std::collections::HashMap;
use std::collections::HashSet;
use tracing::debug;
use tracing::warn;

/// Nesting limit of groups, derivations and simple type bases.
const MAX_DEPTH: usize = 32;

enum Source<'a> {
    ComplexType(&'a Schema, &'a ComplexType),
    Element(&'a Schema, &'a Element),
    Message(&'a Message),
}

struct Planned<'a> {
    name: String,
    xml_name: String,
    namespace: Option<String>,
    doc: Option<String>,
    source: Source<'a>,
}

pub struct TypesBuilder<'a> {
    defs: &'a Definitions,
    schemas: &'a SchemaSet<'a>,
    classifier: &'a Classifier<'a>,
    use_wrappers: bool,
    registry: TypeRegistry,
    anonymous: AnonymousTypes<'a>,
    enums: Vec<EnumDef>,
    enum_names: HashMap<*const SimpleType, String>,
    complex_names: HashMap<*const ComplexType, String>,
    element_names: HashMap<*const Element, String>,
    /// Wrappers of messages keyed by operation name and direction
    /// (`true` for output).
    synthesized: HashMap<(&'a str, bool), String>,
    /// Namespace of complex types reused as operation messages.
    promoted: HashMap<String, String>,
    complex_plan: Vec<Planned<'a>>,
    element_plan: Vec<Planned<'a>>,
    wrapper_plan: Vec<Planned<'a>>,
}

impl<'a> TypesBuilder<'a> {
    #[must_use]
    pub fn new(
        defs: &'a Definitions,
        schemas: &'a SchemaSet<'a>,
        classifier: &'a Classifier<'a>,
        use_wrappers: bool,
    ) -> Self {
        Self {
            defs,
            schemas,
            classifier,
            use_wrappers,
            registry: TypeRegistry::new(),
            anonymous: AnonymousTypes::new(),
            enums: Vec::new(),
            enum_names: HashMap::new(),
            complex_names: HashMap::new(),
            element_names: HashMap::new(),
            synthesized: HashMap::new(),
            promoted: HashMap::new(),
            complex_plan: Vec::new(),
            element_plan: Vec::new(),
            wrapper_plan: Vec::new(),
        }
    }

    #[must_use]
    pub fn build(mut self, style: BindingStyle) -> Compiled {
        self.register_enums();
        self.register_complex_types();
        self.register_elements();
        self.register_message_wrappers();
        self.register_inline_types();

        let complex_plan = std::mem::take(&mut self.complex_plan);
        let element_plan = std::mem::take(&mut self.element_plan);
        let wrapper_plan = std::mem::take(&mut self.wrapper_plan);

        let mut structs = Vec::new();
        for planned in complex_plan {
            let namespace = self.promoted.get(&planned.name).cloned();
            structs.push(StructDef {
                namespace,
                ..self.struct_def(planned, StructKind::ComplexType)
            });
        }
        for anonymous in self.anonymous.structs() {
            structs.push(StructDef {
                name: anonymous.name.clone(),
                kind: StructKind::Inline,
                xml_name: anonymous.xml_name.clone(),
                namespace: None,
                fields: self.complex_fields(anonymous.complex_type, anonymous.schema),
                doc: doc_of(anonymous.complex_type.annotation.as_ref()),
            });
        }
        for planned in element_plan {
            structs.push(self.struct_def(planned, StructKind::Element));
        }
        for planned in wrapper_plan {
            structs.push(self.struct_def(planned, StructKind::Synthesized));
        }
        apply_boxing(&mut structs);

        let mut enums = std::mem::take(&mut self.enums);
        enums.extend(self.anonymous.enums().iter().map(|e| EnumDef {
            name: e.name.clone(),
            xml_name: e.xml_name.clone(),
            values: e.values.to_vec(),
            doc: doc_of(e.annotation),
        }));

        Compiled {
            target_namespace: self.defs.target_namespace.clone(),
            documentation: self.defs.documentation.clone(),
            style,
            enums,
            structs,
            client: self.client(),
            services: services(self.defs),
        }
    }

    fn struct_def(&self, planned: Planned<'a>, kind: StructKind) -> StructDef {
        let fields = match planned.source {
            Source::ComplexType(schema, ct) => self.complex_fields(ct, schema),
            Source::Element(schema, element) => self.element_fields(element, schema),
            Source::Message(message) => self.message_fields(message),
        };
        StructDef {
            name: planned.name,
            kind,
            xml_name: planned.xml_name,
            namespace: planned.namespace,
            fields,
            doc: planned.doc,
        }
    }

    // Pass 1: top-level names.

    fn register_enums(&mut self) {
        let schemas = self.schemas;
        for simple_type in schemas.schemas().flat_map(|s| s.simple_types.iter()) {
            let (Some(xml_name), values) = (&simple_type.name, simple_type.enumeration()) else {
                continue;
            };
            if values.is_empty() {
                continue;
            }
            let name = self.registry.reserve(&to_pascal(xml_name));
            self.enum_names
                .insert(simple_type as *const SimpleType, name.clone());
            self.enums.push(EnumDef {
                name,
                xml_name: xml_name.clone(),
                values: values.to_vec(),
                doc: doc_of(simple_type.annotation.as_ref()),
            });
        }
    }

    fn register_complex_types(&mut self) {
        let schemas = self.schemas;
        let mut types = schemas
            .schemas()
            .flat_map(|s| {
                s.complex_types
                    .iter()
                    .filter_map(move |ct| ct.name.as_deref().map(|name| (s, ct, name)))
            })
            .collect::<Vec<_>>();
        types.sort_by(|a, b| a.2.cmp(b.2));
        for (schema, ct, xml_name) in types {
            let signature = self.signature(xml_name, ct);
            let registration = self
                .registry
                .register(xml_name, TypeContext::DataElement, signature);
            self.complex_names
                .insert(ct as *const ComplexType, registration.name.clone());
            if registration.is_new {
                self.complex_plan.push(Planned {
                    name: registration.name,
                    xml_name: xml_name.to_string(),
                    namespace: None,
                    doc: doc_of(ct.annotation.as_ref()),
                    source: Source::ComplexType(schema, ct),
                });
            }
        }
    }

    fn register_elements(&mut self) {
        let schemas = self.schemas;
        for schema in schemas.schemas() {
            for element in &schema.elements {
                let class = self.classifier.classify(element);
                let xml_name = element.local_name();
                debug!("element {xml_name} classified as {class:?}");
                let is_message = class == ElementClass::OperationMessageElement;
                let context = if is_message && self.use_wrappers {
                    TypeContext::SoapWrapper
                } else {
                    TypeContext::DataElement
                };
                let signature = self.element_signature(element);
                let registration = self.registry.register(xml_name, context, signature);
                let namespace = if is_message {
                    schema.target_namespace.clone()
                } else {
                    None
                };
                self.element_names
                    .insert(element as *const Element, registration.name.clone());
                if registration.is_new {
                    let doc = doc_of(element.annotation.as_ref()).or_else(|| match element.shape() {
                        ElementShape::Complex(ct) => doc_of(ct.annotation.as_ref()),
                        _ => None,
                    });
                    self.element_plan.push(Planned {
                        name: registration.name,
                        xml_name: xml_name.to_string(),
                        namespace,
                        doc,
                        source: Source::Element(schema, element),
                    });
                } else if let Some(namespace) = namespace {
                    self.promoted.insert(registration.name, namespace);
                }
            }
        }
    }

    /// Messages of client operations without a single element part get
    /// a struct named after the operation.
    fn register_message_wrappers(&mut self) {
        let defs = self.defs;
        let Some(binding) = primary_binding(defs) else {
            return;
        };
        let Some(port_type) = defs.port_type(&binding.port_type) else {
            return;
        };
        for op in &port_type.operations {
            let binding_op = binding.operations.iter().find(|b| b.name == op.name);
            let directions = op
                .input
                .iter()
                .map(|m| (m, false))
                .chain(op.output.iter().map(|m| (m, true)));
            for (op_message, is_output) in directions {
                let Some(message) = defs.message(&op_message.message) else {
                    continue;
                };
                if single_element_part(message).is_some() {
                    continue;
                }
                let xml_name = if is_output {
                    format!("{}Response", op.name)
                } else {
                    op.name.clone()
                };
                let base = if self.use_wrappers {
                    format!("{}Wrapper", to_pascal(&xml_name))
                } else {
                    to_pascal(&xml_name)
                };
                let name = self.registry.reserve(&base);
                let namespace = binding_op
                    .and_then(|b| if is_output { b.output.as_ref() } else { b.input.as_ref() })
                    .and_then(|m| m.body.as_ref())
                    .and_then(|body| body.namespace.clone())
                    .or_else(|| defs.target_namespace.clone());
                debug!("message {} wrapped as {name}", message.name);
                self.synthesized
                    .insert((op.name.as_str(), is_output), name.clone());
                self.wrapper_plan.push(Planned {
                    name,
                    xml_name,
                    namespace,
                    doc: None,
                    source: Source::Message(message),
                });
            }
        }
    }

    fn signature(&self, local_name: &str, ct: &ComplexType) -> Signature {
        let (model, attributes) = match &ct.content {
            Some(Content::Simple(d)) | Some(Content::Complex(d)) => {
                (d.model.as_ref(), d.attributes.len() + d.attribute_groups.len())
            }
            None => (ct.model.as_ref(), ct.attributes.len() + ct.attribute_groups.len()),
        };
        Signature {
            local_name: local_name.to_string(),
            has_complex_type: true,
            sequence_count: model.map_or(0, count_elements),
            attribute_count: attributes,
        }
    }

    fn element_signature(&self, element: &Element) -> Signature {
        let local_name = element.local_name();
        let complex_type = match element.shape() {
            ElementShape::Complex(ct) => Some(ct),
            ElementShape::Type(name) => self.schemas.resolve_complex_type(name).map(|(_, ct)| ct),
            _ => None,
        };
        match complex_type {
            Some(ct) => self.signature(local_name, ct),
            None => Signature {
                local_name: local_name.to_string(),
                has_complex_type: false,
                sequence_count: 0,
                attribute_count: 0,
            },
        }
    }

    // Pass 2: inline names.

    fn register_inline_types(&mut self) {
        let schemas = self.schemas;
        for schema in schemas.schemas() {
            for element in &schema.elements {
                let prefix = to_pascal(element.local_name());
                match element.shape() {
                    ElementShape::Complex(ct) => self.walk_complex(&prefix, ct, schema, 0),
                    ElementShape::Simple(st) => self.walk_simple(&prefix, "Value", st),
                    _ => (),
                }
            }
            for ct in &schema.complex_types {
                if let Some(xml_name) = &ct.name {
                    self.walk_complex(&to_pascal(xml_name), ct, schema, 0);
                }
            }
        }
    }

    fn walk_simple(&mut self, parent: &str, local: &str, st: &'a SimpleType) {
        if !st.enumeration().is_empty() {
            self.anonymous
                .register_enum(&mut self.registry, parent, local, st);
        }
    }

    fn walk_complex(&mut self, parent: &str, ct: &'a ComplexType, schema: &'a Schema, depth: usize) {
        if depth > MAX_DEPTH {
            return;
        }
        let (model, attributes, groups) = match &ct.content {
            Some(Content::Simple(d)) | Some(Content::Complex(d)) => {
                (d.model.as_ref(), &d.attributes, &d.attribute_groups)
            }
            None => (ct.model.as_ref(), &ct.attributes, &ct.attribute_groups),
        };
        for attribute in self.attributes_of(attributes, groups, 0) {
            if let Some(st) = attribute.simple_type.as_deref() {
                self.walk_simple(parent, attribute.local_name(), st);
            }
        }
        if let Some(model) = model {
            self.walk_model(parent, model, schema, depth + 1);
        }
    }

    fn walk_model(&mut self, parent: &str, model: &'a ModelGroup, schema: &'a Schema, depth: usize) {
        match model {
            ModelGroup::Sequence(c) | ModelGroup::Choice(c) | ModelGroup::All(c) => {
                self.walk_particles(parent, &c.particles, schema, depth);
            }
            ModelGroup::Group(g) => self.walk_group(parent, g, depth),
        }
    }

    fn walk_group(&mut self, parent: &str, group: &'a GroupRef, depth: usize) {
        if depth > MAX_DEPTH {
            return;
        }
        if let Some((schema, group)) = self.schemas.resolve_group(&group.ref_name) {
            if let Some(model) = &group.model {
                self.walk_model(parent, model, schema, depth + 1);
            }
        }
    }

    fn walk_particles(
        &mut self,
        parent: &str,
        particles: &'a [Particle],
        schema: &'a Schema,
        depth: usize,
    ) {
        for particle in particles {
            match particle {
                Particle::Element(e) => {
                    let child = e.local_name();
                    match e.shape() {
                        ElementShape::Complex(inner) => {
                            if self.anonymous.register_struct(
                                &mut self.registry,
                                parent,
                                child,
                                inner,
                                schema,
                            ) {
                                let prefix = inline_name(parent, child);
                                self.walk_complex(&prefix, inner, schema, depth + 1);
                            }
                        }
                        ElementShape::Simple(st) => self.walk_simple(parent, child, st),
                        _ => (),
                    }
                }
                Particle::Sequence(c) | Particle::Choice(c) => {
                    self.walk_particles(parent, &c.particles, schema, depth + 1);
                }
                Particle::Group(g) => self.walk_group(parent, g, depth + 1),
                Particle::Any(_) => (),
            }
        }
    }

    /// Attributes declared directly and through attribute groups.
    fn attributes_of(
        &self,
        attributes: &'a [Attribute],
        groups: &'a [QName],
        depth: usize,
    ) -> Vec<&'a Attribute> {
        let mut result = attributes.iter().collect::<Vec<_>>();
        if depth > MAX_DEPTH {
            return result;
        }
        for name in groups {
            match self.schemas.resolve_attribute_group(name) {
                Some((_, group)) => result.extend(self.attributes_of(
                    &group.attributes,
                    &group.attribute_groups,
                    depth + 1,
                )),
                None => warn!("attribute group {name} not found"),
            }
        }
        result
    }

    // Pass 3: fields.

    fn complex_fields(&self, ct: &'a ComplexType, schema: &'a Schema) -> Vec<FieldDef> {
        let mut fields = Fields::default();
        self.collect_complex(ct, schema, &mut fields, 0);
        fields.finish()
    }

    fn element_fields(&self, element: &'a Element, schema: &'a Schema) -> Vec<FieldDef> {
        let mut fields = Fields::default();
        match element.shape() {
            ElementShape::Complex(ct) => self.collect_complex(ct, schema, &mut fields, 0),
            ElementShape::Type(name) => match self.named_complex_type(name) {
                Some((ct_schema, ct)) => self.collect_complex(ct, ct_schema, &mut fields, 0),
                None => match self.resolve_type(name, 0) {
                    FieldType::RawXml => fields.add_wildcard(Occurs::One),
                    ty => fields.value = Some(PendingField::value(ty, type_label(name))),
                },
            },
            ElementShape::Simple(st) => {
                let label = simple_label(st);
                fields.value = Some(PendingField::value(self.simple_type(st, 0), label));
            }
            ElementShape::Ref(_) | ElementShape::Untyped => fields.add_wildcard(Occurs::One),
        }
        fields.finish()
    }

    fn message_fields(&self, message: &'a Message) -> Vec<FieldDef> {
        let mut fields = Fields::default();
        for part in &message.parts {
            let field = match (&part.element, &part.type_name) {
                (Some(name), _) => match self.schemas.resolve_element(name) {
                    Some((schema, element)) => PendingField {
                        name_hint: element.local_name().to_string(),
                        xml_name: element.local_name().to_string(),
                        namespace: schema.target_namespace.clone(),
                        kind: FieldKind::Element,
                        occurs: Occurs::One,
                        ty: self.element_type(element),
                        doc: doc_of(element.annotation.as_ref()),
                        xsd_type: name.local.clone(),
                    },
                    None => continue,
                },
                (None, Some(name)) => PendingField {
                    name_hint: part.name.clone(),
                    xml_name: part.name.clone(),
                    namespace: None,
                    kind: FieldKind::Element,
                    occurs: Occurs::One,
                    ty: self.resolve_type(name, 0),
                    doc: None,
                    xsd_type: type_label(name),
                },
                (None, None) => continue,
            };
            fields.elements.push(field);
        }
        fields.finish()
    }

    fn collect_complex(&self, ct: &'a ComplexType, schema: &'a Schema, fields: &mut Fields, depth: usize) {
        if depth > MAX_DEPTH {
            warn!("derivation of {} nested too deep", ct.name.as_deref().unwrap_or("(anonymous)"));
            return;
        }
        match &ct.content {
            Some(Content::Simple(d)) => {
                match self.named_complex_type(&d.base) {
                    Some((base_schema, base)) => {
                        self.collect_complex(base, base_schema, fields, depth + 1);
                    }
                    None => {
                        let ty = match self.resolve_type(&d.base, 0) {
                            FieldType::RawXml | FieldType::Struct(_) => {
                                FieldType::Builtin(BuiltinType::String)
                            }
                            ty => ty,
                        };
                        fields.value = Some(PendingField::value(ty, type_label(&d.base)));
                    }
                }
                self.collect_attributes(&d.attributes, &d.attribute_groups, fields);
            }
            Some(Content::Complex(d)) => {
                if d.kind == DerivationKind::Extension {
                    match self.named_complex_type(&d.base) {
                        Some((base_schema, base)) => {
                            self.collect_complex(base, base_schema, fields, depth + 1);
                        }
                        None if BuiltinType::from_qname(&d.base) == Some(BuiltinType::AnyType) => (),
                        None => warn!("base type {} not found", d.base),
                    }
                }
                if let Some(model) = &d.model {
                    self.collect_model(model, schema, Modifiers::default(), fields, depth);
                }
                self.collect_attributes(&d.attributes, &d.attribute_groups, fields);
            }
            None => {
                match &ct.model {
                    Some(model) => {
                        self.collect_model(model, schema, Modifiers::default(), fields, depth);
                    }
                    None if *ct.mixed.inner() => {
                        fields.value = Some(PendingField::value(
                            FieldType::Builtin(BuiltinType::String),
                            "xs:string".into(),
                        ));
                    }
                    None => (),
                }
                self.collect_attributes(&ct.attributes, &ct.attribute_groups, fields);
            }
        }
    }

    fn collect_model(
        &self,
        model: &'a ModelGroup,
        schema: &'a Schema,
        mods: Modifiers,
        fields: &mut Fields,
        depth: usize,
    ) {
        match model {
            ModelGroup::Sequence(c) | ModelGroup::All(c) => {
                self.collect_particles(&c.particles, schema, mods.with(c.occurs, false), fields, depth);
            }
            ModelGroup::Choice(c) => {
                self.collect_particles(&c.particles, schema, mods.with(c.occurs, true), fields, depth);
            }
            ModelGroup::Group(g) => self.collect_group(g, mods, fields, depth),
        }
    }

    fn collect_particles(
        &self,
        particles: &'a [Particle],
        schema: &'a Schema,
        mods: Modifiers,
        fields: &mut Fields,
        depth: usize,
    ) {
        for particle in particles {
            match particle {
                Particle::Element(e) => fields.elements.push(self.element_field(e, schema, mods)),
                Particle::Sequence(c) => {
                    let mods = mods.with(c.occurs, false);
                    self.collect_particles(&c.particles, schema, mods, fields, depth + 1);
                }
                Particle::Choice(c) => {
                    let mods = mods.with(c.occurs, true);
                    self.collect_particles(&c.particles, schema, mods, fields, depth + 1);
                }
                Particle::Group(g) => self.collect_group(g, mods, fields, depth + 1),
                Particle::Any(any) => fields.add_wildcard(mods.with(any.occurs, false).occurs()),
            }
        }
    }

    fn collect_group(&self, group: &'a GroupRef, mods: Modifiers, fields: &mut Fields, depth: usize) {
        if depth > MAX_DEPTH {
            warn!("group {} nested too deep", group.ref_name);
            return;
        }
        match self.schemas.resolve_group(&group.ref_name) {
            Some((schema, resolved)) => {
                if let Some(model) = &resolved.model {
                    let mods = mods.with(group.occurs, false);
                    self.collect_model(model, schema, mods, fields, depth + 1);
                }
            }
            None => warn!("group {} not found", group.ref_name),
        }
    }

    fn collect_attributes(&self, attributes: &'a [Attribute], groups: &'a [QName], fields: &mut Fields) {
        for attribute in self.attributes_of(attributes, groups, 0) {
            if let Some(field) = self.attribute_field(attribute) {
                fields.attributes.push(field);
            }
        }
    }

    fn element_field(&self, e: &'a Element, schema: &'a Schema, mods: Modifiers) -> PendingField {
        let occurs = mods.with(e.occurs, false).occurs();
        if let Some(name) = &e.ref_name {
            return match self.schemas.resolve_element(name) {
                Some((target_schema, target)) => PendingField {
                    name_hint: target.local_name().to_string(),
                    xml_name: target.local_name().to_string(),
                    namespace: target_schema.target_namespace.clone(),
                    kind: FieldKind::Element,
                    occurs,
                    ty: self.element_type(target),
                    doc: doc_of(e.annotation.as_ref()).or_else(|| doc_of(target.annotation.as_ref())),
                    xsd_type: name.local.clone(),
                },
                None => {
                    warn!("element {name} not found, capturing raw XML");
                    PendingField {
                        name_hint: name.local.clone(),
                        xml_name: name.local.clone(),
                        namespace: name.namespace.clone(),
                        kind: FieldKind::Element,
                        occurs,
                        ty: FieldType::RawXml,
                        doc: None,
                        xsd_type: name.local.clone(),
                    }
                }
            };
        }
        let namespace = if e.form.unwrap_or(schema.element_form_default) == Form::Qualified {
            schema.target_namespace.clone()
        } else {
            None
        };
        let (ty, xsd_type) = match e.shape() {
            ElementShape::Type(name) => (self.resolve_type(name, 0), type_label(name)),
            ElementShape::Complex(ct) => match self.anonymous.lookup(ct) {
                Some(AnonymousType::Struct(name)) => (FieldType::Struct(name.to_string()), name.to_string()),
                _ => (FieldType::RawXml, "xs:anyType".into()),
            },
            ElementShape::Simple(st) => (self.simple_type(st, 0), simple_label(st)),
            ElementShape::Ref(_) | ElementShape::Untyped => (FieldType::RawXml, "xs:anyType".into()),
        };
        PendingField {
            name_hint: e.local_name().to_string(),
            xml_name: e.local_name().to_string(),
            namespace,
            kind: FieldKind::Element,
            occurs,
            ty,
            doc: doc_of(e.annotation.as_ref()),
            xsd_type,
        }
    }

    fn attribute_field(&self, attribute: &'a Attribute) -> Option<PendingField> {
        if attribute.use_ == AttributeUse::Prohibited {
            return None;
        }
        let declaration = match &attribute.ref_name {
            Some(name) => match self.schemas.resolve_attribute(name) {
                Some((_, declaration)) => declaration,
                None => {
                    debug!("attribute {name} not declared, using xs:string");
                    attribute
                }
            },
            None => attribute,
        };
        let (ty, xsd_type) = if let Some(name) = &declaration.type_name {
            (self.resolve_type(name, 0), type_label(name))
        } else if let Some(st) = declaration.simple_type.as_deref() {
            (self.simple_type(st, 0), simple_label(st))
        } else {
            (FieldType::Builtin(BuiltinType::AnySimpleType), "xs:anySimpleType".into())
        };
        let ty = match ty {
            FieldType::RawXml | FieldType::Struct(_) => FieldType::Builtin(BuiltinType::String),
            ty => ty,
        };
        let occurs = if attribute.use_ == AttributeUse::Required {
            Occurs::One
        } else {
            Occurs::Optional
        };
        Some(PendingField {
            name_hint: attribute.local_name().to_string(),
            xml_name: attribute.local_name().to_string(),
            namespace: None,
            kind: FieldKind::Attribute,
            occurs,
            ty,
            doc: doc_of(attribute.annotation.as_ref())
                .or_else(|| doc_of(declaration.annotation.as_ref())),
            xsd_type,
        })
    }

    /// Type of a field holding a top-level element.
    fn element_type(&self, element: &Element) -> FieldType {
        self.element_names
            .get(&(element as *const Element))
            .map_or(FieldType::RawXml, |name| FieldType::Struct(name.clone()))
    }

    fn named_complex_type(&self, name: &QName) -> Option<(&'a Schema, &'a ComplexType)> {
        if BuiltinType::from_qname(name).is_some() {
            None
        } else {
            self.schemas.resolve_complex_type(name)
        }
    }

    fn resolve_type(&self, name: &QName, depth: usize) -> FieldType {
        if let Some(builtin) = BuiltinType::from_qname(name) {
            return match builtin {
                BuiltinType::AnyType => FieldType::RawXml,
                builtin => FieldType::Builtin(builtin),
            };
        }
        if let Some((_, st)) = self.schemas.resolve_simple_type(name) {
            return self.simple_type(st, depth + 1);
        }
        if let Some((_, ct)) = self.schemas.resolve_complex_type(name) {
            if let Some(generated) = self.complex_names.get(&(ct as *const ComplexType)) {
                return FieldType::Struct(generated.clone());
            }
        }
        warn!("type {name} not found, capturing raw XML");
        FieldType::RawXml
    }

    fn simple_type(&self, st: &SimpleType, depth: usize) -> FieldType {
        if depth > MAX_DEPTH {
            return FieldType::Builtin(BuiltinType::String);
        }
        if !st.enumeration().is_empty() {
            let name = self
                .enum_names
                .get(&(st as *const SimpleType))
                .map(String::as_str)
                .or_else(|| self.anonymous.enum_name(st));
            if let Some(name) = name {
                return FieldType::Enum(name.to_string());
            }
        }
        match &st.variety {
            Some(SimpleVariety::Restriction(r)) => match (&r.base, r.simple_type.as_deref()) {
                (Some(base), _) => match self.resolve_type(base, depth) {
                    FieldType::RawXml | FieldType::Struct(_) => FieldType::Builtin(BuiltinType::String),
                    ty => ty,
                },
                (None, Some(inner)) => self.simple_type(inner, depth + 1),
                (None, None) => FieldType::Builtin(BuiltinType::String),
            },
            Some(SimpleVariety::List(_)) => FieldType::StringList,
            Some(SimpleVariety::Union(_)) | None => FieldType::Builtin(BuiltinType::String),
        }
    }

    // Client.

    fn client(&self) -> Option<ClientDef> {
        let defs = self.defs;
        let binding = primary_binding(defs)?;
        let port_type = defs.port_type(&binding.port_type)?;
        if binding.operations.is_empty() {
            return None;
        }
        let operations = port_type
            .operations
            .iter()
            .filter_map(|op| self.operation(binding, op))
            .collect::<Vec<_>>();
        if operations.is_empty() {
            return None;
        }
        Some(ClientDef {
            port_type: port_type.name.clone(),
            default_endpoint: default_endpoint(defs),
            soap_version: binding.soap.as_ref().map_or(SoapVersion::V11, |s| s.version),
            operations,
        })
    }

    fn operation(&self, binding: &Binding, op: &'a Operation) -> Option<OperationDef> {
        let Some(input) = &op.input else {
            debug!("operation {} has no input, skipped", op.name);
            return None;
        };
        let input = self.message_struct(op, input, false)?;
        let output = match &op.output {
            Some(output) => Some(self.message_struct(op, output, true)?),
            None => None,
        };
        let soap_action = binding
            .operations
            .iter()
            .find(|b| b.name == op.name)
            .and_then(|b| b.soap_action.clone())
            .unwrap_or_default();
        Some(OperationDef {
            name: op.name.clone(),
            soap_action,
            input,
            output,
            doc: op.documentation.clone(),
        })
    }

    fn message_struct(&self, op: &'a Operation, message: &OperationMessage, is_output: bool) -> Option<String> {
        let resolved = self.defs.message(&message.message)?;
        match single_element_part(resolved) {
            Some(name) => {
                let (_, element) = self.schemas.resolve_element(name)?;
                self.element_names.get(&(element as *const Element)).cloned()
            }
            None => self.synthesized.get(&(op.name.as_str(), is_output)).cloned(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Modifiers {
    optional: bool,
    many: bool,
}

impl Modifiers {
    fn with(self, occurs: Occurrence, choice: bool) -> Self {
        Self {
            optional: self.optional || choice || occurs.is_optional(),
            many: self.many || occurs.is_many(),
        }
    }

    const fn occurs(self) -> Occurs {
        if self.many {
            Occurs::Many
        } else if self.optional {
            Occurs::Optional
        } else {
            Occurs::One
        }
    }
}

struct PendingField {
    name_hint: String,
    xml_name: String,
    namespace: Option<String>,
    kind: FieldKind,
    occurs: Occurs,
    ty: FieldType,
    doc: Option<String>,
    xsd_type: String,
}

impl PendingField {
    fn value(ty: FieldType, xsd_type: String) -> Self {
        Self {
            name_hint: "Value".into(),
            xml_name: String::new(),
            namespace: None,
            kind: FieldKind::CharData,
            occurs: Occurs::One,
            ty,
            doc: None,
            xsd_type,
        }
    }

    fn wildcard(occurs: Occurs) -> Self {
        Self {
            name_hint: "Any".into(),
            xml_name: String::new(),
            namespace: None,
            kind: FieldKind::InnerXml,
            occurs,
            ty: FieldType::RawXml,
            doc: None,
            xsd_type: "xs:any".into(),
        }
    }

    fn into_def(self, registry: &mut FieldRegistry) -> FieldDef {
        FieldDef {
            name: registry.unique_field_name(&self.name_hint, self.kind == FieldKind::Attribute),
            xml_name: self.xml_name,
            namespace: self.namespace,
            kind: self.kind,
            occurs: self.occurs,
            ty: self.ty,
            boxed: false,
            doc: self.doc,
            xsd_type: self.xsd_type,
        }
    }
}

/// Fields of one struct in emission order: character data, elements
/// and the wildcard capture in document order, attributes.
#[derive(Default)]
struct Fields {
    value: Option<PendingField>,
    elements: Vec<PendingField>,
    /// Index of the wildcard capture in `elements`.
    wildcard: Option<usize>,
    attributes: Vec<PendingField>,
}

impl Fields {
    /// All wildcards of a struct share one raw capture, placed where
    /// the first of them appears.
    fn add_wildcard(&mut self, occurs: Occurs) {
        match self.wildcard {
            Some(index) => self.elements[index].occurs = Occurs::Many,
            None => {
                self.wildcard = Some(self.elements.len());
                self.elements.push(PendingField::wildcard(occurs));
            }
        }
    }

    fn finish(self) -> Vec<FieldDef> {
        let mut registry = FieldRegistry::new();
        self.value
            .into_iter()
            .chain(self.elements)
            .chain(self.attributes)
            .map(|field| field.into_def(&mut registry))
            .collect()
    }
}

fn single_element_part(message: &Message) -> Option<&QName> {
    match &message.parts[..] {
        [part] => part.element.as_ref(),
        _ => None,
    }
}

fn count_elements(model: &ModelGroup) -> usize {
    fn count(particles: &[Particle]) -> usize {
        particles
            .iter()
            .map(|p| match p {
                Particle::Element(_) => 1,
                Particle::Sequence(c) | Particle::Choice(c) => count(&c.particles),
                Particle::Group(_) | Particle::Any(_) => 0,
            })
            .sum()
    }
    match model {
        ModelGroup::Sequence(c) | ModelGroup::Choice(c) | ModelGroup::All(c) => count(&c.particles),
        ModelGroup::Group(_) => 0,
    }
}

fn doc_of(annotation: Option<&Annotation>) -> Option<String> {
    annotation.and_then(Annotation::text)
}

fn type_label(name: &QName) -> String {
    if BuiltinType::from_qname(name).is_some() {
        format!("xs:{}", name.local)
    } else {
        name.local.clone()
    }
}

fn simple_label(st: &SimpleType) -> String {
    match &st.variety {
        Some(SimpleVariety::Restriction(r)) => r.base.as_ref().map_or_else(|| "xs:string".into(), type_label),
        Some(SimpleVariety::List(_)) => "list".into(),
        Some(SimpleVariety::Union(_)) | None => "union".into(),
    }
}

/// Address of the first SOAP 1.1 port, else of the first SOAP 1.2
/// port.
fn default_endpoint(defs: &Definitions) -> String {
    let ports = || defs.services.iter().flat_map(|s| s.ports.iter());
    ports()
        .find_map(|p| match &p.address {
            Some(Address::Soap11(location)) => Some(location),
            _ => None,
        })
        .or_else(|| {
            ports().find_map(|p| match &p.address {
                Some(Address::Soap12(location)) => Some(location),
                _ => None,
            })
        })
        .cloned()
        .unwrap_or_default()
}

fn services(defs: &Definitions) -> Vec<ServiceDef> {
    defs.services
        .iter()
        .map(|service| ServiceDef {
            name: service.name.clone(),
            doc: service.documentation.clone(),
            ports: service
                .ports
                .iter()
                .map(|port| PortDef {
                    name: port.name.clone(),
                    binding: port.binding.local.clone(),
                    protocol: match &port.address {
                        Some(Address::Soap11(_)) => "SOAP 1.1",
                        Some(Address::Soap12(_)) => "SOAP 1.2",
                        Some(Address::Http(_)) => "HTTP",
                        None => "none",
                    },
                    address: port.address.as_ref().map(|a| a.location().to_string()),
                })
                .collect(),
        })
        .collect()
}

/// Box every single or optional struct field whose type reaches back
/// to the containing struct.
fn apply_boxing(structs: &mut [StructDef]) {
    let edges = structs
        .iter()
        .map(|s| {
            let targets = s
                .fields
                .iter()
                .filter(|f| f.occurs != Occurs::Many)
                .filter_map(|f| match &f.ty {
                    FieldType::Struct(target) => Some(target.clone()),
                    _ => None,
                })
                .collect::<Vec<_>>();
            (s.name.clone(), targets)
        })
        .collect::<HashMap<_, _>>();
    for s in structs.iter_mut() {
        let name = s.name.clone();
        for field in &mut s.fields {
            if field.occurs == Occurs::Many {
                continue;
            }
            if let FieldType::Struct(target) = &field.ty {
                if reaches(&edges, target, &name) {
                    debug!("field {} of {name} is recursive, boxed", field.name);
                    field.boxed = true;
                }
            }
        }
    }
}

fn reaches(edges: &HashMap<String, Vec<String>>, from: &str, to: &str) -> bool {
    let mut visited = HashSet::new();
    let mut stack = vec![from];
    while let Some(current) = stack.pop() {
        if current == to {
            return true;
        }
        if visited.insert(current) {
            if let Some(targets) = edges.get(current) {
                stack.extend(targets.iter().map(String::as_str));
            }
        }
    }
    false
}

#[cfg(test)]
mod test {
    use crate::compiler::compile;
    use crate::compiler::compiled::Compiled;
    use crate::compiler::compiled::FieldType;
    use crate::compiler::Config;
    use crate::compiler::WrapperPolicy;
    use crate::wsdl::Definitions;
    use soapgen_core::FieldKind;
    use soapgen_core::Occurs;

    fn compile_schema(body: &str) -> Compiled {
        let wsdl = format!(
            r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
                 xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:t">
               <types><xs:schema targetNamespace="urn:t">{body}</xs:schema></types>
             </definitions>"#
        );
        let defs = Definitions::parse(wsdl.as_bytes()).unwrap();
        compile(&defs, &Config::default().wrapper(WrapperPolicy::Never)).unwrap()
    }

    #[test]
    fn wildcard_keeps_its_position_in_sequence() {
        let compiled = compile_schema(
            r#"<xs:element name="Memo"><xs:complexType>
                 <xs:sequence>
                   <xs:element name="first" type="xs:string"/>
                   <xs:any minOccurs="0" processContents="lax"/>
                   <xs:element name="last" type="xs:string"/>
                   <xs:any processContents="lax"/>
                 </xs:sequence>
                 <xs:attribute name="id" type="xs:int"/>
               </xs:complexType></xs:element>"#,
        );
        let memo = compiled.find_struct("Memo").unwrap();
        let summary = memo
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.kind, f.occurs))
            .collect::<Vec<_>>();
        assert_eq!(
            summary,
            [
                ("First", FieldKind::Element, Occurs::One),
                ("Any", FieldKind::InnerXml, Occurs::Many),
                ("Last", FieldKind::Element, Occurs::One),
                ("Id", FieldKind::Attribute, Occurs::Optional),
            ]
        );
        assert_eq!(memo.fields[1].ty, FieldType::RawXml);
    }

    #[test]
    fn nested_inline_types_carry_the_whole_chain() {
        let nested = |outer: &str| {
            format!(
                r#"<xs:element name="{outer}"><xs:complexType><xs:sequence>
                     <xs:element name="inner"><xs:complexType><xs:sequence>
                       <xs:element name="deep"><xs:complexType><xs:sequence>
                         <xs:element name="v" type="xs:int"/>
                       </xs:sequence></xs:complexType></xs:element>
                     </xs:sequence></xs:complexType></xs:element>
                   </xs:sequence></xs:complexType></xs:element>"#
            )
        };
        let compiled = compile_schema(&format!("{}{}", nested("Outer"), nested("other")));
        for name in ["Outer_Inner", "Outer_Inner_Deep", "Other_Inner", "Other_Inner_Deep"] {
            assert!(compiled.find_struct(name).is_some(), "{name} missing");
        }
        assert!(compiled.find_struct("Inner_Deep").is_none());
        assert!(compiled.find_struct("Inner_Deep2").is_none());
        let inner = compiled.find_struct("Other_Inner").unwrap();
        assert_eq!(inner.fields[0].ty, FieldType::Struct("Other_Inner_Deep".into()));
    }
}
