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

//! Recursive descent over the XML tree of a schema document.
//!
//! Defaults are applied here: `minOccurs` and `maxOccurs` are 1,
//! `use` is optional, `processContents` is strict, both form defaults
//! are unqualified. Unknown elements in the XML Schema namespace are
//! skipped.

use crate::parse::boolean;
use crate::parse::parse_document;
use crate::parse::required;
use crate::parse::unsigned;
use crate::parse::ParseError;
use crate::parse::ParseErrorKind;
use crate::qname::QName;
use crate::xsd::Annotation;
use crate::xsd::Any;
use crate::xsd::AnyAttribute;
use crate::xsd::Attribute;
use crate::xsd::AttributeGroup;
use crate::xsd::AttributeUse;
use crate::xsd::ComplexType;
use crate::xsd::Compositor;
use crate::xsd::Content;
use crate::xsd::Derivation;
use crate::xsd::DerivationKind;
use crate::xsd::Element;
use crate::xsd::Facets;
use crate::xsd::Form;
use crate::xsd::Group;
use crate::xsd::GroupRef;
use crate::xsd::Import;
use crate::xsd::Include;
use crate::xsd::IsAbstract;
use crate::xsd::IsMixed;
use crate::xsd::IsNillable;
use crate::xsd::List;
use crate::xsd::MaxOccurs;
use crate::xsd::ModelGroup;
use crate::xsd::NamespaceConstraint;
use crate::xsd::Occurrence;
use crate::xsd::Particle;
use crate::xsd::ProcessContents;
use crate::xsd::Restriction;
use crate::xsd::Schema;
use crate::xsd::SimpleType;
use crate::xsd::SimpleVariety;
use crate::xsd::Union;
use soapgen_core::xml::Element as XmlElement;
use soapgen_core::XSD_NS;
use tracing::debug;

type Result<T> = std::result::Result<T, ParseError>;

impl Schema {
    /// Parse schema document.
    ///
    /// # Errors
    ///
    /// Returns error if input is not well-formed XML, if the root is
    /// not `xs:schema`, or if a declaration is malformed.
    pub fn parse(input: &[u8]) -> Result<Self> {
        Self::from_element(&parse_document(input)?)
    }

    /// Read schema from its `xs:schema` element. Used for schemas
    /// embedded in other documents.
    ///
    /// # Errors
    ///
    /// See [`Schema::parse`].
    pub fn from_element(root: &XmlElement) -> Result<Self> {
        if !root.is(XSD_NS, "schema") {
            return Err(ParseError::at(
                ParseErrorKind::SchemaRootMissing,
                root,
                "expected xs:schema root",
            ));
        }
        let mut schema = Self {
            target_namespace: root.attribute("targetNamespace").map(ToString::to_string),
            element_form_default: form(root, "elementFormDefault")?.unwrap_or_default(),
            attribute_form_default: form(root, "attributeFormDefault")?.unwrap_or_default(),
            ..Self::default()
        };
        for child in xsd_children(root) {
            match child.local_name() {
                "import" => schema.imports.push(Import {
                    namespace: child.attribute("namespace").map(ToString::to_string),
                    schema_location: child.attribute("schemaLocation").map(ToString::to_string),
                }),
                "include" => schema.includes.push(Include {
                    schema_location: required(child, "schemaLocation")?.to_string(),
                }),
                "element" => schema.elements.push(parse_element(child, true)?),
                "complexType" => schema.complex_types.push(parse_complex_type(child)?),
                "simpleType" => schema.simple_types.push(parse_simple_type(child)?),
                "attribute" => schema.attributes.push(parse_attribute(child)?),
                "attributeGroup" => schema.attribute_groups.push(parse_attribute_group(child)?),
                "group" => schema.groups.push(Group {
                    name: required(child, "name")?.to_string(),
                    model: parse_model(child)?,
                    annotation: parse_annotation(child),
                }),
                "annotation" => schema.annotations.push(annotation_of(child)),
                other => debug!("skipping xs:{other} at byte {}", child.position),
            }
        }
        Ok(schema)
    }
}

fn xsd_children(e: &XmlElement) -> impl Iterator<Item = &XmlElement> {
    e.elements().filter(|c| c.namespace() == Some(XSD_NS))
}

fn xsd_child<'a>(e: &'a XmlElement, local: &str) -> Option<&'a XmlElement> {
    xsd_children(e).find(|c| c.local_name() == local)
}

fn qname_attr(e: &XmlElement, name: &str) -> Option<QName> {
    e.attribute(name).map(|v| QName::resolve(e, v))
}

fn form(e: &XmlElement, name: &str) -> Result<Option<Form>> {
    e.attribute(name)
        .map(|v| match v.trim() {
            "qualified" => Ok(Form::Qualified),
            "unqualified" => Ok(Form::Unqualified),
            other => Err(ParseError::malformed(e, format!("invalid `{name}`: {other}"))),
        })
        .transpose()
}

fn occurrence(e: &XmlElement) -> Result<Occurrence> {
    let min = unsigned(e, "minOccurs")?.unwrap_or(1);
    let max = match e.attribute("maxOccurs").map(str::trim) {
        None => MaxOccurs::default(),
        Some("unbounded") => MaxOccurs::Unbounded,
        Some(_) => MaxOccurs::Bounded(unsigned(e, "maxOccurs")?.unwrap_or(1)),
    };
    Ok(Occurrence { min, max })
}

fn annotation_of(e: &XmlElement) -> Annotation {
    Annotation {
        documentation: xsd_children(e)
            .filter(|c| c.local_name() == "documentation")
            .map(XmlElement::text)
            .collect(),
    }
}

fn parse_annotation(e: &XmlElement) -> Option<Annotation> {
    xsd_child(e, "annotation").map(annotation_of)
}

fn parse_element(e: &XmlElement, top_level: bool) -> Result<Element> {
    let ref_name = qname_attr(e, "ref");
    let name = e.attribute("name").map(ToString::to_string);
    if top_level && name.is_none() {
        return Err(ParseError::malformed(e, "top-level element without name"));
    }
    if name.is_none() && ref_name.is_none() {
        return Err(ParseError::malformed(e, "element needs `name` or `ref`"));
    }
    let complex_type = xsd_child(e, "complexType")
        .map(parse_complex_type)
        .transpose()?
        .map(Box::new);
    let simple_type = xsd_child(e, "simpleType")
        .map(parse_simple_type)
        .transpose()?
        .map(Box::new);
    let type_name = qname_attr(e, "type");
    let shapes = [
        type_name.is_some(),
        ref_name.is_some(),
        complex_type.is_some(),
        simple_type.is_some(),
    ];
    if shapes.iter().filter(|s| **s).count() > 1 {
        return Err(ParseError::at(
            ParseErrorKind::AttrConflict,
            e,
            "only one of `type`, `ref`, inline complexType or inline simpleType is allowed",
        ));
    }
    if name.is_some() && ref_name.is_some() {
        return Err(ParseError::at(
            ParseErrorKind::AttrConflict,
            e,
            "`name` and `ref` are mutually exclusive",
        ));
    }
    Ok(Element {
        name,
        type_name,
        ref_name,
        occurs: if top_level {
            Occurrence::default()
        } else {
            occurrence(e)?
        },
        nillable: IsNillable::new(boolean(e, "nillable")?.unwrap_or(false)),
        default: e.attribute("default").map(ToString::to_string),
        fixed: e.attribute("fixed").map(ToString::to_string),
        form: form(e, "form")?,
        complex_type,
        simple_type,
        annotation: parse_annotation(e),
        position: e.position,
    })
}

fn parse_complex_type(e: &XmlElement) -> Result<ComplexType> {
    let content = if let Some(c) = xsd_child(e, "simpleContent") {
        Some(Content::Simple(parse_derivation(c)?))
    } else if let Some(c) = xsd_child(e, "complexContent") {
        Some(Content::Complex(parse_derivation(c)?))
    } else {
        None
    };
    let model = parse_model(e)?;
    if content.is_some() && model.is_some() {
        return Err(ParseError::at(
            ParseErrorKind::AttrConflict,
            e,
            "content model next to simpleContent or complexContent",
        ));
    }
    let (attributes, attribute_groups, any_attribute) = parse_attribute_uses(e)?;
    Ok(ComplexType {
        name: e.attribute("name").map(ToString::to_string),
        mixed: IsMixed::new(boolean(e, "mixed")?.unwrap_or(false)),
        is_abstract: IsAbstract::new(boolean(e, "abstract")?.unwrap_or(false)),
        final_derivation: e.attribute("final").map(ToString::to_string),
        model,
        attributes,
        attribute_groups,
        any_attribute,
        content,
        annotation: parse_annotation(e),
    })
}

/// Sequence, choice, all or group reference of the element.
fn parse_model(e: &XmlElement) -> Result<Option<ModelGroup>> {
    let mut found = None;
    for child in xsd_children(e) {
        let model = match child.local_name() {
            "sequence" => ModelGroup::Sequence(parse_compositor(child)?),
            "choice" => ModelGroup::Choice(parse_compositor(child)?),
            "all" => ModelGroup::All(parse_compositor(child)?),
            "group" => ModelGroup::Group(parse_group_ref(child)?),
            _ => continue,
        };
        if found.is_some() {
            return Err(ParseError::at(
                ParseErrorKind::AttrConflict,
                child,
                "more than one content model",
            ));
        }
        found = Some(model);
    }
    Ok(found)
}

fn parse_compositor(e: &XmlElement) -> Result<Compositor> {
    let mut particles = Vec::new();
    for child in xsd_children(e) {
        particles.push(match child.local_name() {
            "element" => Particle::Element(parse_element(child, false)?),
            "sequence" => Particle::Sequence(parse_compositor(child)?),
            "choice" => Particle::Choice(parse_compositor(child)?),
            "group" => Particle::Group(parse_group_ref(child)?),
            "any" => Particle::Any(Any {
                namespace: child
                    .attribute("namespace")
                    .map(NamespaceConstraint::parse)
                    .unwrap_or_default(),
                process_contents: process_contents(child)?,
                occurs: occurrence(child)?,
            }),
            "annotation" => continue,
            other => {
                debug!("skipping xs:{other} in compositor at byte {}", child.position);
                continue;
            }
        });
    }
    Ok(Compositor {
        occurs: occurrence(e)?,
        particles,
    })
}

fn parse_group_ref(e: &XmlElement) -> Result<GroupRef> {
    Ok(GroupRef {
        ref_name: QName::resolve(e, required(e, "ref")?),
        occurs: occurrence(e)?,
    })
}

fn process_contents(e: &XmlElement) -> Result<ProcessContents> {
    match e.attribute("processContents").map(str::trim) {
        None | Some("strict") => Ok(ProcessContents::Strict),
        Some("lax") => Ok(ProcessContents::Lax),
        Some("skip") => Ok(ProcessContents::Skip),
        Some(other) => Err(ParseError::malformed(
            e,
            format!("invalid processContents: {other}"),
        )),
    }
}

type AttributeUses = (Vec<Attribute>, Vec<QName>, Option<AnyAttribute>);

fn parse_attribute_uses(e: &XmlElement) -> Result<AttributeUses> {
    let mut attributes = Vec::new();
    let mut groups = Vec::new();
    let mut any = None;
    for child in xsd_children(e) {
        match child.local_name() {
            "attribute" => attributes.push(parse_attribute(child)?),
            "attributeGroup" => groups.push(QName::resolve(child, required(child, "ref")?)),
            "anyAttribute" => {
                any = Some(AnyAttribute {
                    namespace: child
                        .attribute("namespace")
                        .map(NamespaceConstraint::parse)
                        .unwrap_or_default(),
                    process_contents: process_contents(child)?,
                });
            }
            _ => (),
        }
    }
    Ok((attributes, groups, any))
}

fn parse_attribute(e: &XmlElement) -> Result<Attribute> {
    let name = e.attribute("name").map(ToString::to_string);
    let ref_name = qname_attr(e, "ref");
    if name.is_none() == ref_name.is_none() {
        return Err(ParseError::at(
            ParseErrorKind::AttrConflict,
            e,
            "attribute needs exactly one of `name` or `ref`",
        ));
    }
    let type_name = qname_attr(e, "type");
    let simple_type = xsd_child(e, "simpleType")
        .map(parse_simple_type)
        .transpose()?
        .map(Box::new);
    if type_name.is_some() && simple_type.is_some() {
        return Err(ParseError::at(
            ParseErrorKind::AttrConflict,
            e,
            "`type` next to inline simpleType",
        ));
    }
    let use_ = match e.attribute("use").map(str::trim) {
        None | Some("optional") => AttributeUse::Optional,
        Some("required") => AttributeUse::Required,
        Some("prohibited") => AttributeUse::Prohibited,
        Some(other) => {
            return Err(ParseError::malformed(e, format!("invalid `use`: {other}")));
        }
    };
    Ok(Attribute {
        name,
        type_name,
        ref_name,
        use_,
        default: e.attribute("default").map(ToString::to_string),
        fixed: e.attribute("fixed").map(ToString::to_string),
        form: form(e, "form")?,
        simple_type,
        annotation: parse_annotation(e),
    })
}

fn parse_attribute_group(e: &XmlElement) -> Result<AttributeGroup> {
    let (attributes, attribute_groups, any_attribute) = parse_attribute_uses(e)?;
    Ok(AttributeGroup {
        name: required(e, "name")?.to_string(),
        attributes,
        attribute_groups,
        any_attribute,
    })
}

fn parse_derivation(content: &XmlElement) -> Result<Derivation> {
    let (e, kind) = if let Some(e) = xsd_child(content, "extension") {
        (e, DerivationKind::Extension)
    } else if let Some(e) = xsd_child(content, "restriction") {
        (e, DerivationKind::Restriction)
    } else {
        return Err(ParseError::malformed(
            content,
            "expected extension or restriction",
        ));
    };
    let (attributes, attribute_groups, any_attribute) = parse_attribute_uses(e)?;
    Ok(Derivation {
        kind,
        base: QName::resolve(e, required(e, "base")?),
        model: parse_model(e)?,
        attributes,
        attribute_groups,
        any_attribute,
        facets: parse_facets(e)?,
    })
}

fn parse_simple_type(e: &XmlElement) -> Result<SimpleType> {
    let variety = if let Some(r) = xsd_child(e, "restriction") {
        Some(SimpleVariety::Restriction(Restriction {
            base: qname_attr(r, "base"),
            simple_type: xsd_child(r, "simpleType")
                .map(parse_simple_type)
                .transpose()?
                .map(Box::new),
            facets: parse_facets(r)?,
        }))
    } else if let Some(l) = xsd_child(e, "list") {
        Some(SimpleVariety::List(List {
            item_type: qname_attr(l, "itemType"),
            simple_type: xsd_child(l, "simpleType")
                .map(parse_simple_type)
                .transpose()?
                .map(Box::new),
        }))
    } else if let Some(u) = xsd_child(e, "union") {
        Some(SimpleVariety::Union(Union {
            member_types: u
                .attribute("memberTypes")
                .map(|v| {
                    v.split_whitespace()
                        .map(|m| QName::resolve(u, m))
                        .collect()
                })
                .unwrap_or_default(),
            simple_types: xsd_children(u)
                .filter(|c| c.local_name() == "simpleType")
                .map(parse_simple_type)
                .collect::<Result<_>>()?,
        }))
    } else {
        None
    };
    Ok(SimpleType {
        name: e.attribute("name").map(ToString::to_string),
        variety,
        annotation: parse_annotation(e),
    })
}

fn parse_facets(e: &XmlElement) -> Result<Facets> {
    let mut facets = Facets::default();
    for child in xsd_children(e) {
        let value = || required(child, "value");
        let number = || {
            unsigned(child, "value")?
                .ok_or_else(|| ParseError::malformed(child, "missing attribute `value`"))
        };
        match child.local_name() {
            "enumeration" => facets.enumeration.push(value()?.to_string()),
            "pattern" => facets.pattern.push(value()?.to_string()),
            "minInclusive" => facets.min_inclusive = Some(value()?.to_string()),
            "maxInclusive" => facets.max_inclusive = Some(value()?.to_string()),
            "minExclusive" => facets.min_exclusive = Some(value()?.to_string()),
            "maxExclusive" => facets.max_exclusive = Some(value()?.to_string()),
            "length" => facets.length = Some(number()?),
            "minLength" => facets.min_length = Some(number()?),
            "maxLength" => facets.max_length = Some(number()?),
            "whiteSpace" => facets.white_space = Some(value()?.to_string()),
            "totalDigits" => facets.total_digits = Some(number()?),
            "fractionDigits" => facets.fraction_digits = Some(number()?),
            _ => (),
        }
    }
    Ok(facets)
}
