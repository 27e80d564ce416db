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

//! Built-in datatypes of XML Schema 1.0.

use crate::qname::QName;
use soapgen_core::XSD_NS;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

macro_rules! builtin_types {
    ($($variant:ident => $name:literal,)*) => {
        /// Closed set of XSD 1.0 built-in datatypes. Names outside of
        /// the set are kept as `Custom`.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum BuiltinType {
            $($variant,)*
            Custom(String),
        }

        impl BuiltinType {
            /// Match local name against the closed set.
            #[must_use]
            pub fn from_local(local: &str) -> Self {
                match local {
                    $($name => Self::$variant,)*
                    other => Self::Custom(other.to_string()),
                }
            }

            /// XSD name of the type.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $name,)*
                    Self::Custom(name) => name,
                }
            }
        }
    };
}

builtin_types! {
    AnyType => "anyType",
    AnySimpleType => "anySimpleType",
    // Primitive.
    String => "string",
    Boolean => "boolean",
    Decimal => "decimal",
    Float => "float",
    Double => "double",
    Duration => "duration",
    DateTime => "dateTime",
    Time => "time",
    Date => "date",
    GYearMonth => "gYearMonth",
    GYear => "gYear",
    GMonthDay => "gMonthDay",
    GDay => "gDay",
    GMonth => "gMonth",
    HexBinary => "hexBinary",
    Base64Binary => "base64Binary",
    AnyUri => "anyURI",
    QName => "QName",
    Notation => "NOTATION",
    // Derived.
    NormalizedString => "normalizedString",
    Token => "token",
    Language => "language",
    NmToken => "NMTOKEN",
    NmTokens => "NMTOKENS",
    Name => "Name",
    NcName => "NCName",
    Id => "ID",
    IdRef => "IDREF",
    IdRefs => "IDREFS",
    Entity => "ENTITY",
    Entities => "ENTITIES",
    Integer => "integer",
    NonPositiveInteger => "nonPositiveInteger",
    NegativeInteger => "negativeInteger",
    Long => "long",
    Int => "int",
    Short => "short",
    Byte => "byte",
    NonNegativeInteger => "nonNegativeInteger",
    UnsignedLong => "unsignedLong",
    UnsignedInt => "unsignedInt",
    UnsignedShort => "unsignedShort",
    UnsignedByte => "unsignedByte",
    PositiveInteger => "positiveInteger",
}

impl BuiltinType {
    /// Parse type reference written as `prefix:local` or `local`. The
    /// prefix is ignored.
    #[must_use]
    pub fn parse_type(qname: &str) -> Self {
        let local = qname.rsplit_once(':').map_or(qname, |(_, local)| local);
        Self::from_local(local)
    }

    /// Built-in type referenced by resolved name. Names in the XML
    /// Schema namespace must be built-in; names without namespace are
    /// matched by local name.
    #[must_use]
    pub fn from_qname(name: &QName) -> Option<Self> {
        match name.namespace.as_deref() {
            Some(XSD_NS) | None => Some(Self::from_local(&name.local)).filter(Self::is_builtin),
            Some(_) => None,
        }
    }

    #[must_use]
    pub const fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// One of the 19 primitive datatypes.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::String
                | Self::Boolean
                | Self::Decimal
                | Self::Float
                | Self::Double
                | Self::Duration
                | Self::DateTime
                | Self::Time
                | Self::Date
                | Self::GYearMonth
                | Self::GYear
                | Self::GMonthDay
                | Self::GDay
                | Self::GMonth
                | Self::HexBinary
                | Self::Base64Binary
                | Self::AnyUri
                | Self::QName
                | Self::Notation
        )
    }

    /// Built-in derived datatype.
    #[must_use]
    pub const fn is_derived(&self) -> bool {
        self.is_builtin()
            && !self.is_primitive()
            && !matches!(self, Self::AnyType | Self::AnySimpleType)
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, Self::Decimal | Self::Float | Self::Double)
    }

    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Integer
                | Self::NonPositiveInteger
                | Self::NegativeInteger
                | Self::Long
                | Self::Int
                | Self::Short
                | Self::Byte
                | Self::NonNegativeInteger
                | Self::UnsignedLong
                | Self::UnsignedInt
                | Self::UnsignedShort
                | Self::UnsignedByte
                | Self::PositiveInteger
        )
    }

    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(
            self,
            Self::String
                | Self::NormalizedString
                | Self::Token
                | Self::Language
                | Self::NmToken
                | Self::NmTokens
                | Self::Name
                | Self::NcName
                | Self::Id
                | Self::IdRef
                | Self::IdRefs
                | Self::Entity
                | Self::Entities
                | Self::AnyUri
                | Self::Notation
        )
    }

    #[must_use]
    pub const fn is_temporal(&self) -> bool {
        matches!(
            self,
            Self::Duration
                | Self::DateTime
                | Self::Time
                | Self::Date
                | Self::GYearMonth
                | Self::GYear
                | Self::GMonthDay
                | Self::GDay
                | Self::GMonth
        )
    }

    #[must_use]
    pub const fn is_binary(&self) -> bool {
        matches!(self, Self::HexBinary | Self::Base64Binary)
    }

    /// List types whose value is a whitespace separated sequence.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::NmTokens | Self::IdRefs | Self::Entities)
    }
}

impl Display for BuiltinType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_strips_prefix() {
        assert_eq!(BuiltinType::parse_type("xs:unsignedLong"), BuiltinType::UnsignedLong);
        assert_eq!(BuiltinType::parse_type("string"), BuiltinType::String);
        assert_eq!(
            BuiltinType::parse_type("tns:Money"),
            BuiltinType::Custom("Money".into())
        );
    }

    #[test]
    fn predicates_partition_builtins() {
        for t in [
            BuiltinType::String,
            BuiltinType::Double,
            BuiltinType::Date,
            BuiltinType::HexBinary,
            BuiltinType::QName,
        ] {
            assert!(t.is_primitive() && !t.is_derived());
        }
        for t in [BuiltinType::Int, BuiltinType::Token, BuiltinType::NmTokens] {
            assert!(t.is_derived() && !t.is_primitive());
        }
        assert!(BuiltinType::UnsignedByte.is_numeric());
        assert!(BuiltinType::GMonth.is_temporal());
        assert!(BuiltinType::Base64Binary.is_binary());
        assert!(!BuiltinType::Custom("x".into()).is_builtin());
        assert!(!BuiltinType::Custom("x".into()).is_derived());
    }

    #[test]
    fn qname_lookup_honours_namespace() {
        let xsd = QName::new(Some(XSD_NS), "int");
        assert_eq!(BuiltinType::from_qname(&xsd), Some(BuiltinType::Int));
        assert_eq!(BuiltinType::from_qname(&QName::new(None, "int")), Some(BuiltinType::Int));
        assert_eq!(BuiltinType::from_qname(&QName::new(Some("urn:x"), "int")), None);
        assert_eq!(BuiltinType::from_qname(&QName::new(Some(XSD_NS), "nope")), None);
    }
}
