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

//! Every supported schema construct, marshalled and sent.

use soapgen_core::from_str;
use soapgen_core::marshal;
use soapgen_core::Base64Binary;
use soapgen_core::DecodeError;
use soapgen_core::HexBinary;
use soapgen_core::RawXml;
use soapgen_http::ClientConfig;
use soapgen_http::Error;
use soapgen_tests::kitchen_sink::client::Client;
use soapgen_tests::kitchen_sink::client::ClientOption;
use soapgen_tests::kitchen_sink::types::AllTypes;
use soapgen_tests::kitchen_sink::types::AllTypesResponse;
use soapgen_tests::kitchen_sink::types::Annotated;
use soapgen_tests::kitchen_sink::types::AllTypes_Dimensions;
use soapgen_tests::kitchen_sink::types::AllTypes_Shipping;
use soapgen_tests::kitchen_sink::types::Audit;
use soapgen_tests::kitchen_sink::types::Category;
use soapgen_tests::kitchen_sink::types::Extension;
use soapgen_tests::kitchen_sink::types::GetCategory;
use soapgen_tests::kitchen_sink::types::Price;
use soapgen_tests::kitchen_sink::types::Unit;
use soapgen_tests::soap11_response;
use wiremock::matchers::body_string_contains;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

fn all_types() -> AllTypes {
    AllTypes {
        text: "fish & chips".into(),
        flag: true,
        tiny: -8,
        count: 42,
        big: -9_000_000_000,
        huge: u64::MAX,
        ratio: 0.25,
        amount: 12.5,
        when: "2023-12-25T10:30:00Z".parse().unwrap(),
        day: "2023-12-25".parse().unwrap(),
        blob: HexBinary(vec![0xde, 0xad, 0xbe, 0xef]),
        data: Base64Binary(b"hello".to_vec()),
        r#type: Some("retail".into()),
        note: None,
        items: vec!["spoon".into(), "fork".into()],
        unit: Unit::KG,
        priority: Some(3),
        codes: Some(vec!["1".into(), "2".into()]),
        price: Some(Price {
            value: 9.99,
            currency: "EUR".into(),
        }),
        category: Some(Category {
            name: "cutlery".into(),
            parent: Some(Box::new(Category {
                name: "kitchen".into(),
                parent: None,
                tags: vec![],
                id: 1,
            })),
            tags: vec!["steel".into()],
            id: 2,
        }),
        dimensions: Some(AllTypes_Dimensions {
            width: 1.5,
            height: 2.0,
        }),
        shipping: Some(AllTypes_Shipping::AIR),
        version: 3,
    }
}

#[test]
fn all_types_round_trip() {
    let value = all_types();
    let xml = marshal(&value);
    assert!(xml.starts_with("<AllTypes xmlns=\"urn:kitchen-sink\" version=\"3\">"), "{xml}");
    assert!(xml.contains("<text>fish &amp; chips</text>"), "{xml}");
    assert!(xml.contains("<flag>true</flag>"), "{xml}");
    assert!(xml.contains("<huge>18446744073709551615</huge>"), "{xml}");
    assert!(xml.contains("<when>2023-12-25T10:30:00Z</when>"), "{xml}");
    assert!(xml.contains("<blob>DEADBEEF</blob>"), "{xml}");
    assert!(xml.contains("<data>aGVsbG8=</data>"), "{xml}");
    assert!(xml.contains("<type>retail</type>"), "{xml}");
    assert!(xml.contains("<unit>kg</unit>"), "{xml}");
    assert!(xml.contains("<codes>1 2</codes>"), "{xml}");
    assert!(xml.contains("<price currency=\"EUR\">9.99</price>"), "{xml}");
    assert!(!xml.contains("<note"), "{xml}");
    assert_eq!(from_str::<AllTypes>(&xml).unwrap(), value);
}

#[test]
fn recursive_type_is_boxed() {
    let category = all_types().category.unwrap();
    let parent: &Category = category.parent.as_deref().unwrap();
    assert_eq!(parent.name, "kitchen");
    assert_eq!(parent.parent, None);
}

#[test]
fn enumerations_keep_unknown_values() {
    assert_eq!(Unit::default(), Unit::PIECE);
    assert_eq!(Unit::LITRE.as_str(), "litre");
    assert_eq!(Unit::KG.to_string(), "kg");
    assert!(Unit::new("kg").is_valid());
    assert_eq!(Unit::new("kg"), Unit::KG);
    let unknown = Unit::new("barrel");
    assert!(!unknown.is_valid());
    assert_eq!(unknown.as_str(), "barrel");
}

#[test]
fn missing_required_field_is_reported() {
    let err = from_str::<GetCategory>("<GetCategory xmlns=\"urn:kitchen-sink\"/>").unwrap_err();
    assert!(matches!(err, DecodeError::MissingElement { name: "id", .. }), "{err}");
}

#[test]
fn wildcard_captures_unknown_children() {
    let xml = "<Extension xmlns=\"urn:kitchen-sink\"><name>ext</name><extra>1</extra></Extension>";
    let value = from_str::<Extension>(xml).unwrap();
    assert_eq!(value.name, "ext");
    assert!(value.any.as_str().contains(">1</extra>"), "{}", value.any.as_str());

    let written = marshal(&Extension {
        name: "ext".into(),
        any: RawXml::from("<extra>2</extra>"),
    });
    assert!(written.ends_with("<extra>2</extra></Extension>"), "{written}");
}

#[test]
fn wildcard_between_elements_keeps_document_order() {
    let value = Annotated {
        title: "t".into(),
        any: RawXml::from("<note>n</note>"),
        footer: "f".into(),
    };
    let xml = marshal(&value);
    let title = xml.find("<title").unwrap();
    let note = xml.find("<note>n</note>").unwrap();
    let footer = xml.find("<footer").unwrap();
    assert!(title < note && note < footer, "{xml}");

    let decoded = from_str::<Annotated>(&xml).unwrap();
    assert_eq!(decoded.title, "t");
    assert_eq!(decoded.footer, "f");
    assert!(decoded.any.as_str().contains(">n</note>"), "{}", decoded.any.as_str());
}

#[tokio::test]
async fn echo() -> Result<(), Error> {
    let value = all_types();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("soapaction", "urn:kitchen-sink#Echo"))
        .and(body_string_contains(marshal(&value)))
        .respond_with(ResponseTemplate::new(200).set_body_string(soap11_response(&format!(
            "<r:AllTypesResponse xmlns:r=\"urn:kitchen-sink\"><r:received>1</r:received>{}</r:AllTypesResponse>",
            marshal(&value)
        ))))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(ClientConfig::new().endpoint(server.uri()))?;
    let response = client.echo(&value, &ClientOption::new()).await?;
    assert_eq!(
        response,
        AllTypesResponse {
            received: 1,
            all_types: Some(value),
        }
    );
    Ok(())
}

#[tokio::test]
async fn one_way_operation_accepts_empty_response() -> Result<(), Error> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("soapaction", "urn:kitchen-sink#Audit"))
        .and(body_string_contains("<message>opened</message>"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(ClientConfig::new().endpoint(server.uri()))?;
    let request = Audit {
        message: "opened".into(),
    };
    client.audit(&request, &ClientOption::new()).await
}

#[tokio::test]
async fn one_way_operation_reports_fault() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(soap11_response(
            "<soap:Fault><faultcode>soap:Server</faultcode><faultstring>audit log full</faultstring></soap:Fault>",
        )))
        .mount(&server)
        .await;

    let client = Client::new(ClientConfig::new().endpoint(server.uri())).unwrap();
    let request = Audit {
        message: "opened".into(),
    };
    let err = client.audit(&request, &ClientOption::new()).await.unwrap_err();
    assert!(
        matches!(&err, Error::Fault(fault) if fault.message == "audit log full"),
        "{err}"
    );
}

#[tokio::test]
async fn undecodable_response_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(soap11_response(
            "<GetCategoryResponse xmlns=\"urn:kitchen-sink\"><category id=\"x\"><name>a</name></category></GetCategoryResponse>",
        )))
        .mount(&server)
        .await;

    let client = Client::new(ClientConfig::new().endpoint(server.uri())).unwrap();
    let err = client
        .get_category(&GetCategory { id: 1 }, &ClientOption::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "{err}");
}
