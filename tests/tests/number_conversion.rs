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

//! Rpc/literal service: synthesised message wrappers, SOAP 1.1
//! transport details and fault handling.

use soapgen_core::SoapVersion;
use soapgen_http::ClientConfig;
use soapgen_http::Error;
use soapgen_tests::number_conversion::client::Client;
use soapgen_tests::number_conversion::client::ClientOption;
use soapgen_tests::number_conversion::client::DEFAULT_ENDPOINT;
use soapgen_tests::number_conversion::types::NumberToDollarsWrapper;
use soapgen_tests::number_conversion::types::NumberToWordsResponseWrapper;
use soapgen_tests::number_conversion::types::NumberToWordsWrapper;
use soapgen_tests::soap11_response;
use wiremock::matchers::body_string_contains;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::Request;
use wiremock::ResponseTemplate;

const NS: &str = "http://www.dataaccess.com/webservicesserver/";

fn client(server: &MockServer) -> Client {
    Client::new(ClientConfig::new().endpoint(server.uri())).unwrap()
}

#[test]
fn client_is_seeded_from_first_soap11_port() {
    assert_eq!(
        DEFAULT_ENDPOINT,
        "https://www.dataaccess.com/webservicesserver/NumberConversion.wso"
    );
    let client = Client::new(ClientConfig::new()).unwrap();
    assert_eq!(client.inner().config().endpoint.as_deref(), Some(DEFAULT_ENDPOINT));
    assert_eq!(client.inner().config().soap_version, SoapVersion::V11);
}

#[tokio::test]
async fn number_to_words() -> Result<(), Error> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("content-type", "text/xml; charset=utf-8"))
        .and(|req: &Request| !req.headers.contains_key("soapaction"))
        .and(body_string_contains(format!("<NumberToWords xmlns=\"{NS}\">")))
        .and(body_string_contains(">42</ubiNum>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(soap11_response(&format!(
            "<m:NumberToWordsResponse xmlns:m=\"{NS}\">\
             <m:NumberToWordsResult>forty two</m:NumberToWordsResult>\
             </m:NumberToWordsResponse>"
        ))))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .number_to_words(&NumberToWordsWrapper { ubi_num: 42 }, &ClientOption::new())
        .await?;
    assert_eq!(
        response,
        NumberToWordsResponseWrapper {
            number_to_words_result: "forty two".into()
        }
    );
    Ok(())
}

#[tokio::test]
async fn request_starts_with_xml_declaration() -> Result<(), Error> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(|req: &Request| req.body.starts_with(b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(soap11_response(
            "<NumberToDollarsResponse><NumberToDollarsResult>one dollar</NumberToDollarsResult></NumberToDollarsResponse>",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .number_to_dollars(&NumberToDollarsWrapper { d_num: 1.0 }, &ClientOption::new())
        .await?;
    assert_eq!(response.number_to_dollars_result, "one dollar");
    Ok(())
}

#[tokio::test]
async fn fault_in_success_response_is_typed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(soap11_response(
            "<soap:Fault><faultcode>Client</faultcode><faultstring>Invalid request</faultstring></soap:Fault>",
        )))
        .mount(&server)
        .await;

    let err = client(&server)
        .number_to_words(&NumberToWordsWrapper { ubi_num: 1 }, &ClientOption::new())
        .await
        .unwrap_err();
    match err {
        Error::Fault(fault) => {
            assert_eq!(fault.code, "Client");
            assert_eq!(fault.message, "Invalid request");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn fault_in_server_error_stays_http_error() {
    let server = MockServer::start().await;
    let body = soap11_response(
        "<soap:Fault><faultcode>soap:Server</faultcode><faultstring>boom</faultstring></soap:Fault>",
    );
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string(body.clone()))
        .mount(&server)
        .await;

    let err = client(&server)
        .number_to_words(&NumberToWordsWrapper { ubi_num: 1 }, &ClientOption::new())
        .await
        .unwrap_err();
    match err {
        Error::Http { status, body: response } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(response, body);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn response_that_is_not_an_envelope_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .number_to_words(&NumberToWordsWrapper { ubi_num: 1 }, &ClientOption::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Envelope(_)), "{err}");
}
