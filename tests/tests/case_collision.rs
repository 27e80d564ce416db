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

//! Element names differing only in case.

use soapgen_core::marshal;
use soapgen_core::XmlStruct;
use soapgen_http::ClientConfig;
use soapgen_http::Error;
use soapgen_tests::case_collision::client::Client;
use soapgen_tests::case_collision::client::ClientOption;
use soapgen_tests::case_collision::types::UserRequestWrapper;
use soapgen_tests::case_collision::types::UserRequestWrapper2;
use soapgen_tests::case_collision_auto::types::UserRequest;
use soapgen_tests::case_collision_auto::types::UserRequest2;
use wiremock::matchers::body_string_contains;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

#[test]
fn both_spellings_are_emitted() {
    assert_eq!(UserRequestWrapper::DESCRIPTOR.name, "UserRequest");
    assert_eq!(UserRequestWrapper2::DESCRIPTOR.name, "userRequest");
    assert_eq!(UserRequestWrapper::DESCRIPTOR.namespace, Some("urn:users"));
    assert_eq!(UserRequestWrapper2::DESCRIPTOR.fields.len(), 2);

    let second = UserRequestWrapper2 {
        login: "ada".into(),
        email: Some("ada@example.org".into()),
    };
    assert_eq!(
        marshal(&second),
        "<userRequest xmlns=\"urn:users\"><login>ada</login><email>ada@example.org</email></userRequest>"
    );
}

#[test]
fn both_spellings_are_emitted_without_wrappers() {
    assert_eq!(UserRequest::DESCRIPTOR.name, "UserRequest");
    assert_eq!(UserRequest2::DESCRIPTOR.name, "userRequest");
    assert_eq!(UserRequest2::DESCRIPTOR.namespace, Some("urn:users"));

    let first = UserRequest {
        login: "ada".into(),
    };
    assert_eq!(
        marshal(&first),
        "<UserRequest xmlns=\"urn:users\"><login>ada</login></UserRequest>"
    );
}

#[tokio::test]
async fn each_operation_sends_its_own_element() -> Result<(), Error> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("soapaction", "urn:users#CreateUser"))
        .and(body_string_contains("<UserRequest xmlns=\"urn:users\">"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("soapaction", "urn:users#UpdateUser"))
        .and(body_string_contains("<userRequest xmlns=\"urn:users\">"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(ClientConfig::new().endpoint(server.uri()))?;
    let opts = ClientOption::new();
    client
        .create_user(
            &UserRequestWrapper {
                login: "ada".into(),
            },
            &opts,
        )
        .await?;
    client
        .update_user(
            &UserRequestWrapper2 {
                login: "ada".into(),
                email: None,
            },
            &opts,
        )
        .await?;
    Ok(())
}
