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

//! Document/literal service with message wrappers.

use http::HeaderName;
use http::HeaderValue;
use soapgen_core::from_str;
use soapgen_core::marshal;
use soapgen_http::ClientConfig;
use soapgen_http::Error;
use soapgen_tests::global_weather::client::Client;
use soapgen_tests::global_weather::client::ClientOption;
use soapgen_tests::global_weather::types::GetCitiesByCountryWrapper;
use soapgen_tests::global_weather::types::GetWeatherEnvelope;
use soapgen_tests::global_weather::types::GetWeatherWrapper;
use soapgen_tests::soap11_response;
use wiremock::matchers::body_string_contains;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

const NS: &str = "http://www.webserviceX.NET";

fn berlin() -> GetWeatherWrapper {
    GetWeatherWrapper {
        city_name: Some("Berlin".into()),
        country_name: Some("Germany".into()),
    }
}

#[tokio::test]
async fn get_weather() -> Result<(), Error> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("soapaction", "http://www.webserviceX.NET/GetWeather"))
        .and(body_string_contains(format!(
            "<GetWeather xmlns=\"{NS}\"><CityName>Berlin</CityName><CountryName>Germany</CountryName></GetWeather>"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_string(soap11_response(&format!(
            "<GetWeatherResponse xmlns=\"{NS}\"><GetWeatherResult>Sunny, 21 C</GetWeatherResult></GetWeatherResponse>"
        ))))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(ClientConfig::new().endpoint(server.uri()))?;
    let response = client.get_weather(&berlin(), &ClientOption::new()).await?;
    assert_eq!(response.get_weather_result.as_deref(), Some("Sunny, 21 C"));
    Ok(())
}

#[tokio::test]
async fn absent_optional_result_is_none() -> Result<(), Error> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(soap11_response(&format!(
            "<GetCitiesByCountryResponse xmlns=\"{NS}\"/>"
        ))))
        .mount(&server)
        .await;

    let client = Client::new(ClientConfig::new().endpoint(server.uri()))?;
    let request = GetCitiesByCountryWrapper {
        country_name: None,
    };
    let response = client
        .get_cities_by_country(&request, &ClientOption::new())
        .await?;
    assert_eq!(response.get_cities_by_country_result, None);
    Ok(())
}

#[tokio::test]
async fn call_options_override_endpoint() -> Result<(), Error> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/override"))
        .and(header("x-request-id", "17"))
        .respond_with(ResponseTemplate::new(200).set_body_string(soap11_response(
            "<GetWeatherResponse><GetWeatherResult>Rain</GetWeatherResult></GetWeatherResponse>",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(ClientConfig::new())?;
    let opts = ClientOption::new()
        .endpoint(format!("{}/override", server.uri()))
        .header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("17"),
        );
    let response = client.get_weather(&berlin(), &opts).await?;
    assert_eq!(response.get_weather_result.as_deref(), Some("Rain"));
    Ok(())
}

#[test]
fn data_element_wraps_operation_element() {
    let envelope = GetWeatherEnvelope {
        get_weather: berlin(),
    };
    let xml = marshal(&envelope);
    assert_eq!(
        xml,
        format!(
            "<getWeatherEnvelope><GetWeather xmlns=\"{NS}\"><CityName>Berlin</CityName>\
             <CountryName>Germany</CountryName></GetWeather></getWeatherEnvelope>"
        )
    );
    assert_eq!(from_str::<GetWeatherEnvelope>(&xml).unwrap(), envelope);
}
