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

//! Generator output over the fixture documents.

use soapgen_compiler::commands::generate_sources;
use soapgen_compiler::compiler::Config;
use soapgen_compiler::compiler::WrapperPolicy;
use soapgen_compiler::generator::markdown;
use soapgen_compiler::wsdl::Definitions;
use std::fs::read;

const FIXTURES: &[&str] = &[
    "wsdl/number_conversion.wsdl",
    "wsdl/global_weather.wsdl",
    "wsdl/kitchen_sink.wsdl",
    "wsdl/case_collision.wsdl",
];

fn fixture(name: &str) -> Vec<u8> {
    read(name).unwrap()
}

#[test]
fn generation_is_deterministic() {
    for name in FIXTURES {
        let wsdl = fixture(name);
        let first = generate_sources(&wsdl, &Config::default()).unwrap();
        let second = generate_sources(&wsdl, &Config::default()).unwrap();
        assert_eq!(first, second, "{name}");
    }
}

#[test]
fn generated_files_carry_header() {
    for name in FIXTURES {
        let sources = generate_sources(&fixture(name), &Config::default()).unwrap();
        assert!(sources.types.starts_with("// Code generated by soapgen. DO NOT EDIT.\n"));
        assert!(sources.module.contains("pub mod types;"));
        assert!(sources.client.is_some(), "{name}");
    }
}

#[test]
fn wrapper_policy_controls_suffix() {
    let wsdl = fixture("wsdl/case_collision.wsdl");
    let auto = generate_sources(&wsdl, &Config::default()).unwrap();
    assert!(auto.types.contains("pub struct UserRequest {"));
    assert!(auto.types.contains("pub struct UserRequest2 {"));
    assert!(!auto.types.contains("Wrapper"));

    let always = generate_sources(&wsdl, &Config::default().wrapper(WrapperPolicy::Always)).unwrap();
    assert!(always.types.contains("pub struct UserRequestWrapper {"));
    assert!(always.types.contains("pub struct UserRequestWrapper2 {"));
}

#[test]
fn markdown_lists_operations_and_types() {
    let wsdl = fixture("wsdl/kitchen_sink.wsdl");
    let defs = Definitions::parse(&wsdl).unwrap();
    let compiled = soapgen_compiler::compiler::compile(&defs, &Config::default()).unwrap();
    let doc = markdown::generate(&compiled);
    assert!(doc.starts_with("# KitchenSink"), "{doc}");
    assert!(doc.contains("urn:kitchen-sink#Echo"));
    assert!(doc.contains("none (one-way)"));
    assert!(doc.contains("Values: `piece`, `kg`, `litre`"));
}
