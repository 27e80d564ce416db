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

//! Code generated from the fixture WSDL documents in `wsdl/`.
//!
//! `build.rs` compiles every service of `soapgen.toml` into `OUT_DIR`;
//! the generated files are included here as they would be checked in
//! by a user of the generator.

macro_rules! generated {
    ($package:ident) => {
        pub mod $package {
            pub mod types {
                include!(concat!(env!("OUT_DIR"), "/", stringify!($package), "/types.rs"));
            }
            pub mod client {
                include!(concat!(env!("OUT_DIR"), "/", stringify!($package), "/client.rs"));
            }
        }
    };
}

generated!(number_conversion);
generated!(global_weather);
generated!(kitchen_sink);
generated!(case_collision);
generated!(case_collision_auto);

/// Envelope of a SOAP 1.1 response with `body` as content of `Body`.
#[must_use]
pub fn soap11_response(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\">\
         <soap:Body>{body}</soap:Body></soap:Envelope>"
    )
}
