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

//! Single SOAP call.
//!
//! The payload is sent as the body of a SOAP envelope (or as is with
//! `--full-envelope`); the response body (or the whole envelope with
//! `--output-envelope`) is pretty-printed.

use clap::Args;
use http::HeaderName;
use http::HeaderValue;
use soapgen_core::format_xml;
use soapgen_core::strip_xml_declaration;
use soapgen_core::Envelope;
use soapgen_core::SoapVersion;
use soapgen_http::CallOptions;
use soapgen_http::ClientConfig;
use soapgen_http::Error as SoapError;
use soapgen_http::SoapClient;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::fs::read_to_string;
use std::fs::write;
use std::io::Error as IoError;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use tracing::warn;

#[derive(Args, Debug)]
pub struct CallArgs {
    /// Service endpoint.
    #[arg(short, long)]
    endpoint: String,
    /// `SOAPAction` of the operation.
    #[arg(short, long, default_value = "")]
    action: String,
    /// File with the request body (or the whole envelope).
    #[arg(short, long)]
    payload: PathBuf,
    /// Payload is a complete SOAP envelope.
    #[arg(long)]
    full_envelope: bool,
    /// Print the whole response envelope instead of its body.
    #[arg(long)]
    output_envelope: bool,
    /// Extra HTTP headers: `name:value,...`.
    #[arg(long, value_delimiter = ',')]
    headers: Vec<String>,
    /// Request timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,
    /// Accept invalid TLS certificates.
    #[arg(long)]
    insecure: bool,
    /// Use SOAP 1.2 envelope.
    #[arg(long)]
    soap12: bool,
    /// Output file; the response is printed if not specified.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug)]
pub enum Error {
    Io(PathBuf, IoError),
    Header(String),
    Soap(SoapError),
    Runtime(IoError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Io(fname, err) => write!(f, "input/output error: file: {}: {err}", fname.display()),
            Self::Header(header) => write!(f, "invalid header (expected name:value): {header}"),
            Self::Soap(err) => write!(f, "SOAP call failed: {err}"),
            Self::Runtime(err) => write!(f, "cannot start runtime: {err}"),
        }
    }
}

impl StdError for Error {}

/// Perform the call.
///
/// # Errors
///
/// Returns error if payload cannot be read or the call fails.
pub fn run(args: &CallArgs) -> Result<(), Error> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(Error::Runtime)?;
    let response = runtime.block_on(call(args))?;
    let formatted = format_xml(&response).unwrap_or_else(|err| {
        warn!("response is printed unformatted: {err}");
        response
    });
    match &args.output {
        Some(output) => write(output, formatted).map_err(|e| Error::Io(output.clone(), e)),
        None => {
            println!("{formatted}");
            Ok(())
        }
    }
}

async fn call(args: &CallArgs) -> Result<String, Error> {
    let payload = read_to_string(&args.payload).map_err(|e| Error::Io(args.payload.clone(), e))?;
    let version = if args.soap12 {
        SoapVersion::V12
    } else {
        SoapVersion::V11
    };
    let mut config = ClientConfig::new()
        .endpoint(args.endpoint.clone())
        .soap_version(version)
        .accept_invalid_certs(args.insecure);
    if let Some(timeout) = args.timeout {
        config = config.timeout(Duration::from_secs(timeout));
    }
    let mut opts = CallOptions::new();
    for header in args.headers.iter().filter(|h| !h.trim().is_empty()) {
        let (name, value) = parse_header(header)?;
        opts = opts.header(name, value);
    }
    let client = SoapClient::new(config).map_err(Error::Soap)?;
    debug!("calling {} with action {:?}", args.endpoint, args.action);

    let response = if args.full_envelope {
        let raw = client
            .call_raw(&args.action, payload, &opts)
            .await
            .map_err(Error::Soap)?;
        match Envelope::parse(&raw) {
            Ok(envelope) => match envelope.fault() {
                Some(fault) => return Err(Error::Soap(SoapError::Fault(fault))),
                None => envelope,
            },
            Err(_) if args.output_envelope => return Ok(raw),
            Err(err) => return Err(Error::Soap(SoapError::Envelope(err))),
        }
    } else {
        let envelope = Envelope::new(strip_xml_declaration(&payload)).with_version(version);
        client
            .call(&args.action, &envelope, &opts)
            .await
            .map_err(Error::Soap)?
    };
    Ok(if args.output_envelope {
        response.to_xml()
    } else {
        response.body.into_inner()
    })
}

fn parse_header(header: &str) -> Result<(HeaderName, HeaderValue), Error> {
    let (name, value) = header
        .split_once(':')
        .ok_or_else(|| Error::Header(header.to_string()))?;
    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .map_err(|_| Error::Header(header.to_string()))?;
    let value =
        HeaderValue::from_str(value.trim()).map_err(|_| Error::Header(header.to_string()))?;
    Ok((name, value))
}
