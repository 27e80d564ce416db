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

//! SOAP over HTTP.
//!
//! [`SoapClient`] posts SOAP envelopes through an [`HttpClient`]
//! implementation and turns responses into envelopes, typed faults or
//! decoded structs. Generated client stubs hold a `SoapClient` and call
//! [`SoapClient::invoke`] (request-response) or [`SoapClient::send`]
//! (one-way) for every operation.
//!
//! Response handling:
//! - HTTP status outside of 2xx gives [`Error::Http`] with the raw body,
//!   even if the body carries a SOAP fault;
//! - 2xx with a `Fault` in the envelope namespace gives [`Error::Fault`];
//! - otherwise the response envelope is returned.
//!
//! A call is cancelled by dropping its future.

#[cfg(feature = "reqwest")]
pub mod reqwest;

use http::header::HeaderName;
use http::header::HeaderValue;
use http::header::CONTENT_TYPE;
use http::HeaderMap;
use http::StatusCode;
use soapgen_core::add_xml_declaration;
use soapgen_core::DecodeError;
use soapgen_core::Envelope;
use soapgen_core::EnvelopeError;
use soapgen_core::Fault;
use soapgen_core::SoapVersion;
use soapgen_core::XmlStruct;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::future::Future;
use std::time::Duration;
use tracing::debug;
use tracing::trace;
use tracing::warn;
use url::Url;

/// Name of the SOAP 1.1 action header.
pub const SOAP_ACTION: &str = "SOAPAction";

/// HTTP transport used by [`SoapClient`].
pub trait HttpClient: Send + Sync {
    type Error: StdError + Send + Sync + 'static;

    /// POST `body` to `url`. Any HTTP status is a successful response
    /// at this level.
    fn post(
        &self,
        url: Url,
        headers: HeaderMap,
        body: String,
        timeout: Option<Duration>,
    ) -> impl Future<Output = Result<HttpResponse, Self::Error>> + Send;
}

/// Raw HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Client-wide configuration.
///
/// # Examples
///
/// ```rust
/// use soapgen_http::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new()
///     .endpoint("http://localhost:8080/soap")
///     .timeout(Duration::from_secs(30))
///     .xml_declaration(false);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service endpoint. Generated clients seed it with the address
    /// from the WSDL.
    pub endpoint: Option<String>,
    pub soap_version: SoapVersion,
    /// Prepend `<?xml ...?>` declaration to request bodies.
    pub xml_declaration: bool,
    /// Headers added to every request.
    pub headers: HeaderMap,
    /// Request timeout; a per-call timeout overrides it.
    pub timeout: Option<Duration>,
    /// TCP connection timeout
    pub connect_timeout: Option<Duration>,
    /// User-Agent header value
    pub user_agent: Option<String>,
    /// Whether to accept invalid TLS certificates
    pub accept_invalid_certs: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            soap_version: SoapVersion::V11,
            xml_declaration: true,
            headers: HeaderMap::new(),
            timeout: Some(Duration::from_secs(120)),
            connect_timeout: Some(Duration::from_secs(5)),
            user_agent: Some(concat!("soapgen/", env!("CARGO_PKG_VERSION")).to_string()),
            accept_invalid_certs: false,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set endpoint only if none is configured yet.
    #[must_use]
    pub fn default_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        if self.endpoint.is_none() {
            let endpoint = endpoint.into();
            if !endpoint.is_empty() {
                self.endpoint = Some(endpoint);
            }
        }
        self
    }

    #[must_use]
    pub const fn soap_version(mut self, version: SoapVersion) -> Self {
        self.soap_version = version;
        self
    }

    #[must_use]
    pub const fn xml_declaration(mut self, v: bool) -> Self {
        self.xml_declaration = v;
        self
    }

    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    #[must_use]
    pub const fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Overrides the configured endpoint.
    pub endpoint: Option<String>,
    /// Added to (and override) configured headers.
    pub headers: HeaderMap,
    pub timeout: Option<Duration>,
}

impl CallOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// SOAP call error.
#[derive(Debug)]
pub enum Error {
    /// HTTP status outside of 2xx.
    Http { status: StatusCode, body: String },
    /// SOAP fault in a successful response.
    Fault(Fault),
    /// Transport failure, including timeouts.
    Transport(Box<dyn StdError + Send + Sync>),
    /// Response is not a SOAP envelope.
    Envelope(EnvelopeError),
    /// Response body cannot be decoded as the expected struct.
    Decode(DecodeError),
    MissingEndpoint,
    InvalidEndpoint(String, url::ParseError),
    InvalidHeader(String),
}

impl Error {
    pub fn transport<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Transport(Box::new(err))
    }

    /// Fault carried by the error.
    #[must_use]
    pub const fn fault(&self) -> Option<&Fault> {
        match self {
            Self::Fault(fault) => Some(fault),
            _ => None,
        }
    }

    /// HTTP status of a non-successful response.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Http { status, body } => write!(f, "HTTP error {status}: {body}"),
            Self::Fault(fault) => fault.fmt(f),
            Self::Transport(err) => write!(f, "transport error: {err}"),
            Self::Envelope(err) => write!(f, "invalid response: {err}"),
            Self::Decode(err) => write!(f, "cannot decode response: {err}"),
            Self::MissingEndpoint => write!(f, "no endpoint configured"),
            Self::InvalidEndpoint(endpoint, err) => {
                write!(f, "invalid endpoint {endpoint}: {err}")
            }
            Self::InvalidHeader(header) => write!(f, "invalid header: {header}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Fault(fault) => Some(fault),
            Self::Transport(err) => Some(err.as_ref()),
            Self::Envelope(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::InvalidEndpoint(_, err) => Some(err),
            _ => None,
        }
    }
}

impl From<EnvelopeError> for Error {
    fn from(value: EnvelopeError) -> Self {
        Self::Envelope(value)
    }
}

impl From<DecodeError> for Error {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

impl From<Fault> for Error {
    fn from(value: Fault) -> Self {
        Self::Fault(value)
    }
}

/// SOAP client over an [`HttpClient`].
///
/// The client keeps only immutable configuration and can be shared
/// between tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use soapgen_core::Envelope;
/// use soapgen_http::CallOptions;
/// use soapgen_http::ClientConfig;
/// use soapgen_http::SoapClient;
///
/// # async fn example() -> Result<(), soapgen_http::Error> {
/// let client = SoapClient::new(ClientConfig::new().endpoint("http://localhost/soap"))?;
/// let envelope = Envelope::new("<Ping xmlns=\"urn:example\"/>");
/// let response = client.call("urn:example#Ping", &envelope, &CallOptions::new()).await?;
/// println!("{}", response.body);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SoapClient<C: HttpClient> {
    client: C,
    config: ClientConfig,
}

#[cfg(feature = "reqwest")]
impl SoapClient<crate::reqwest::Client> {
    /// Client with the reqwest transport built from `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let params = crate::reqwest::ClientParams::from(&config);
        let client = crate::reqwest::Client::with_params(params).map_err(Error::transport)?;
        Ok(Self::with_client(client, config))
    }
}

impl<C: HttpClient> SoapClient<C> {
    #[must_use]
    pub const fn with_client(client: C, config: ClientConfig) -> Self {
        Self { client, config }
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send envelope and return response envelope.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status, SOAP fault
    /// or a response that is not an envelope.
    pub async fn call(
        &self,
        action: &str,
        envelope: &Envelope,
        opts: &CallOptions,
    ) -> Result<Envelope, Error> {
        let body = self.post(action, envelope.version, envelope.to_xml(), opts).await?;
        let response = Envelope::parse(&body)?;
        match response.fault() {
            Some(fault) => Err(Error::Fault(fault)),
            None => Ok(response),
        }
    }

    /// Send a complete request body as is (except XML declaration
    /// handling) and return the raw response body.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-2xx status.
    pub async fn call_raw(
        &self,
        action: &str,
        body: String,
        opts: &CallOptions,
    ) -> Result<String, Error> {
        self.post(action, self.config.soap_version, body, opts).await
    }

    /// Request-response operation: marshal request into an envelope
    /// body and decode the response body.
    ///
    /// # Errors
    ///
    /// See [`SoapClient::call`]; additionally fails if the response body
    /// cannot be decoded as `Resp`.
    pub async fn invoke<Req, Resp>(
        &self,
        action: &str,
        request: &Req,
        opts: &CallOptions,
    ) -> Result<Resp, Error>
    where
        Req: XmlStruct + Sync,
        Resp: XmlStruct,
    {
        let envelope = Envelope::from_struct(request).with_version(self.config.soap_version);
        let response = self.call(action, &envelope, opts).await?;
        Ok(response.decode_body()?)
    }

    /// One-way operation. The response body is discarded unless it
    /// carries a SOAP fault; a body that is not an envelope is logged.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or SOAP
    /// fault.
    pub async fn send<Req>(&self, action: &str, request: &Req, opts: &CallOptions) -> Result<(), Error>
    where
        Req: XmlStruct + Sync,
    {
        let envelope = Envelope::from_struct(request).with_version(self.config.soap_version);
        let body = self.post(action, envelope.version, envelope.to_xml(), opts).await?;
        if body.trim().is_empty() {
            return Ok(());
        }
        match Envelope::parse(&body) {
            Ok(envelope) => envelope.fault().map_or(Ok(()), |fault| Err(Error::Fault(fault))),
            Err(err) => {
                warn!(%err, "one-way response is not a SOAP envelope, ignored");
                Ok(())
            }
        }
    }

    async fn post(
        &self,
        action: &str,
        version: SoapVersion,
        body: String,
        opts: &CallOptions,
    ) -> Result<String, Error> {
        let endpoint = opts
            .endpoint
            .as_ref()
            .or(self.config.endpoint.as_ref())
            .ok_or(Error::MissingEndpoint)?;
        let url = Url::parse(endpoint).map_err(|e| Error::InvalidEndpoint(endpoint.clone(), e))?;
        let headers = self.headers(action, version, opts)?;
        let body = if self.config.xml_declaration {
            add_xml_declaration(&body)
        } else {
            body
        };
        let timeout = opts.timeout.or(self.config.timeout);

        debug!(%url, action, %version, "SOAP call");
        trace!(%body, "SOAP request");
        let response = self
            .client
            .post(url, headers, body, timeout)
            .await
            .map_err(Error::transport)?;
        trace!(status = %response.status, body = %response.body, "SOAP response");

        if response.status.is_success() {
            Ok(response.body)
        } else {
            Err(Error::Http {
                status: response.status,
                body: response.body,
            })
        }
    }

    fn headers(&self, action: &str, version: SoapVersion, opts: &CallOptions) -> Result<HeaderMap, Error> {
        let mut headers = self.config.headers.clone();
        for (name, value) in &opts.headers {
            headers.insert(name.clone(), value.clone());
        }
        let content_type = version.content_type(action);
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(&content_type).map_err(|_| Error::InvalidHeader(content_type))?,
        );
        if version.uses_soap_action_header() && !action.is_empty() {
            let value = HeaderValue::from_str(action)
                .map_err(|_| Error::InvalidHeader(format!("{SOAP_ACTION}: {action}")))?;
            headers.insert(HeaderName::from_static("soapaction"), value);
        }
        Ok(headers)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct NoTransport;

    #[derive(Debug)]
    struct Unreachable;

    impl Display for Unreachable {
        fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
            f.write_str("unreachable")
        }
    }

    impl StdError for Unreachable {}

    impl HttpClient for NoTransport {
        type Error = Unreachable;

        async fn post(
            &self,
            _url: Url,
            _headers: HeaderMap,
            _body: String,
            _timeout: Option<Duration>,
        ) -> Result<HttpResponse, Self::Error> {
            Err(Unreachable)
        }
    }

    #[test]
    fn default_endpoint_does_not_override() {
        let config = ClientConfig::new()
            .endpoint("http://a/")
            .default_endpoint("http://b/");
        assert_eq!(config.endpoint.as_deref(), Some("http://a/"));
        let config = ClientConfig::new().default_endpoint("http://b/");
        assert_eq!(config.endpoint.as_deref(), Some("http://b/"));
        let config = ClientConfig::new().default_endpoint("");
        assert_eq!(config.endpoint, None);
    }

    #[test]
    fn soap_action_header_only_for_soap11() {
        let client = SoapClient::with_client(NoTransport, ClientConfig::new());
        let opts = CallOptions::new().header(
            HeaderName::from_static("x-trace"),
            HeaderValue::from_static("1"),
        );
        let headers = client.headers("urn:a", SoapVersion::V11, &opts).unwrap();
        assert_eq!(headers.get(SOAP_ACTION).unwrap(), "urn:a");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "text/xml; charset=utf-8");
        assert_eq!(headers.get("x-trace").unwrap(), "1");

        let headers = client.headers("", SoapVersion::V11, &opts).unwrap();
        assert!(headers.get(SOAP_ACTION).is_none());

        let headers = client.headers("urn:a", SoapVersion::V12, &opts).unwrap();
        assert!(headers.get(SOAP_ACTION).is_none());
        assert_eq!(
            headers.get(CONTENT_TYPE).unwrap(),
            "application/soap+xml; charset=utf-8; action=\"urn:a\""
        );
    }

    #[tokio::test]
    async fn missing_endpoint_is_reported() {
        let client = SoapClient::with_client(NoTransport, ClientConfig::new());
        let result = client.call_raw("", String::new(), &CallOptions::new()).await;
        assert!(matches!(result, Err(Error::MissingEndpoint)));

        let opts = CallOptions::new().endpoint("not a url");
        let result = client.call_raw("", String::new(), &opts).await;
        assert!(matches!(result, Err(Error::InvalidEndpoint(_, _))));

        let opts = CallOptions::new().endpoint("http://localhost/");
        let result = client.call_raw("", String::new(), &opts).await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }
}
