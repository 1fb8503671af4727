//! HTTP transport abstraction.
//!
//! The connection never talks to the network itself. It hands an [`HttpRequest`]
//! to an [`HttpTransport`] and interprets the [`HttpResponse`] it gets back.
//! Production code uses [`ReqwestTransport`]; tests plug in scripted transports.
//!
//! A transport must return every HTTP response verbatim, whatever its status.
//! Only failures that prevent a response from arriving (DNS, connect, timeout)
//! are errors.

use crate::client::config::{ConnectionSettings, UserCredentials};
use crate::client::utils::is_success_status;
use crate::error::{EventStoreError, Result, TransportErrorKind};
use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use std::collections::BTreeMap;
use std::time::Duration;

/// An HTTP request to send.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Method
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Headers, keys lowercase
    pub headers: BTreeMap<String, String>,
    /// Body, if any
    pub body: Option<Bytes>,
    /// Basic-auth credentials, if any
    pub credentials: Option<UserCredentials>,
}

impl HttpRequest {
    /// Create a request with no headers or body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        HttpRequest {
            method,
            url: url.into(),
            headers: BTreeMap::new(),
            body: None,
            credentials: None,
        }
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set or clear credentials.
    pub fn with_credentials(mut self, credentials: Option<UserCredentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Look up a header, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// An HTTP response as received.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Reason phrase
    pub reason: String,
    /// Headers, keys lowercase
    pub headers: BTreeMap<String, String>,
    /// Body
    pub body: Bytes,
}

impl HttpResponse {
    /// Create a response whose reason is the canonical phrase for `status`.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        let reason = http::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("")
            .to_string();

        HttpResponse {
            status,
            reason,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// Override the reason phrase.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Whether the status is `2xx`.
    pub fn is_success(&self) -> bool {
        is_success_status(self.status)
    }
}

/// Sends requests to the store.
///
/// Implementations must be safe to share between concurrent operations.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send `request` and return the response, whatever its status.
    ///
    /// # Errors
    ///
    /// [`EventStoreError::Transport`] when no response could be obtained.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// [`HttpTransport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport from connection settings.
    ///
    /// The settings' timeout bounds each whole request/response cycle.
    pub fn from_settings(settings: &ConnectionSettings) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(settings.pool_max_idle_per_host);

        if let Some(timeout_ms) = settings.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        let client = builder
            .build()
            .map_err(|e| EventStoreError::Config(e.to_string()))?;

        Ok(Self::with_client(client))
    }

    /// Wrap an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        ReqwestTransport { client }
    }

    fn convert_error(err: reqwest::Error) -> EventStoreError {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else {
            TransportErrorKind::Other
        };

        EventStoreError::Transport {
            kind,
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut req_builder = self.client.request(request.method, &request.url);

        for (k, v) in &request.headers {
            req_builder = req_builder.header(k, v);
        }

        if let Some(creds) = &request.credentials {
            req_builder = req_builder.basic_auth(&creds.username, Some(&creds.password));
        }

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let response = req_builder.send().await.map_err(Self::convert_error)?;

        let status = response.status();
        let mut headers = BTreeMap::new();
        for (k, v) in response.headers() {
            if let Ok(val) = v.to_str() {
                headers.insert(k.as_str().to_string(), val.to_string());
            }
        }

        let body = response.bytes().await.map_err(Self::convert_error)?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_headers_are_case_insensitive() {
        let request = HttpRequest::new(Method::GET, "http://localhost:2113/streams/s/0")
            .with_header("Accept", "application/json");
        assert_eq!(request.header("accept"), Some("application/json"));
        assert_eq!(request.header("ACCEPT"), Some("application/json"));
        assert!(request.body.is_none());
    }

    #[test]
    fn test_response_canonical_reason() {
        assert_eq!(HttpResponse::new(404, "").reason, "Not Found");
        assert_eq!(HttpResponse::new(410, "").reason, "Gone");
        assert_eq!(HttpResponse::new(299, "").reason, "");
        assert_eq!(
            HttpResponse::new(400, "").with_reason("Wrong expected EventNumber").reason,
            "Wrong expected EventNumber"
        );
    }

    #[test]
    fn test_response_is_success() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(201, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
    }

    #[test]
    fn test_transport_from_settings() {
        let transport = ReqwestTransport::from_settings(&ConnectionSettings::default());
        assert!(transport.is_ok());
    }
}
