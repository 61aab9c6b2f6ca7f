//! Request clients used to execute control file steps

use crate::config::HarnessConfig;
use crate::error::TransportError;
use reqwest::blocking::Client;
use reqwest::{header, Method};
use serde_json::Value;
use std::time::Duration;
use tracing::trace;

/// Raw result of sending one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Body as text, replacing invalid UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends a step's request and returns the undecoded response.
///
/// Calls are blocking and made strictly one after another.
pub trait RequestClient {
    fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<&Value>,
    ) -> Result<RawResponse, TransportError>;
}

impl<C: RequestClient + ?Sized> RequestClient for &C {
    fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<&Value>,
    ) -> Result<RawResponse, TransportError> {
        (**self).send(method, path, body)
    }
}

/// Blocking HTTP client against a single base URL
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &HarnessConfig) -> Result<Self, TransportError> {
        Self::new(&config.base_url, config.token.clone(), config.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a request target
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl RequestClient for HttpClient {
    fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<&Value>,
    ) -> Result<RawResponse, TransportError> {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| TransportError::InvalidMethod(method.to_string()))?;
        let url = self.url(path);
        trace!("{} {}", method, url);

        let mut request = self.client.request(method, &url);

        if let Some(ref token) = self.token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();

        Ok(RawResponse { status, body })
    }
}
