//! HTTP transport: one request in, the full response body out.
//!
//! No timeout, retry or rate limiting is applied. A non-2xx status is
//! logged but the body is still returned to the caller.

use super::error::FetchError;
use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Header table. Each name maps to a list of values; only the first one is sent.
pub type Headers = BTreeMap<String, Vec<String>>;

/// A single outgoing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
}

impl Request {
    /// Plain GET without headers or body
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    /// Form POST carrying an already-encoded body
    pub fn form(url: impl Into<String>, headers: &Headers, body: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            headers: headers.clone(),
            body: Some(body.into()),
        }
    }

    /// Collapse the header table to one value per name
    pub fn header_map(&self) -> Result<HeaderMap, FetchError> {
        let mut map = HeaderMap::new();

        for (name, values) in &self.headers {
            let Some(value) = values.first() else {
                continue;
            };

            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| FetchError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| FetchError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;

            map.insert(header_name, header_value);
        }

        Ok(map)
    }
}

/// Anything that can execute a [`Request`] and hand back the body bytes
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &Request) -> Result<Bytes, FetchError>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the client's default settings
    pub fn new(user_agent: Option<&str>) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(agent) = user_agent {
            builder = builder.user_agent(agent.to_string());
        }

        let client = builder
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &Request) -> Result<Bytes, FetchError> {
        let headers = request.header_map()?;

        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        debug!(method = %request.method, url = %request.url, body = ?request.body, "Sending request");

        let response = builder.send().await.map_err(|e| FetchError::Transport {
            url: request.url.clone(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %request.url, status = %status, "Non-success status, reading body anyway");
        }

        let body = response.bytes().await.map_err(|e| FetchError::Transport {
            url: request.url.clone(),
            source: e,
        })?;

        debug!(url = %request.url, bytes = body.len(), "Response received");

        Ok(body)
    }
}
