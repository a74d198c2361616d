//! Transport seam between the lifecycle controller and the network
//!
//! The controller only ever talks to the [`Transport`] trait; production
//! code uses the reqwest-backed [`HttpTransport`], tests inject a double
//! that replays canned responses. Retry, timeout and cancellation policy
//! belong to the transport, not to the core.

use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use crate::config::Config;
use crate::error::Error;

/// HTTP method subset used by the record lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

/// One request against the service, addressed relative to the configured
/// base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Resource path, e.g. `/contacts/12345`.
    pub path: String,
    /// XML request body, when the operation sends one.
    pub body: Option<String>,
    /// URL query parameters.
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }
}

/// Executes a single request and returns the parsed JSON response.
///
/// Implementations must not retry; every failure surfaces to the caller on
/// first occurrence.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<Value, Error>;
}

/// Production transport: reqwest with HTTP basic auth (username/token),
/// XML request bodies and JSON responses.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    username: String,
    token: String,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            token: config.token.clone(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, Error> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!("{:?} {}", request.method, url);

        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
        };

        builder = builder
            .basic_auth(&self.username, Some(&self.token))
            .header("Content-Type", "application/xml")
            .header("Accept", "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        Ok(response.json().await?)
    }
}
