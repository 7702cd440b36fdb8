//! Single-shot HTTP calls against the backend. Retrying lives one layer up.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Method};
use serde_json::Value;

use super::error::{ApiError, AttemptError};

/// One outbound request: method, path, optional JSON body and query parameters.
///
/// Built once per logical operation and replayed verbatim on every retry.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointCall {
    method: Method,
    path: String,
    body: Option<Value>,
    query: Vec<(String, String)>,
}

impl EndpointCall {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Attaches a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attaches query parameters, in order.
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }
}

/// Sends one [`EndpointCall`] and decodes the JSON reply. No retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, call: &EndpointCall) -> Result<Value, AttemptError>;
}

/// [`Transport`] backed by a reqwest client and a fixed base URL.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Builds a transport with a default reqwest client.
    #[tracing::instrument(skip(base_url))]
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("vector-console/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self::with_client(client, base_url))
    }

    /// Wraps an existing reqwest client.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, call: &EndpointCall) -> String {
        format!("{}{}", self.base_url, call.path())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[tracing::instrument(skip(self, call), fields(method = %call.method(), path = call.path()))]
    async fn send(&self, call: &EndpointCall) -> Result<Value, AttemptError> {
        let url = self.url_for(call);
        debug!("{} {} query={:?}", call.method(), url, call.query());

        let mut request = self.client.request(call.method().clone(), &url);
        if !call.query().is_empty() {
            request = request.query(call.query());
        }
        if let Some(body) = call.body() {
            request = request.json(body);
        }

        let response = request.send().await.map_err(AttemptError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttemptError::Status { status });
        }

        let bytes = response.bytes().await.map_err(AttemptError::Transport)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
