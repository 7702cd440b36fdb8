use log::debug;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::types::{RetrievalResults, SearchConfig};
use crate::http::{
    ApiError, AttemptError, EndpointCall, HttpTransport, RetryPolicy, Transport, with_retry,
};

pub const SUBMIT_PATH: &str = "/query/submit";
pub const RETRIEVE_PATH: &str = "/query/retrieve";
pub const CONFIGURE_PATH: &str = "/vector-search/configure";
pub const SIMILARITY_PATH: &str = "/query/similarity";

/// Default `max_results` for [`VectorSearchClient::get_similar_queries`].
pub const DEFAULT_SIMILAR_RESULTS: usize = 5;

/// Client for the vector-search backend.
///
/// Holds no per-call state: each operation builds its own [`EndpointCall`]
/// and retries it under the configured [`RetryPolicy`]. Validation of
/// inputs is left to the caller, as is ordering submit before retrieve.
pub struct VectorSearchClient<T: Transport = HttpTransport> {
    transport: T,
    policy: RetryPolicy,
}

impl VectorSearchClient<HttpTransport> {
    /// Creates a client for the backend at `base_url`.
    pub fn new(base_url: &str, policy: RetryPolicy) -> Result<Self, ApiError> {
        Ok(Self::with_transport(HttpTransport::new(base_url)?, policy))
    }
}

impl<T: Transport> VectorSearchClient<T> {
    pub fn with_transport(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Sends `call` until it yields a body that decodes as `R`, or the policy
    /// runs out. Decode failures are retried like transport failures.
    pub async fn call<R: DeserializeOwned>(
        &self,
        operation_name: &str,
        call: &EndpointCall,
    ) -> Result<R, ApiError> {
        with_retry(&self.policy, operation_name, || async {
            let value = self.transport.send(call).await?;
            serde_json::from_value::<R>(value).map_err(AttemptError::from)
        })
        .await
    }

    /// Submits a query. An empty string is sent as-is.
    #[tracing::instrument(skip(self))]
    pub async fn submit_query(&self, query: &str) -> Result<Value, ApiError> {
        debug!("Submitting query ({} chars)", query.len());
        let call = EndpointCall::post(SUBMIT_PATH).with_body(json!({ "query": query }));
        self.call("Submitting query", &call).await
    }

    /// Fetches results for the most recently submitted query.
    #[tracing::instrument(skip(self))]
    pub async fn retrieve_results(&self) -> Result<RetrievalResults, ApiError> {
        let call = EndpointCall::post(RETRIEVE_PATH);
        let results: RetrievalResults = self.call("Retrieving results", &call).await?;
        debug!("Retrieved {} result(s)", results.results.len());
        Ok(results)
    }

    /// Pushes a search configuration to the backend as query parameters.
    #[tracing::instrument(skip(self))]
    pub async fn configure_search(&self, config: SearchConfig) -> Result<Value, ApiError> {
        let call = EndpointCall::post(CONFIGURE_PATH).with_query(config.to_query_pairs());
        self.call("Configuring vector search", &call).await
    }

    /// Asks the backend for queries similar to `query`.
    #[tracing::instrument(skip(self))]
    pub async fn get_similar_queries(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Value, ApiError> {
        let call = EndpointCall::post(SIMILARITY_PATH)
            .with_body(json!({ "query": query, "max_results": max_results }));
        self.call("Finding similar queries", &call).await
    }
}
