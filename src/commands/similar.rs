use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::io::Write;

use crate::api::VectorSearchClient;
use crate::http::Transport;

/// Prints queries the backend considers similar to `query`, as pretty JSON.
#[tracing::instrument(skip(client, out))]
pub async fn similar<T: Transport, W: Write>(
    client: &VectorSearchClient<T>,
    query: &str,
    max_results: usize,
    out: &mut W,
) -> Result<Value> {
    if query.trim().is_empty() {
        bail!("Query must not be empty");
    }

    let queries = client
        .get_similar_queries(query, max_results)
        .await
        .context("Failed to fetch similar queries")?;

    writeln!(out, "{}", serde_json::to_string_pretty(&queries)?)?;
    Ok(queries)
}
