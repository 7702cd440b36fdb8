use anyhow::{Context, Result, bail};
use log::debug;
use std::io::Write;

use crate::api::{RetrievalResults, VectorSearchClient};
use crate::http::Transport;
use crate::render::format_results;

/// Submits `query`, then retrieves and prints the ranked chunks.
///
/// Retrieval is skipped when the submit step fails.
#[tracing::instrument(skip(client, out))]
pub async fn search<T: Transport, W: Write>(
    client: &VectorSearchClient<T>,
    query: &str,
    out: &mut W,
) -> Result<RetrievalResults> {
    if query.trim().is_empty() {
        bail!("Query must not be empty");
    }

    let ack = client
        .submit_query(query)
        .await
        .context("Failed to submit query")?;
    debug!("Submit acknowledged: {}", ack);

    let results = client
        .retrieve_results()
        .await
        .context("Failed to retrieve results")?;

    write!(out, "{}", format_results(&results)).context("Failed to write results")?;
    Ok(results)
}
