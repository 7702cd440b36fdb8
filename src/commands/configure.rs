use anyhow::{Context, Result};
use std::io::Write;

use crate::api::{SearchConfig, VectorSearchClient};
use crate::http::Transport;

/// Applies `config` on the backend and prints a summary.
#[tracing::instrument(skip(client, out))]
pub async fn configure<T: Transport, W: Write>(
    client: &VectorSearchClient<T>,
    config: SearchConfig,
    out: &mut W,
) -> Result<()> {
    client
        .configure_search(config)
        .await
        .context("Failed to apply configuration")?;

    writeln!(out, "Configuration updated successfully!")?;
    writeln!(out, "  doc_correlation:  {}", config.doc_correlation())?;
    writeln!(out, "  recall_number:    {}", config.recall_number())?;
    writeln!(out, "  retrieval_weight: {}", config.retrieval_weight())?;
    writeln!(
        out,
        "  rerank:           {}",
        if config.rerank_enabled() { "enabled" } else { "disabled" }
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CONFIGURE_PATH, RetrievalWeight};
    use crate::http::{AttemptError, MockTransport, RetryPolicy};
    use reqwest::StatusCode;
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn test_configure_prints_summary() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|call| call.path() == CONFIGURE_PATH)
            .times(1)
            .returning(|_| Ok(json!({"status": "configured"})));

        let client = VectorSearchClient::with_transport(
            transport,
            RetryPolicy::new(3, Duration::from_millis(1)),
        );
        let config =
            SearchConfig::new(0.7, 20, RetrievalWeight::Mixed { percentage: 30 }, true).unwrap();
        let mut out = Vec::new();
        configure(&client, config, &mut out).await.unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("Configuration updated successfully!"));
        assert!(printed.contains("Mixed (30%)"));
        assert!(printed.contains("enabled"));
    }

    #[tokio::test]
    async fn test_configure_failure_prints_nothing() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(2).returning(|_| {
            Err(AttemptError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
            })
        });

        let client = VectorSearchClient::with_transport(
            transport,
            RetryPolicy::new(2, Duration::from_millis(1)),
        );
        let mut out = Vec::new();
        let err = configure(&client, SearchConfig::default(), &mut out)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Failed to apply configuration"));
        assert!(out.is_empty());
    }
}
