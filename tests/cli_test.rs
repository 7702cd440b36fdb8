use assert_cmd::Command;
use assert_cmd::cargo;
use mockito::{Matcher, Server};
use predicates::prelude::*;

fn console(url: &str) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("vector-console"));
    cmd.env("VECTOR_CONSOLE_URL", url)
        .env("VECTOR_CONSOLE_MAX_RETRIES", "3")
        .env("VECTOR_CONSOLE_RETRY_DELAY_MS", "10");
    cmd
}

#[test]
fn test_search_end_to_end() {
    let mut server = Server::new();

    let submit = server
        .mock("POST", "/query/submit")
        .match_body(Matcher::Json(serde_json::json!({"query": "what is a lifetime?"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "submitted"}"#)
        .expect(1)
        .create();

    let retrieve = server
        .mock("POST", "/query/retrieve")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "results": [
                    {
                        "id": "chunk-1",
                        "tokens": 64,
                        "content": "A lifetime is a region of code.",
                        "correlation": 0.92,
                        "metadata": {"keywords": ["lifetime", "borrow"], "verified": true}
                    },
                    {
                        "id": "chunk-2",
                        "tokens": 12,
                        "content": "References must not outlive their referent.",
                        "correlation": 0.81
                    }
                ]
            }"#,
        )
        .expect(1)
        .create();

    console(&server.url())
        .args(["search", "what is a lifetime?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("001 64 tokens"))
        .stdout(predicate::str::contains("Chunk ID: chunk-1"))
        .stdout(predicate::str::contains("keywords: lifetime, borrow • verified: true"))
        .stdout(predicate::str::contains("002 12 tokens"));

    submit.assert();
    retrieve.assert();
}

#[test]
fn test_search_empty_results() {
    let mut server = Server::new();
    let _submit = server
        .mock("POST", "/query/submit")
        .with_status(200)
        .with_body("{}")
        .create();
    let _retrieve = server
        .mock("POST", "/query/retrieve")
        .with_status(200)
        .with_body(r#"{"results": []}"#)
        .create();

    console(&server.url())
        .args(["search", "unknown topic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found."));
}

#[test]
fn test_search_rejects_empty_query_without_calling_backend() {
    let mut server = Server::new();
    let submit = server
        .mock("POST", "/query/submit")
        .expect(0)
        .create();

    console(&server.url())
        .args(["search", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Query must not be empty"));

    submit.assert();
}

#[test]
fn test_backend_down_exhausts_retries() {
    let mut server = Server::new();
    let submit = server
        .mock("POST", "/query/submit")
        .with_status(503)
        .expect(3)
        .create();
    let retrieve = server
        .mock("POST", "/query/retrieve")
        .expect(0)
        .create();

    console(&server.url())
        .args(["search", "anyone there?"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to submit query"))
        .stderr(predicate::str::contains("after 3 attempts"));

    submit.assert();
    retrieve.assert();
}

#[test]
fn test_unreachable_backend_fails() {
    console("http://127.0.0.1:1")
        .args(["--max-retries", "2", "similar", "rust"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("after 2 attempts"));
}

#[test]
fn test_configure_mixed_sends_percentage() {
    let mut server = Server::new();
    let configure = server
        .mock("POST", "/vector-search/configure")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("doc_correlation".into(), "0.6".into()),
            Matcher::UrlEncoded("recall_number".into(), "25".into()),
            Matcher::UrlEncoded("retrieval_weight".into(), "Mixed".into()),
            Matcher::UrlEncoded("mixed_percentage".into(), "40".into()),
            Matcher::UrlEncoded("rerank_enabled".into(), "true".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"status": "ok"}"#)
        .expect(1)
        .create();

    console(&server.url())
        .args([
            "configure",
            "--doc-correlation",
            "0.6",
            "--recall-number",
            "25",
            "--mixed-percentage",
            "40",
            "--rerank",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration updated successfully!"));

    configure.assert();
}

#[test]
fn test_configure_semantic_omits_percentage() {
    let mut server = Server::new();
    let configure = server
        .mock("POST", "/vector-search/configure")
        .match_query(Matcher::Exact(
            "doc_correlation=0.85&recall_number=10&retrieval_weight=Semantic&rerank_enabled=false"
                .into(),
        ))
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create();

    console(&server.url())
        .args(["configure", "--retrieval-weight", "semantic"])
        .assert()
        .success();

    configure.assert();
}

#[test]
fn test_configure_rejects_invalid_correlation() {
    console("http://127.0.0.1:1")
        .args(["configure", "--doc-correlation", "0.99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("doc_correlation"));
}

#[test]
fn test_similar_prints_backend_reply() {
    let mut server = Server::new();
    let similar = server
        .mock("POST", "/query/similarity")
        .match_body(Matcher::Json(
            serde_json::json!({"query": "async rust", "max_results": 3}),
        ))
        .with_status(200)
        .with_body(r#"["async rust book", "tokio tutorial"]"#)
        .expect(1)
        .create();

    console(&server.url())
        .args(["similar", "async rust", "--max-results", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tokio tutorial"));

    similar.assert();
}
