//! Plain-text rendering of search results.

use serde_json::{Map, Value};

use crate::api::{ResultItem, RetrievalResults};

/// Shown when a retrieval comes back empty.
pub const NO_RESULTS: &str = "No results found.";

const DIVIDER: &str = "----------------------------------------";

/// Renders one result card. `index` is 1-based.
pub fn format_result(index: usize, item: &ResultItem) -> String {
    let mut out = format!(
        "{:03} {} tokens\n\nChunk ID: {}\n\nContent: {}\n\nCorrelation: {}\n",
        index, item.tokens, item.id, item.content, item.correlation
    );

    if let Some(metadata) = &item.metadata {
        if !metadata.is_empty() {
            out.push('\n');
            out.push_str(&format_metadata(metadata));
            out.push('\n');
        }
    }

    out
}

/// Renders metadata as `key: value` tags joined by bullets.
pub fn format_metadata(metadata: &Map<String, Value>) -> String {
    metadata
        .iter()
        .map(|(key, value)| format!("{}: {}", key, format_value(value)))
        .collect::<Vec<_>>()
        .join(" • ")
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null => "null".to_string(),
        // Bools render lowercase, numbers as-is.
        other => other.to_string(),
    }
}

/// Renders every card separated by dividers, or [`NO_RESULTS`].
pub fn format_results(results: &RetrievalResults) -> String {
    if results.is_empty() {
        return format!("{}\n", NO_RESULTS);
    }

    results
        .results
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}{}\n", format_result(i + 1, item), DIVIDER))
        .collect::<Vec<_>>()
        .join("\n")
}
