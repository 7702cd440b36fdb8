//! Request and response types for the vector-search backend.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Upper bound for `doc_correlation`.
pub const MAX_DOC_CORRELATION: f64 = 0.95;

/// Valid range for `recall_number`.
pub const RECALL_NUMBER_RANGE: std::ops::RangeInclusive<u32> = 1..=50;

/// Upper bound for the mixed semantic/keyword percentage.
pub const MAX_MIXED_PERCENTAGE: u8 = 100;

#[derive(Debug, Error, PartialEq)]
pub enum SearchConfigError {
    #[error("doc_correlation must be between 0.0 and 0.95, got {0}")]
    DocCorrelation(f64),

    #[error("recall_number must be between 1 and 50, got {0}")]
    RecallNumber(u32),

    #[error("mixed_percentage must be between 0 and 100, got {0}")]
    MixedPercentage(u8),
}

/// How the backend weighs semantic against keyword retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalWeight {
    /// Blend of both; `percentage` is the semantic share.
    Mixed { percentage: u8 },
    Semantic,
    Keyword,
}

impl RetrievalWeight {
    /// Wire name of the strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            RetrievalWeight::Mixed { .. } => "Mixed",
            RetrievalWeight::Semantic => "Semantic",
            RetrievalWeight::Keyword => "Keyword",
        }
    }

    pub fn mixed_percentage(&self) -> Option<u8> {
        match self {
            RetrievalWeight::Mixed { percentage } => Some(*percentage),
            _ => None,
        }
    }
}

impl std::fmt::Display for RetrievalWeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.mixed_percentage() {
            Some(p) => write!(f, "{} ({}%)", self.as_str(), p),
            None => f.write_str(self.as_str()),
        }
    }
}

/// Tunable retrieval parameters sent to the configure endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    doc_correlation: f64,
    recall_number: u32,
    retrieval_weight: RetrievalWeight,
    rerank_enabled: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            doc_correlation: 0.85,
            recall_number: 10,
            retrieval_weight: RetrievalWeight::Mixed { percentage: 50 },
            rerank_enabled: false,
        }
    }
}

impl SearchConfig {
    /// Validates every field against its allowed range.
    pub fn new(
        doc_correlation: f64,
        recall_number: u32,
        retrieval_weight: RetrievalWeight,
        rerank_enabled: bool,
    ) -> Result<Self, SearchConfigError> {
        if !(0.0..=MAX_DOC_CORRELATION).contains(&doc_correlation) {
            return Err(SearchConfigError::DocCorrelation(doc_correlation));
        }
        if !RECALL_NUMBER_RANGE.contains(&recall_number) {
            return Err(SearchConfigError::RecallNumber(recall_number));
        }
        if let Some(p) = retrieval_weight.mixed_percentage() {
            if p > MAX_MIXED_PERCENTAGE {
                return Err(SearchConfigError::MixedPercentage(p));
            }
        }

        Ok(Self {
            doc_correlation,
            recall_number,
            retrieval_weight,
            rerank_enabled,
        })
    }

    pub fn doc_correlation(&self) -> f64 {
        self.doc_correlation
    }

    pub fn recall_number(&self) -> u32 {
        self.recall_number
    }

    pub fn retrieval_weight(&self) -> RetrievalWeight {
        self.retrieval_weight
    }

    pub fn rerank_enabled(&self) -> bool {
        self.rerank_enabled
    }

    /// Query parameters for the configure call. `mixed_percentage` is only
    /// present for the mixed strategy.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            (
                "doc_correlation".to_string(),
                self.doc_correlation.to_string(),
            ),
            ("recall_number".to_string(), self.recall_number.to_string()),
            (
                "retrieval_weight".to_string(),
                self.retrieval_weight.as_str().to_string(),
            ),
        ];
        if let Some(p) = self.retrieval_weight.mixed_percentage() {
            pairs.push(("mixed_percentage".to_string(), p.to_string()));
        }
        pairs.push((
            "rerank_enabled".to_string(),
            self.rerank_enabled.to_string(),
        ));
        pairs
    }
}

/// One ranked chunk returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    pub id: String,
    pub tokens: u64,
    pub content: String,
    pub correlation: f64,
    /// Scalars, booleans or lists of strings (e.g. `keywords`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Body of `/query/retrieve`. A missing or null `results` means no hits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResults {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<ResultItem>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ResultItem>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ResultItem>>::deserialize(deserializer)?.unwrap_or_default())
}

impl RetrievalResults {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
