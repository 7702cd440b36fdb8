//! Vector-search backend operations on top of the retrying HTTP layer.

mod client;
pub mod types;

pub use client::{
    CONFIGURE_PATH, DEFAULT_SIMILAR_RESULTS, RETRIEVE_PATH, SIMILARITY_PATH, SUBMIT_PATH,
    VectorSearchClient,
};
pub use types::{ResultItem, RetrievalResults, RetrievalWeight, SearchConfig, SearchConfigError};
