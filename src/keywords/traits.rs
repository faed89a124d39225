// Keyword extractor trait — swap-ready abstraction.
//
// Lets the extraction backend change (embedding-based vs TF-IDF) without
// touching the rest of the pipeline. The trait is async because the default
// backend runs model inference through spawn_blocking.

use anyhow::Result;
use async_trait::async_trait;

/// One extracted keyword with its salience score.
#[derive(Debug, Clone)]
pub struct KeywordResult {
    /// Lowercase surface form as emitted by the extraction backend.
    pub term: String,
    /// Backend-specific salience score; higher is more salient.
    pub score: f64,
}

/// Trait for extracting ranked keywords from a passage of text.
#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    /// Extract keywords, most salient first. Empty or unrecognizable text
    /// yields an empty vector, not an error.
    async fn extract(&self, text: &str) -> Result<Vec<KeywordResult>>;
}
