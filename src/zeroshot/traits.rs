// Zero-shot scorer trait — swap-ready abstraction.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The result of classifying text against a set of candidate labels.
///
/// `labels` and `scores` are parallel vectors sorted descending by score;
/// every candidate label appears exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

/// Trait for scoring candidate labels against a passage of text without
/// label-specific training.
#[async_trait]
pub trait ZeroShotScorer: Send + Sync {
    /// Rank `candidate_labels` by relevance to `text`, best first.
    ///
    /// An empty candidate slice is an error — there is nothing meaningful to
    /// rank, and callers are expected to catch the condition before it gets
    /// here.
    async fn classify(&self, text: &str, candidate_labels: &[String])
        -> Result<ClassificationResult>;
}
