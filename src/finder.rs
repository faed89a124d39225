// Topic finder — the end-to-end pipeline orchestrator.
//
// Sequences the three stages: keyword extraction, hypernym expansion, and
// zero-shot scoring. The model collaborators come in as injected trait
// objects, so the orchestrator can be driven by mock implementations in
// tests. Stages run strictly in order; each one's output feeds the next.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::expand::TopicExpander;
use crate::keywords::KeywordExtractor;
use crate::zeroshot::ZeroShotScorer;

/// The candidate label set came out empty — no keyword had a usable
/// generalization. Callers should treat this as "topic undetermined", not a
/// crash; it is downcastable from the anyhow error `find_topic` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoTopicCandidates;

impl fmt::Display for NoTopicCandidates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no topic candidates found")
    }
}

impl std::error::Error for NoTopicCandidates {}

/// Everything the pipeline produced along the way, for `--json` output and
/// for asserting on intermediate stages in tests.
#[derive(Debug, Clone, Serialize)]
pub struct TopicTrace {
    /// Extracted keywords, most salient first
    pub keywords: Vec<String>,
    /// Candidate labels fed to the classifier, in lexical order
    pub candidates: Vec<String>,
    /// Full classifier ranking, best first
    pub labels: Vec<String>,
    /// Scores parallel to `labels`
    pub scores: Vec<f64>,
    /// Final formatted topic labels
    pub topics: Vec<String>,
}

impl TopicTrace {
    fn empty() -> Self {
        Self {
            keywords: Vec::new(),
            candidates: Vec::new(),
            labels: Vec::new(),
            scores: Vec::new(),
            topics: Vec::new(),
        }
    }
}

/// Infers topic labels for a passage of text.
pub struct TopicFinder {
    extractor: Arc<dyn KeywordExtractor>,
    expander: TopicExpander,
    scorer: Arc<dyn ZeroShotScorer>,
}

impl TopicFinder {
    pub fn new(
        extractor: Arc<dyn KeywordExtractor>,
        expander: TopicExpander,
        scorer: Arc<dyn ZeroShotScorer>,
    ) -> Self {
        Self {
            extractor,
            expander,
            scorer,
        }
    }

    /// Infer up to `n_topic` topic labels for `text`, best first.
    ///
    /// Labels are display-formatted: underscores become spaces and each word
    /// is title-cased. `n_topic = 0` returns an empty vector without running
    /// any stage. Fewer labels than requested is not an error — the caller
    /// gets whatever the candidate set supported.
    pub async fn find_topic(&self, text: &str, n_topic: usize) -> Result<Vec<String>> {
        Ok(self.trace(text, n_topic).await?.topics)
    }

    /// Run the pipeline and return every intermediate stage alongside the
    /// final labels.
    pub async fn trace(&self, text: &str, n_topic: usize) -> Result<TopicTrace> {
        if n_topic == 0 {
            return Ok(TopicTrace::empty());
        }

        let keywords: Vec<String> = self
            .extractor
            .extract(text)
            .await?
            .into_iter()
            .map(|kw| kw.term)
            .collect();

        let candidates: Vec<String> = self.expander.expand(&keywords).into_iter().collect();
        if candidates.is_empty() {
            return Err(NoTopicCandidates.into());
        }

        let prediction = self.scorer.classify(text, &candidates).await?;

        let topics: Vec<String> = prediction
            .labels
            .iter()
            .take(n_topic.min(prediction.labels.len()))
            .map(|label| format_topic_label(label))
            .collect();

        info!(
            keywords = keywords.len(),
            candidates = candidates.len(),
            topics = ?topics,
            "Inferred topics"
        );

        Ok(TopicTrace {
            keywords,
            candidates,
            labels: prediction.labels,
            scores: prediction.scores,
            topics,
        })
    }
}

/// Format a raw label for display: underscores to spaces, then title case.
pub fn format_topic_label(raw: &str) -> String {
    title_case(&raw.replace('_', " "))
}

/// Title-case a string: every alphabetic character that follows a
/// non-alphabetic character is uppercased, the rest are lowercased.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alphabetic = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alphabetic {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(ch);
            prev_alphabetic = false;
        }
    }
    out
}
