// Embedding-based keyword extraction — the default backend.
//
// The approach: embed the whole passage and every candidate term with the
// same sentence model, then rank candidates by cosine similarity to the
// passage vector. Terms whose embedding sits closest to the document's
// meaning are its most salient keywords. One forward pass covers the
// document and all candidates.

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::Result;
use async_trait::async_trait;
use regex_lite::Regex;
use stop_words::{get, LANGUAGE};
use tracing::info;

use super::embedder::{cosine_similarity, SentenceEmbedder};
use super::traits::{KeywordExtractor, KeywordResult};

/// How many keywords to return when the caller doesn't override it.
pub const DEFAULT_NUM_KEYWORDS: usize = 5;

/// Word tokens: an ASCII letter followed by letters, apostrophes, or hyphens.
fn word_regex() -> &'static Regex {
    static WORD_RE: OnceLock<Regex> = OnceLock::new();
    WORD_RE.get_or_init(|| Regex::new(r"[a-z][a-z'-]*").expect("valid regex"))
}

/// Keyword extractor ranking candidate terms by embedding similarity to the
/// document. Needs the embedding model downloaded; TfIdfKeywordExtractor is
/// the no-download alternative.
pub struct EmbeddingKeywordExtractor {
    embedder: SentenceEmbedder,
    stop: HashSet<String>,
    /// How many top keywords to return
    pub num_keywords: usize,
}

impl EmbeddingKeywordExtractor {
    /// Load the extractor's embedding model from `model_dir`.
    pub fn load(model_dir: &Path, num_keywords: usize) -> Result<Self> {
        let embedder = SentenceEmbedder::load(model_dir)?;
        let stop: HashSet<String> = get(LANGUAGE::English).into_iter().collect();
        Ok(Self {
            embedder,
            stop,
            num_keywords,
        })
    }
}

#[async_trait]
impl KeywordExtractor for EmbeddingKeywordExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<KeywordResult>> {
        let candidates = candidate_terms(text, &self.stop);
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        // One batch: the document first, then every candidate term.
        let mut batch = Vec::with_capacity(candidates.len() + 1);
        batch.push(text.to_string());
        batch.extend(candidates.iter().cloned());

        let embeddings = self.embedder.embed_batch(&batch).await?;
        let document = &embeddings[0];

        let mut ranked: Vec<KeywordResult> = candidates
            .into_iter()
            .zip(&embeddings[1..])
            .map(|(term, emb)| KeywordResult {
                score: cosine_similarity(document, emb),
                term,
            })
            .collect();

        // Stable sort: equal scores keep first-occurrence order, so the
        // ranking is reproducible run to run.
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(self.num_keywords);

        if let Some(top) = ranked.first() {
            info!(
                keywords = ranked.len(),
                top_keyword = %top.term,
                top_score = top.score,
                "Extracted keywords"
            );
        }

        Ok(ranked)
    }
}

/// Candidate terms for ranking: lowercase word tokens of at least 3
/// characters, stop words removed, deduplicated keeping first occurrence.
fn candidate_terms(text: &str, stop: &HashSet<String>) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for m in word_regex().find_iter(&lower) {
        let term = m.as_str();
        if term.len() < 3 || stop.contains(term) {
            continue;
        }
        if seen.insert(term.to_string()) {
            out.push(term.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop_set() -> HashSet<String> {
        ["the", "and", "are", "of", "a", "is"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_candidates_lowercased_and_filtered() {
        let terms = candidate_terms("The Dinosaurs are ANIMALS", &stop_set());
        assert_eq!(terms, vec!["dinosaurs", "animals"]);
    }

    #[test]
    fn test_candidates_deduplicated_first_occurrence() {
        let terms = candidate_terms("bird watches bird", &stop_set());
        assert_eq!(terms, vec!["bird", "watches"]);
    }

    #[test]
    fn test_candidates_drop_short_tokens() {
        let terms = candidate_terms("an ox ate my big apple", &stop_set());
        assert_eq!(terms, vec!["ate", "big", "apple"]);
    }

    #[test]
    fn test_candidates_keep_hyphenated_words() {
        let terms = candidate_terms("cold-blooded animals", &stop_set());
        assert_eq!(terms, vec!["cold-blooded", "animals"]);
    }

    #[test]
    fn test_empty_text_yields_no_candidates() {
        assert!(candidate_terms("", &stop_set()).is_empty());
        assert!(candidate_terms("   \n\t", &stop_set()).is_empty());
    }

    #[test]
    fn test_punctuation_and_digits_ignored() {
        let terms = candidate_terms("404 errors!! (again)", &stop_set());
        assert_eq!(terms, vec!["errors", "again"]);
    }
}
