// TF-IDF keyword extraction — the no-model-download fallback backend.
//
// Uses the `keyword_extraction` crate over the passage's sentences. Each
// sentence is treated as a separate document for IDF computation, so words
// that appear in every sentence get downweighted while distinctive words
// get boosted.

use anyhow::Result;
use async_trait::async_trait;
use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};
use stop_words::{get, LANGUAGE};
use tracing::info;

use super::keybert::DEFAULT_NUM_KEYWORDS;
use super::traits::{KeywordExtractor, KeywordResult};

/// TF-IDF based keyword extractor. Zero model downloads, runs instantly;
/// ranking quality is below the embedding backend's.
pub struct TfIdfKeywordExtractor {
    /// How many top keywords to return
    pub num_keywords: usize,
}

impl Default for TfIdfKeywordExtractor {
    fn default() -> Self {
        Self {
            num_keywords: DEFAULT_NUM_KEYWORDS,
        }
    }
}

#[async_trait]
impl KeywordExtractor for TfIdfKeywordExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<KeywordResult>> {
        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return Ok(Vec::new());
        }

        let stop_words: Vec<String> = get(LANGUAGE::English);

        // The library handles tokenization, stop word removal, and scoring.
        let params = TfIdfParams::UnprocessedDocuments(&sentences, &stop_words, None);
        let tfidf = TfIdf::new(params);
        let ranked: Vec<(String, f32)> = tfidf.get_ranked_word_scores(self.num_keywords);

        if let Some((top_term, top_score)) = ranked.first() {
            info!(
                keywords = ranked.len(),
                top_keyword = %top_term,
                top_score = top_score,
                "Extracted TF-IDF keywords"
            );
        }

        Ok(ranked
            .into_iter()
            .map(|(term, score)| KeywordResult {
                term,
                score: score as f64,
            })
            .collect())
    }
}

/// Split a passage into sentence-sized documents for IDF computation.
fn split_sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
