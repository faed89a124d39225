// Keyword extraction — ranked salient terms from free text.
//
// The KeywordExtractor trait defines the interface. EmbeddingKeywordExtractor
// is the default (sentence-embedding salience, local ONNX model);
// TfIdfKeywordExtractor is the fallback that needs no model download.

pub mod embedder;
pub mod keybert;
pub mod tfidf;
pub mod traits;

pub use keybert::EmbeddingKeywordExtractor;
pub use tfidf::TfIdfKeywordExtractor;
pub use traits::{KeywordExtractor, KeywordResult};
