use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::download;
use crate::expand::{DEFAULT_GENERALIZATION_DEPTH, DEFAULT_MAX_SENSES};
use crate::keywords::keybert::DEFAULT_NUM_KEYWORDS;
use crate::wordnet::WordNetGraph;

/// Which keyword extraction backend to use.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractorBackend {
    /// Sentence-embedding salience (default) — needs the embedding model downloaded
    Embedding,
    /// TF-IDF over the passage's sentences — no model download needed
    TfIdf,
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Embedding model identifier used for keyword extraction
    /// (TAPROOT_MODEL, default all-MiniLM-L6-v2). Changes keyword salience
    /// ranking and therefore the downstream candidates.
    pub model: String,
    /// Directory containing the ONNX model files (TAPROOT_MODEL_DIR)
    pub model_dir: PathBuf,
    /// Directory containing the WordNet dict files (TAPROOT_WORDNET_DIR)
    pub wordnet_dir: PathBuf,
    /// Which keyword extractor to use (TAPROOT_EXTRACTOR, default embedding)
    pub extractor_backend: ExtractorBackend,
    /// How many keywords to extract per passage (TAPROOT_NUM_KEYWORDS)
    pub num_keywords: usize,
    /// Sense lookups per keyword (TAPROOT_MAX_SENSES)
    pub max_senses_per_keyword: usize,
    /// Hypernym levels to walk per sense (TAPROOT_GENERALIZATION_DEPTH)
    pub generalization_depth: usize,
}

impl Config {
    /// Load configuration from environment variables. Everything has a
    /// default — an empty environment yields a working configuration once
    /// the models and WordNet files are in their default locations.
    pub fn load() -> Result<Self> {
        let extractor_backend = match env::var("TAPROOT_EXTRACTOR").as_deref() {
            Ok("tfidf") => ExtractorBackend::TfIdf,
            // "embedding" or unset both default to the embedding backend
            _ => ExtractorBackend::Embedding,
        };

        Ok(Self {
            model: env::var("TAPROOT_MODEL")
                .unwrap_or_else(|_| download::DEFAULT_EMBEDDING_MODEL.to_string()),
            model_dir: env::var("TAPROOT_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| download::default_model_dir()),
            wordnet_dir: env::var("TAPROOT_WORDNET_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| download::default_wordnet_dir()),
            extractor_backend,
            num_keywords: usize_var("TAPROOT_NUM_KEYWORDS", DEFAULT_NUM_KEYWORDS)?,
            max_senses_per_keyword: usize_var("TAPROOT_MAX_SENSES", DEFAULT_MAX_SENSES)?,
            generalization_depth: usize_var(
                "TAPROOT_GENERALIZATION_DEPTH",
                DEFAULT_GENERALIZATION_DEPTH,
            )?,
        })
    }

    /// Check that the WordNet database files are in place.
    pub fn require_wordnet(&self) -> Result<()> {
        if !WordNetGraph::files_present(&self.wordnet_dir) {
            anyhow::bail!(
                "WordNet database files not found in {}\n\
                 Download WNdb from https://wordnetcode.princeton.edu/3.0/WNdb-3.0.tar.gz,\n\
                 extract it, and point TAPROOT_WORDNET_DIR at the extracted dict/ directory.",
                self.wordnet_dir.display()
            );
        }
        Ok(())
    }

    /// Validate that the models the configured pipeline needs are present.
    /// The NLI model is always required; the embedding model only for the
    /// embedding extractor backend.
    pub fn require_models(&self) -> Result<()> {
        if !download::nli_files_present(&self.model_dir) {
            anyhow::bail!(
                "NLI model files not found in {}\n\
                 Run `taproot download-model` to download them.",
                download::nli_model_dir(&self.model_dir).display()
            );
        }
        if self.extractor_backend == ExtractorBackend::Embedding
            && !download::embedding_files_present(&self.model_dir, &self.model)
        {
            anyhow::bail!(
                "Embedding model files not found in {}\n\
                 Run `taproot download-model` to download them.\n\
                 Or set TAPROOT_EXTRACTOR=tfidf to extract keywords without a model.",
                download::embedding_model_dir(&self.model_dir, &self.model).display()
            );
        }
        Ok(())
    }
}

fn usize_var(name: &str, default: usize) -> Result<usize> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("{name} must be a non-negative integer, got {raw:?}")),
        Err(_) => Ok(default),
    }
}
