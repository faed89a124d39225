// Model download helper for the ONNX models.
//
// Downloads two models from HuggingFace:
// 1. A sentence embedding model for keyword extraction (default
//    all-MiniLM-L6-v2, ~90MB) — configurable via TAPROOT_MODEL.
// 2. bart-large-mnli for zero-shot classification (quantized, ~390MB).
//
// Files are stored in a platform-appropriate directory
// (~/.local/share/taproot/models/ on Linux) so they persist across runs.
// The WordNet database is NOT downloaded here — Princeton ships it as a
// tarball the user extracts once; see the hint printed by the wordnet module.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

/// HuggingFace org hosting the sentence-transformers ONNX exports.
const EMBEDDING_HF_BASE: &str = "https://huggingface.co/sentence-transformers";

/// Default embedding model identifier.
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-MiniLM-L6-v2";

/// HuggingFace repo for the zero-shot NLI model.
const NLI_HF_URL: &str = "https://huggingface.co/Xenova/bart-large-mnli/resolve/main";

/// Directory name under the model dir for the NLI model.
const NLI_DIR_NAME: &str = "bart-large-mnli";

/// Returns the default directory for storing model files.
/// Uses the platform data directory: ~/.local/share/taproot/models/ on Linux.
pub fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taproot")
        .join("models")
}

/// Returns the default directory for the WordNet database files.
pub fn default_wordnet_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taproot")
        .join("wordnet")
}

/// Subdirectory within the model dir for the embedding model.
pub fn embedding_model_dir(base: &Path, model: &str) -> PathBuf {
    base.join(model)
}

/// Subdirectory within the model dir for the NLI model.
pub fn nli_model_dir(base: &Path) -> PathBuf {
    base.join(NLI_DIR_NAME)
}

/// Check whether the embedding model files exist.
pub fn embedding_files_present(base: &Path, model: &str) -> bool {
    let dir = embedding_model_dir(base, model);
    dir.join("model.onnx").exists() && dir.join("tokenizer.json").exists()
}

/// Check whether the NLI model files exist.
pub fn nli_files_present(base: &Path) -> bool {
    let dir = nli_model_dir(base);
    dir.join("model_quantized.onnx").exists() && dir.join("tokenizer.json").exists()
}

/// Download both ONNX models (embedding + NLI).
///
/// Shows progress bars for large files. Skips files that already exist.
/// Creates directories as needed.
pub async fn download_models(base: &Path, model: &str) -> Result<()> {
    // --- Sentence embedding model ---
    println!("\nSentence embedding model ({model}):");

    let embed_dir = embedding_model_dir(base, model);
    std::fs::create_dir_all(&embed_dir)
        .with_context(|| format!("Failed to create model directory: {}", embed_dir.display()))?;
    let embed_url = format!("{EMBEDDING_HF_BASE}/{model}/resolve/main");

    fetch_if_missing(
        &format!("{embed_url}/tokenizer.json"),
        &embed_dir.join("tokenizer.json"),
        false,
    )
    .await?;
    fetch_if_missing(
        &format!("{embed_url}/onnx/model.onnx"),
        &embed_dir.join("model.onnx"),
        true,
    )
    .await?;

    // --- Zero-shot NLI model ---
    println!("\nZero-shot NLI model ({NLI_DIR_NAME}):");

    let nli_dir = nli_model_dir(base);
    std::fs::create_dir_all(&nli_dir)
        .with_context(|| format!("Failed to create model directory: {}", nli_dir.display()))?;

    fetch_if_missing(
        &format!("{NLI_HF_URL}/tokenizer.json"),
        &nli_dir.join("tokenizer.json"),
        false,
    )
    .await?;
    fetch_if_missing(
        &format!("{NLI_HF_URL}/onnx/model_quantized.onnx"),
        &nli_dir.join("model_quantized.onnx"),
        true,
    )
    .await?;

    Ok(())
}

/// Download `url` to `dest` unless the file is already there.
async fn fetch_if_missing(url: &str, dest: &Path, show_progress: bool) -> Result<()> {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if dest.exists() {
        info!("{} already exists, skipping", dest.display());
        println!("  {name} (already exists)");
        return Ok(());
    }

    println!("  Downloading {name}...");
    download_file(url, dest, show_progress).await
}

/// Download a single file from a URL to a local path.
/// If `show_progress` is true, display a progress bar.
async fn download_file(url: &str, dest: &Path, show_progress: bool) -> Result<()> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to download {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Download failed with status {}: {}", response.status(), url);
    }

    let total_size = response.content_length();

    let pb = if show_progress {
        let pb = if let Some(size) = total_size {
            let pb = ProgressBar::new(size);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("    [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                    .expect("valid template")
                    .progress_chars("=> "),
            );
            pb
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("    {spinner} {bytes}")
                    .expect("valid template"),
            );
            pb
        };
        Some(pb)
    } else {
        None
    };

    let bytes = response
        .bytes()
        .await
        .context("Failed to read response body")?;

    if let Some(ref pb) = pb {
        pb.set_position(bytes.len() as u64);
    }

    std::fs::write(dest, &bytes).with_context(|| format!("Failed to write {}", dest.display()))?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    info!("Downloaded {} to {}", url, dest.display());
    Ok(())
}
