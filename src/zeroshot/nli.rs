// Local ONNX zero-shot scorer using a natural language inference model.
//
// Zero-shot classification framed as NLI: for each candidate label we build
// the hypothesis "This example is {label}." and ask the model how strongly
// the input text entails it. The entailment logits are softmaxed across the
// candidate set, so the scores form a distribution over the labels.
//
// Model: facebook/bart-large-mnli (quantized ONNX export).
// Output per pair: 3 logits in the order contradiction, neutral, entailment.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::debug;

use super::traits::{ClassificationResult, ZeroShotScorer};

/// Logit positions in the model output.
const NLI_LABEL_COUNT: usize = 3;
const ENTAILMENT_INDEX: usize = 2;

/// Hypothesis built for each candidate label.
const HYPOTHESIS_TEMPLATE: &str = "This example is {}.";

/// Local NLI-based zero-shot scorer. Holds the model session and tokenizer
/// behind Arc<Mutex> so inference can be offloaded to spawn_blocking without
/// blocking the async runtime.
pub struct OnnxNliScorer {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
}

impl OnnxNliScorer {
    /// Load the NLI model and tokenizer from the given directory.
    ///
    /// Expects `model_quantized.onnx` and `tokenizer.json` to exist in
    /// `model_dir`. Call `download::download_models()` first if they don't.
    pub fn load(model_dir: &Path) -> Result<Self> {
        let model_path = model_dir.join("model_quantized.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !model_path.exists() {
            anyhow::bail!(
                "NLI model not found: {}\nRun `taproot download-model` to download it.",
                model_path.display()
            );
        }
        if !tokenizer_path.exists() {
            anyhow::bail!(
                "NLI tokenizer not found: {}\nRun `taproot download-model` to download it.",
                tokenizer_path.display()
            );
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| format!("Failed to load NLI model from {}", model_path.display()))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load NLI tokenizer: {}", e))?;

        debug!("Loaded NLI model from {}", model_dir.display());

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
        })
    }
}

#[async_trait]
impl ZeroShotScorer for OnnxNliScorer {
    /// One premise/hypothesis pair per candidate label, one forward pass for
    /// the whole batch. CPU-bound work runs inside spawn_blocking.
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[String],
    ) -> Result<ClassificationResult> {
        if candidate_labels.is_empty() {
            anyhow::bail!("Cannot classify with no candidate labels");
        }

        let session = Arc::clone(&self.session);
        let tokenizer = Arc::clone(&self.tokenizer);
        let premise = text.to_string();
        let labels = candidate_labels.to_vec();

        tokio::task::spawn_blocking(move || {
            // Tokenize each (premise, hypothesis) pair
            let encodings: Vec<_> = labels
                .iter()
                .map(|label| {
                    let hypothesis = HYPOTHESIS_TEMPLATE.replace("{}", label);
                    tokenizer
                        .encode((premise.clone(), hypothesis), true)
                        .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))
                })
                .collect::<Result<Vec<_>>>()?;

            let batch_size = encodings.len();
            let max_len = encodings
                .iter()
                .map(|e| e.get_ids().len())
                .max()
                .unwrap_or(0);

            // Flat input tensors with right-padding to max_len.
            // Shape: [batch_size, max_len]
            let mut input_ids_flat: Vec<i64> = Vec::with_capacity(batch_size * max_len);
            let mut attention_mask_flat: Vec<i64> = Vec::with_capacity(batch_size * max_len);

            for enc in &encodings {
                let ids = enc.get_ids();
                let mask = enc.get_attention_mask();
                let seq_len = ids.len();

                for &id in ids {
                    input_ids_flat.push(id as i64);
                }
                for &m in mask {
                    attention_mask_flat.push(m as i64);
                }

                // Pad to max_len (pad_id = 1 for BART/RoBERTa)
                for _ in seq_len..max_len {
                    input_ids_flat.push(1);
                    attention_mask_flat.push(0);
                }
            }

            let shape = [batch_size as i64, max_len as i64];

            let input_ids_tensor = Tensor::from_array((shape, input_ids_flat))
                .context("Failed to create input_ids tensor")?;
            let attention_mask_tensor = Tensor::from_array((shape, attention_mask_flat))
                .context("Failed to create attention_mask tensor")?;

            let logits = {
                let mut session = session
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;

                let outputs = session
                    .run(ort::inputs! {
                        "input_ids" => input_ids_tensor,
                        "attention_mask" => attention_mask_tensor
                    })
                    .context("NLI inference failed")?;

                // Output shape: [batch_size, 3] — raw logits
                let (_out_shape, data) = outputs[0]
                    .try_extract_tensor::<f32>()
                    .context("Failed to extract NLI output tensor")?;

                data.to_vec()
            };

            // Entailment logit per label, softmaxed across the candidate set
            let entailment: Vec<f64> = (0..batch_size)
                .map(|i| logits[i * NLI_LABEL_COUNT + ENTAILMENT_INDEX] as f64)
                .collect();
            let scores = softmax(&entailment);

            // Sort labels descending by score. The sort is stable, so equal
            // scores keep the candidate set's order.
            let mut order: Vec<usize> = (0..batch_size).collect();
            order.sort_by(|&a, &b| {
                scores[b]
                    .partial_cmp(&scores[a])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            let result = ClassificationResult {
                labels: order.iter().map(|&i| labels[i].clone()).collect(),
                scores: order.iter().map(|&i| scores[i]).collect(),
            };

            debug!(
                candidates = batch_size,
                top_label = %result.labels[0],
                top_score = result.scores[0],
                text_preview = %crate::output::truncate_chars(&premise, 50),
                "Zero-shot classification"
            );

            Ok(result)
        })
        .await
        .context("spawn_blocking panicked")?
    }
}

/// Numerically stable softmax: shifts by the max before exponentiating.
fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.iter().map(|&e| e / sum).collect()
}
