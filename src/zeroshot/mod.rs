// Zero-shot classification — scoring candidate labels against text.
//
// The ZeroShotScorer trait defines the interface; OnnxNliScorer implements
// it with a local NLI model. Another provider (say, a hosted inference API)
// could slot in without touching the rest of the pipeline.

pub mod nli;
pub mod traits;

pub use nli::OnnxNliScorer;
pub use traits::{ClassificationResult, ZeroShotScorer};
