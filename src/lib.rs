// Taproot: unsupervised topic labeling for free text.
//
// This is the library root. Each module corresponds to one stage of the
// topic inference pipeline, plus the ambient config/download/output plumbing.

pub mod config;
pub mod download;
pub mod expand;
pub mod finder;
pub mod keywords;
pub mod output;
pub mod wordnet;
pub mod zeroshot;
