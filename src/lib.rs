// Tracer: near-duplicate and plagiarism detection for document batches.
//
// This is the library root. Each module corresponds to one stage of the
// analysis pipeline, plus the HTTP surface behind the `web` feature.

pub mod analysis;
pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod similarity;

#[cfg(feature = "web")]
pub mod web;
