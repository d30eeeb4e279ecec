// Text extractor trait: swap-ready abstraction.
//
// The analysis pipeline only needs "bytes in, text out". Keeping that behind
// a trait lets tests feed canned text and lets a deployment plug in a
// different PDF backend without touching the scoring code.

use crate::error::ExtractionError;

/// Trait for turning an uploaded file into plain text.
pub trait TextExtractor: Send + Sync {
    /// Extract the text of `bytes`, using `filename` to pick the format.
    ///
    /// Implementations return `ExtractionError::Empty` rather than an empty
    /// string, so every `Ok` value has content.
    fn extract(&self, filename: &str, bytes: &[u8]) -> Result<String, ExtractionError>;
}
