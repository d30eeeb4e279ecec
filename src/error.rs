// Error kinds for the analysis pipeline.
//
// Two tiers: ExtractionError is per-file and never aborts a batch (the file
// is skipped and reported), AnalysisError aborts the whole request with no
// partial results. Application glue (config, CLI, server startup) uses
// anyhow instead.

use thiserror::Error;

/// Why a single uploaded file could not contribute text to the corpus.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    /// Extension is not one of pdf, docx, doc, txt (or the document parsers
    /// are compiled out).
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// The file parsed but contained no text after trimming.
    #[error("no text extracted")]
    Empty,

    /// The bytes could not be parsed as the declared format.
    #[error("malformed document: {0}")]
    Malformed(String),
}

/// Request-level failures. None of these are retried: every stage is a pure
/// function of its input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Upload at least {min} files (received {count})")]
    TooFewFiles { count: usize, min: usize },

    #[error("Maximum of {max} files allowed (received {count})")]
    TooManyFiles { count: usize, max: usize },

    #[error("Could not extract text from enough files ({usable} usable, at least 2 required)")]
    InsufficientDocuments { usable: usize },

    #[error("vectorization failed: {0}")]
    VectorizationFailed(String),

    #[error("similarity computation failed: {0}")]
    SimilarityComputationFailed(String),
}

impl AnalysisError {
    /// True for errors caused by the caller's input rather than by the
    /// computation itself. The HTTP layer maps these to 400, the rest to 500.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::TooFewFiles { .. }
                | AnalysisError::TooManyFiles { .. }
                | AnalysisError::InsufficientDocuments { .. }
        )
    }
}
