// Analysis pipeline: the orchestration shared by the HTTP handler and the
// `compare` CLI command.
//
//   uploads -> validate count -> extract text per file -> corpus
//           -> TF-IDF -> similarity matrix -> ranked pairs
//
// Everything here is stateless: each call builds its corpus and matrix from
// scratch and drops them when it returns. Per-file extraction failures are
// recorded and skipped; every other failure aborts the analysis.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::AnalysisError;
use crate::extract::traits::TextExtractor;
use crate::similarity::{
    compute_similarity_matrix, rank_pairs, SimilarPair, TfIdfVectorizer, DEFAULT_THRESHOLD_PCT,
};

/// A file as received from the caller.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A file that produced usable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub filename: String,
    /// Non-empty, trimmed text
    pub text: String,
}

/// A file dropped from the corpus, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub filename: String,
    pub reason: String,
}

/// Result of running the extractor over a batch of uploads.
#[derive(Debug, Clone, Default)]
pub struct CorpusExtraction {
    /// Usable documents, in upload order
    pub documents: Vec<Document>,
    pub skipped: Vec<SkippedFile>,
}

/// Ranked similarity report for one corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityReport {
    /// Number of documents that took part in the comparison
    pub total_files: usize,
    /// Number of reported pairs (those at or above the threshold)
    pub comparisons: usize,
    pub results: Vec<SimilarPair>,
}

/// Everything `Analyzer::analyze` learned about a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    #[serde(flatten)]
    pub report: SimilarityReport,
    /// Files received before extraction
    pub files_received: usize,
    pub skipped: Vec<SkippedFile>,
}

/// Bounds on the number of files accepted per analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisLimits {
    pub min_files: usize,
    pub max_files: usize,
}

impl Default for AnalysisLimits {
    fn default() -> Self {
        Self {
            min_files: 2,
            max_files: 100,
        }
    }
}

/// Run the extractor over every upload, keeping order.
///
/// Failures never abort the batch: each one is logged and recorded in
/// `skipped`.
pub fn extract_corpus(extractor: &dyn TextExtractor, files: &[UploadedFile]) -> CorpusExtraction {
    let mut corpus = CorpusExtraction::default();

    for file in files {
        match extractor.extract(&file.filename, &file.bytes) {
            Ok(text) => {
                info!(file = %file.filename, chars = text.len(), "Extracted text");
                corpus.documents.push(Document {
                    filename: file.filename.clone(),
                    text,
                });
            }
            Err(e) => {
                warn!(file = %file.filename, error = %e, "Skipping file");
                corpus.skipped.push(SkippedFile {
                    filename: file.filename.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    corpus
}

/// Score every pair of documents and report those at or above
/// `threshold_pct` (a percentage, e.g. 40.0).
pub fn compute_similarity_report(
    corpus: &[Document],
    threshold_pct: f64,
) -> Result<SimilarityReport, AnalysisError> {
    report_with(&TfIdfVectorizer::default(), corpus, threshold_pct)
}

fn report_with(
    vectorizer: &TfIdfVectorizer,
    corpus: &[Document],
    threshold_pct: f64,
) -> Result<SimilarityReport, AnalysisError> {
    if corpus.len() < 2 {
        return Err(AnalysisError::InsufficientDocuments {
            usable: corpus.len(),
        });
    }

    let texts: Vec<&str> = corpus.iter().map(|d| d.text.as_str()).collect();
    let filenames: Vec<String> = corpus.iter().map(|d| d.filename.clone()).collect();

    let features = vectorizer.fit_transform(&texts)?;
    let matrix = compute_similarity_matrix(&features)?;
    let results = rank_pairs(&matrix, &filenames, threshold_pct);

    Ok(SimilarityReport {
        total_files: corpus.len(),
        comparisons: results.len(),
        results,
    })
}

/// Stateless analysis service: upload limits, threshold and vectorizer
/// settings, applied to one batch at a time.
#[derive(Debug, Clone)]
pub struct Analyzer {
    pub limits: AnalysisLimits,
    pub threshold_pct: f64,
    pub vectorizer: TfIdfVectorizer,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            limits: AnalysisLimits::default(),
            threshold_pct: DEFAULT_THRESHOLD_PCT,
            vectorizer: TfIdfVectorizer::default(),
        }
    }
}

impl Analyzer {
    pub fn new(limits: AnalysisLimits, threshold_pct: f64) -> Self {
        Self {
            limits,
            threshold_pct,
            ..Self::default()
        }
    }

    /// Check the upload count against the limits. Runs before any
    /// extraction so oversized batches cost nothing.
    pub fn validate_count(&self, count: usize) -> Result<(), AnalysisError> {
        if count < self.limits.min_files {
            return Err(AnalysisError::TooFewFiles {
                count,
                min: self.limits.min_files,
            });
        }
        if count > self.limits.max_files {
            return Err(AnalysisError::TooManyFiles {
                count,
                max: self.limits.max_files,
            });
        }
        Ok(())
    }

    /// Full pipeline for one batch of uploads.
    pub fn analyze(
        &self,
        extractor: &dyn TextExtractor,
        files: &[UploadedFile],
    ) -> Result<AnalysisOutcome, AnalysisError> {
        self.validate_count(files.len())?;

        info!(files = files.len(), "Processing uploaded files");
        let corpus = extract_corpus(extractor, files);
        info!(
            usable = corpus.documents.len(),
            skipped = corpus.skipped.len(),
            "Text extraction finished"
        );

        let report = report_with(&self.vectorizer, &corpus.documents, self.threshold_pct)?;
        info!(
            pairs = report.comparisons,
            threshold = self.threshold_pct,
            "Analysis complete"
        );

        Ok(AnalysisOutcome {
            report,
            files_received: files.len(),
            skipped: corpus.skipped,
        })
    }
}
