// All-pairs cosine similarity over a TF-IDF feature matrix.
//
// Rows coming out of the vectorizer are already unit length, so cosine
// similarity is the sparse dot product. Zero rows (documents with no terms)
// are divided through their norms anyway so hand-built matrices work too.

use serde::Serialize;

use super::tfidf::{FeatureMatrix, SparseVector};
use crate::error::AnalysisError;

/// Square, symmetric similarity matrix with an exact 1.0 diagonal and every
/// entry in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    pub fn size(&self) -> usize {
        self.size
    }

    /// Similarity between documents `i` and `j`.
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.size && j < self.size, "index out of range");
        self.values[i * self.size + j]
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }
}

/// Cosine similarity between two sparse vectors, clamped to [0, 1].
///
/// Returns 0.0 when either vector has zero length.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom < f64::EPSILON {
        0.0
    } else {
        (a.dot(b) / denom).clamp(0.0, 1.0)
    }
}

/// Compute the full pairwise similarity matrix.
///
/// Only the upper triangle is computed; the lower triangle is mirrored and
/// the diagonal is set to exactly 1.0.
pub fn compute_similarity_matrix(features: &FeatureMatrix) -> Result<SimilarityMatrix, AnalysisError> {
    if features.is_empty() {
        return Err(AnalysisError::SimilarityComputationFailed(
            "feature matrix has no rows".to_string(),
        ));
    }

    let n_features = features.n_features();
    if let Some(bad) = features
        .rows()
        .iter()
        .position(|row| row.max_index().is_some_and(|idx| idx >= n_features))
    {
        return Err(AnalysisError::SimilarityComputationFailed(format!(
            "row {bad} references a feature outside the {n_features}-term vocabulary"
        )));
    }

    let rows = features.rows();
    let size = rows.len();
    let mut values = vec![0.0; size * size];

    for i in 0..size {
        values[i * size + i] = 1.0;
        for j in (i + 1)..size {
            let sim = cosine(&rows[i], &rows[j]);
            values[i * size + j] = sim;
            values[j * size + i] = sim;
        }
    }

    Ok(SimilarityMatrix { size, values })
}
