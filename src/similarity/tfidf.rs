// TF-IDF vectorizer over unigrams and bigrams.
//
// Every document in the corpus becomes a sparse vector over the vocabulary
// induced by the whole corpus. Weights are raw term counts scaled by the
// smoothed inverse document frequency
//
//   idf(t) = ln((1 + N) / (1 + df(t))) + 1
//
// and each row is L2-normalized, so cosine similarity between two rows is
// just their dot product.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use super::tokenize::{ngrams, tokenize};
use crate::error::AnalysisError;

/// Sparse real-valued vector stored as (feature index, weight) pairs sorted
/// by index. Zero weights are never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from unsorted entries. Zero weights are dropped and duplicate
    /// indices are summed.
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|(idx, _)| *idx);
        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (idx, weight) in entries {
            match merged.last_mut() {
                Some((last, acc)) if *last == idx => *acc += weight,
                _ => merged.push((idx, weight)),
            }
        }
        merged.retain(|(_, w)| *w != 0.0);
        Self { entries: merged }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest feature index present, if any.
    pub fn max_index(&self) -> Option<usize> {
        self.entries.last().map(|(idx, _)| *idx)
    }

    /// Euclidean length.
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product by merging the two sorted index lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Scale to unit length in place. Zero vectors stay zero.
    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// One row per document over a shared vocabulary.
#[derive(Debug, Clone, Default)]
pub struct FeatureMatrix {
    vocabulary: Vec<String>,
    rows: Vec<SparseVector>,
}

impl FeatureMatrix {
    /// Assemble a matrix from parts. Used by the vectorizer and by callers
    /// that want to score hand-built vectors.
    pub fn new(vocabulary: Vec<String>, rows: Vec<SparseVector>) -> Self {
        Self { vocabulary, rows }
    }

    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    /// Feature strings in index order.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a feature string, e.g. `"cat sat"`.
    pub fn feature_index(&self, feature: &str) -> Option<usize> {
        self.vocabulary
            .binary_search_by(|probe| probe.as_str().cmp(feature))
            .ok()
    }
}

/// TF-IDF vectorizer configuration. The default (unigrams + bigrams, no
/// document-frequency pruning) is what the analysis pipeline uses.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    /// Inclusive n-gram range, e.g. (1, 2) for unigrams and bigrams
    pub ngram_range: (usize, usize),
    /// Minimum number of documents a feature must appear in
    pub min_df: usize,
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self {
            ngram_range: (1, 2),
            min_df: 1,
        }
    }
}

impl TfIdfVectorizer {
    /// Learn the vocabulary from `texts` and return their TF-IDF rows.
    ///
    /// Feature indices follow the lexicographic order of the feature
    /// strings, so the output does not depend on hash ordering.
    pub fn fit_transform<T: AsRef<str>>(&self, texts: &[T]) -> Result<FeatureMatrix, AnalysisError> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(AnalysisError::VectorizationFailed(format!(
                "invalid n-gram range ({min_n}, {max_n})"
            )));
        }

        // Raw term counts per document
        let term_counts: Vec<HashMap<String, u32>> = texts
            .iter()
            .map(|text| {
                let tokens = tokenize(text.as_ref());
                let mut counts = HashMap::new();
                for gram in ngrams(&tokens, min_n, max_n) {
                    *counts.entry(gram).or_insert(0u32) += 1;
                }
                counts
            })
            .collect();

        // Document frequency: in how many documents each term appears
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for counts in &term_counts {
            for term in counts.keys() {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let min_df = self.min_df.max(1);
        let vocabulary: Vec<String> = doc_freq
            .iter()
            .filter(|(_, df)| **df >= min_df)
            .map(|(term, _)| term.to_string())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();

        if vocabulary.is_empty() {
            return Err(AnalysisError::VectorizationFailed(
                "empty vocabulary; documents contain no terms".to_string(),
            ));
        }

        let n_docs = texts.len() as f64;
        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = doc_freq[term.as_str()] as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let rows: Vec<SparseVector> = term_counts
            .iter()
            .map(|counts| {
                let entries = counts
                    .iter()
                    .filter_map(|(term, &count)| {
                        index
                            .get(term.as_str())
                            .map(|&i| (i, count as f64 * idf[i]))
                    })
                    .collect();
                let mut row = SparseVector::from_entries(entries);
                row.normalize();
                row
            })
            .collect();

        debug!(
            documents = rows.len(),
            features = vocabulary.len(),
            "Built TF-IDF feature matrix"
        );

        Ok(FeatureMatrix::new(vocabulary, rows))
    }
}
