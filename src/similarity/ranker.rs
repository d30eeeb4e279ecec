// Ranking and thresholding of pairwise similarities.
//
// Each unordered pair (i, j) with i < j is visited once. Scores become
// percentages rounded to two decimals (half away from zero, on the f64
// value), the threshold is applied to the rounded percentage, and the
// survivors are stably sorted highest first.

use serde::{Deserialize, Serialize};

use super::matrix::SimilarityMatrix;

/// Default reporting threshold, in percent.
pub const DEFAULT_THRESHOLD_PCT: f64 = 40.0;

/// A reportable pair of similar files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarPair {
    pub file1: String,
    pub file2: String,
    /// Percentage in [0, 100], rounded to two decimals
    pub similarity: f64,
}

/// Round a percentage to two decimals, halves away from zero.
///
/// Operates on the binary value: 40.125 is exact in f64 and becomes 40.13,
/// while a literal like 39.995 is stored slightly below the half and becomes
/// 39.99.
pub fn round_percentage(pct: f64) -> f64 {
    (pct * 100.0).round() / 100.0
}

/// Turn a similarity matrix into the sorted list of pairs at or above
/// `threshold_pct`.
///
/// `filenames` must be in the same order as the matrix rows; pairs beyond
/// the shorter of the two are ignored.
pub fn rank_pairs(
    matrix: &SimilarityMatrix,
    filenames: &[String],
    threshold_pct: f64,
) -> Vec<SimilarPair> {
    let n = matrix.size().min(filenames.len());
    let mut pairs = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            let similarity = round_percentage(matrix.get(i, j) * 100.0);
            if similarity >= threshold_pct {
                pairs.push(SimilarPair {
                    file1: filenames[i].clone(),
                    file2: filenames[j].clone(),
                    similarity,
                });
            }
        }
    }

    // sort_by is stable: equal scores keep enumeration order
    pairs.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::matrix::compute_similarity_matrix;
    use crate::similarity::tfidf::TfIdfVectorizer;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("doc{i}.txt")).collect()
    }

    fn rank(texts: &[&str], threshold: f64) -> Vec<SimilarPair> {
        let features = TfIdfVectorizer::default().fit_transform(texts).unwrap();
        let matrix = compute_similarity_matrix(&features).unwrap();
        rank_pairs(&matrix, &names(texts.len()), threshold)
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_percentage(40.125), 40.13);
        assert_eq!(round_percentage(0.125), 0.13);
        assert_eq!(round_percentage(100.0), 100.0);
        assert_eq!(round_percentage(0.0), 0.0);
    }

    #[test]
    fn test_round_near_threshold() {
        assert_eq!(round_percentage(39.996), 40.0);
        assert_eq!(round_percentage(39.994), 39.99);
    }

    #[test]
    fn test_identical_pair_reported_at_100() {
        let pairs = rank(&["the cat sat", "the cat sat"], DEFAULT_THRESHOLD_PCT);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].similarity, 100.0);
        assert_eq!(pairs[0].file1, "doc0.txt");
        assert_eq!(pairs[0].file2, "doc1.txt");
    }

    #[test]
    fn test_disjoint_pair_not_reported() {
        let pairs = rank(
            &["alpha beta gamma", "delta epsilon zeta"],
            DEFAULT_THRESHOLD_PCT,
        );
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_partial_overlap_scenario() {
        let pairs = rank(&["a b c d", "a b c e", "x y z"], DEFAULT_THRESHOLD_PCT);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].file1, "doc0.txt");
        assert_eq!(pairs[0].file2, "doc1.txt");
        assert!(pairs[0].similarity > 40.0);
        assert!(pairs
            .iter()
            .all(|p| p.file1 != "doc2.txt" && p.file2 != "doc2.txt"));
    }

    #[test]
    fn test_zero_threshold_reports_every_pair_once() {
        let pairs = rank(&["a", "b", "c", "d"], 0.0);
        assert_eq!(pairs.len(), 6);
        for p in &pairs {
            assert!(p.file1 < p.file2, "pair out of order: {p:?}");
        }
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let pairs = rank(
            &[
                "shared words one",
                "shared words one",
                "shared words two",
                "shared words one",
            ],
            0.0,
        );
        for window in pairs.windows(2) {
            assert!(window[0].similarity >= window[1].similarity);
        }
        // The three identical documents tie at 100 in enumeration order.
        let top: Vec<(&str, &str)> = pairs
            .iter()
            .take(3)
            .map(|p| (p.file1.as_str(), p.file2.as_str()))
            .collect();
        assert_eq!(
            top,
            vec![
                ("doc0.txt", "doc1.txt"),
                ("doc0.txt", "doc3.txt"),
                ("doc1.txt", "doc3.txt"),
            ]
        );
    }

    #[test]
    fn test_threshold_applies_to_rounded_value() {
        let kept = matrix_with_cosine(0.39996);
        let dropped = matrix_with_cosine(0.39994);
        let kept_pairs = rank_pairs(&kept, &names(2), 40.0);
        assert_eq!(kept_pairs.len(), 1);
        assert_eq!(kept_pairs[0].similarity, 40.0);
        assert!(rank_pairs(&dropped, &names(2), 40.0).is_empty());
    }

    /// Two unit vectors in the plane whose cosine is `c`.
    fn matrix_with_cosine(c: f64) -> SimilarityMatrix {
        use crate::similarity::tfidf::{FeatureMatrix, SparseVector};
        let s = (1.0 - c * c).sqrt();
        let features = FeatureMatrix::new(
            vec!["x".into(), "y".into()],
            vec![
                SparseVector::from_entries(vec![(0, 1.0)]),
                SparseVector::from_entries(vec![(0, c), (1, s)]),
            ],
        );
        compute_similarity_matrix(&features).unwrap()
    }
}
