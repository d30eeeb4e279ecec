// Similarity scoring: TF-IDF vectors, pairwise cosine, ranked pairs.

pub mod matrix;
pub mod ranker;
pub mod tfidf;
pub mod tokenize;

pub use matrix::{compute_similarity_matrix, SimilarityMatrix};
pub use ranker::{rank_pairs, round_percentage, SimilarPair, DEFAULT_THRESHOLD_PCT};
pub use tfidf::{FeatureMatrix, SparseVector, TfIdfVectorizer};
