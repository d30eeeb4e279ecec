// Tokenization and n-gram generation for the vectorizer.
//
// Text is lowercased and split on anything that is not a Unicode letter,
// digit or underscore. Every non-empty piece is a token, including
// single-character ones. No stop words are removed: documents may be in any
// language.

/// Split text into lowercase word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|piece| !piece.is_empty())
        .map(|piece| piece.to_lowercase())
        .collect()
}

/// Produce all n-grams for n in `min_n..=max_n`, joined with a single space.
///
/// Unigrams come first, then bigrams, and so on, each in text order.
pub fn ngrams(tokens: &[String], min_n: usize, max_n: usize) -> Vec<String> {
    let min_n = min_n.max(1);
    let mut grams = Vec::new();

    for n in min_n..=max_n {
        if n > tokens.len() {
            break;
        }
        grams.extend(tokens.windows(n).map(|window| window.join(" ")));
    }

    grams
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits_punctuation() {
        let tokens = tokenize("The cat, the HAT!  sat.");
        assert_eq!(tokens, vec!["the", "cat", "the", "hat", "sat"]);
    }

    #[test]
    fn test_tokenize_keeps_single_chars_and_underscores() {
        assert_eq!(tokenize("a b_c d"), vec!["a", "b_c", "d"]);
    }

    #[test]
    fn test_tokenize_unicode_words() {
        assert_eq!(
            tokenize("Análise de Similaridade—ção"),
            vec!["análise", "de", "similaridade", "ção"]
        );
    }

    #[test]
    fn test_tokenize_only_punctuation() {
        assert!(tokenize("... --- !!!").is_empty());
    }

    #[test]
    fn test_ngrams_unigrams_and_bigrams() {
        let tokens = tokenize("the cat sat");
        let grams = ngrams(&tokens, 1, 2);
        assert_eq!(grams, vec!["the", "cat", "sat", "the cat", "cat sat"]);
    }

    #[test]
    fn test_ngrams_single_token_has_no_bigrams() {
        let tokens = tokenize("alone");
        assert_eq!(ngrams(&tokens, 1, 2), vec!["alone"]);
    }

    #[test]
    fn test_ngrams_empty() {
        assert!(ngrams(&[], 1, 2).is_empty());
    }
}
