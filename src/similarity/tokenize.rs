// Text normalization: lowercase word tokens and character n-grams.
//
// Both scorers that work on surface text (n-gram overlap and token Jaccard)
// share these helpers so they agree on what "the same text" means.
//
// Everything operates on Unicode scalar values, never bytes. A Chinese
// sentence of 11 characters has 9 trigrams, not 31.

use std::collections::HashSet;

/// Default character window for n-gram overlap.
pub const DEFAULT_NGRAM_SIZE: usize = 3;

/// Build the set of distinct lowercase character n-grams in `text`.
///
/// Returns an empty set when the text has fewer than `n` characters or when
/// `n` is zero.
pub fn char_ngrams(text: &str, n: usize) -> HashSet<String> {
    if n == 0 {
        return HashSet::new();
    }

    // Window over the source characters; lowercasing can change the count.
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < n {
        return HashSet::new();
    }

    chars
        .windows(n)
        .map(|window| window.iter().collect::<String>().to_lowercase())
        .collect()
}

/// Split `text` into its set of distinct lowercase word tokens.
///
/// A token is a maximal run of alphanumeric characters (any script) or `_`.
/// Whitespace, punctuation and symbols are delimiters and never appear in a
/// token.
pub fn word_tokens(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ngrams_basic() {
        let grams = char_ngrams("abcd", 3);
        assert_eq!(grams.len(), 2);
        assert!(grams.contains("abc"));
        assert!(grams.contains("bcd"));
    }

    #[test]
    fn test_ngrams_shorter_than_window() {
        assert!(char_ngrams("ab", 3).is_empty());
        assert!(char_ngrams("", 3).is_empty());
    }

    #[test]
    fn test_ngrams_window_counts_source_characters() {
        // 'İ' lowercases to two chars; the source is still only 2 long.
        assert!(char_ngrams("İa", 3).is_empty());
        let grams = char_ngrams("İab", 3);
        assert_eq!(grams.len(), 1);
        assert!(grams.contains(&"İab".to_lowercase()));
    }

    #[test]
    fn test_ngrams_zero_window() {
        assert!(char_ngrams("abcdef", 0).is_empty());
    }

    #[test]
    fn test_ngrams_lowercased_and_deduplicated() {
        let grams = char_ngrams("ABAB", 2);
        // "ab", "ba", "ab" -> two distinct grams
        assert_eq!(grams.len(), 2);
        assert!(grams.contains("ab"));
        assert!(grams.contains("ba"));
    }

    #[test]
    fn test_ngrams_count_characters_not_bytes() {
        let grams = char_ngrams("写作不易", 3);
        assert_eq!(grams.len(), 2);
        assert!(grams.contains("写作不"));
        assert!(grams.contains("作不易"));
    }

    #[test]
    fn test_tokens_split_on_punctuation() {
        let tokens = word_tokens("Hello, world! Hello again.");
        assert_eq!(tokens.len(), 3);
        assert!(tokens.contains("hello"));
        assert!(tokens.contains("world"));
        assert!(tokens.contains("again"));
    }

    #[test]
    fn test_tokens_keep_underscore_and_digits() {
        let tokens = word_tokens("snake_case v2 -- 100%");
        assert!(tokens.contains("snake_case"));
        assert!(tokens.contains("v2"));
        assert!(tokens.contains("100"));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_tokens_cjk_run_is_one_token() {
        let tokens = word_tokens("深圳打工人，下班写作");
        assert_eq!(tokens.len(), 2);
        assert!(tokens.contains("深圳打工人"));
        assert!(tokens.contains("下班写作"));
    }

    #[test]
    fn test_tokens_punctuation_only() {
        assert!(word_tokens("... !!! ---").is_empty());
    }
}
