// Directional character n-gram overlap.
//
// Answers "what fraction of the original's n-grams reappear in the rewrite".
// The denominator is always the original's n-gram count, so the score is not
// symmetric: overlap(a, b) and overlap(b, a) differ whenever the two texts
// have different n-gram sets. Callers rely on that direction.

use super::tokenize::char_ngrams;

/// Fraction of the original's distinct n-grams that also occur in the rewrite.
///
/// Returns a score from 0.0 (no shared n-grams) to 1.0 (every n-gram of the
/// original reappears). Empty input, or an original shorter than `n`
/// characters, scores 0.0.
pub fn ngram_overlap(original: &str, rewritten: &str, n: usize) -> f64 {
    if original.is_empty() || rewritten.is_empty() {
        return 0.0;
    }

    let original_grams = char_ngrams(original, n);
    if original_grams.is_empty() {
        return 0.0;
    }
    let rewritten_grams = char_ngrams(rewritten, n);

    let shared = rewritten_grams
        .iter()
        .filter(|gram| original_grams.contains(*gram))
        .count();

    shared as f64 / original_grams.len() as f64
}
