// Token-set Jaccard similarity.
//
//   |tokens(a) ∩ tokens(b)| / |tokens(a) ∪ tokens(b)|
//
// Symmetric, 0.0 for disjoint vocabularies and 1.0 for identical ones.

use super::tokenize::word_tokens;

/// Compute the Jaccard index of the two texts' lowercase word-token sets.
///
/// When neither text contains a single token the union is empty and the
/// score is 0.0, not 1.0.
pub fn jaccard_similarity(original: &str, rewritten: &str) -> f64 {
    let tokens_a = word_tokens(original);
    let tokens_b = word_tokens(rewritten);

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.len() + tokens_b.len() - intersection;

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}
