// Unit tests for the pure similarity scorers.
//
// Properties that must hold for any input: range, identity, empty-input
// conventions, the direction of n-gram overlap and the symmetry of Jaccard.

use copymind::similarity::jaccard::jaccard_similarity;
use copymind::similarity::overlap::ngram_overlap;
use copymind::similarity::tokenize::{char_ngrams, word_tokens, DEFAULT_NGRAM_SIZE};

const SAMPLES: &[&str] = &[
    "",
    "a",
    "ab",
    "abc",
    "abcdef",
    "The quick brown fox jumps over the lazy dog.",
    "the lazy dog sleeps while the quick fox runs",
    "深圳打工人下班写作不易",
    "下班之后，深圳的打工人还在写作。",
    "!!! ??? ...",
    "Emoji 🎉 party 🎉 time",
];

// ============================================================
// Range
// ============================================================

#[test]
fn scores_stay_in_unit_interval() {
    for a in SAMPLES {
        for b in SAMPLES {
            let overlap = ngram_overlap(a, b, DEFAULT_NGRAM_SIZE);
            let jaccard = jaccard_similarity(a, b);
            assert!(
                (0.0..=1.0).contains(&overlap),
                "overlap({a:?}, {b:?}) = {overlap}"
            );
            assert!(
                (0.0..=1.0).contains(&jaccard),
                "jaccard({a:?}, {b:?}) = {jaccard}"
            );
        }
    }
}

// ============================================================
// Identity
// ============================================================

#[test]
fn overlap_with_self_is_one_when_long_enough() {
    for text in SAMPLES.iter().filter(|t| t.chars().count() >= DEFAULT_NGRAM_SIZE) {
        let score = ngram_overlap(text, text, DEFAULT_NGRAM_SIZE);
        assert!((score - 1.0).abs() < f64::EPSILON, "{text:?} -> {score}");
    }
}

#[test]
fn jaccard_with_self_is_one_when_tokenizable() {
    for text in SAMPLES.iter().filter(|t| !word_tokens(t).is_empty()) {
        let score = jaccard_similarity(text, text);
        assert!((score - 1.0).abs() < f64::EPSILON, "{text:?} -> {score}");
    }
}

#[test]
fn empty_texts_score_zero() {
    assert_eq!(jaccard_similarity("", ""), 0.0);
    assert_eq!(ngram_overlap("", "", DEFAULT_NGRAM_SIZE), 0.0);
}

// ============================================================
// Direction and symmetry
// ============================================================

#[test]
fn overlap_is_directional() {
    let forward = ngram_overlap("abcdef", "abc", 3);
    let backward = ngram_overlap("abc", "abcdef", 3);
    assert!((forward - 0.25).abs() < f64::EPSILON);
    assert!((backward - 1.0).abs() < f64::EPSILON);
    assert!(forward != backward);
}

#[test]
fn jaccard_is_symmetric() {
    for a in SAMPLES {
        for b in SAMPLES {
            let ab = jaccard_similarity(a, b);
            let ba = jaccard_similarity(b, a);
            assert!((ab - ba).abs() < f64::EPSILON, "{a:?} / {b:?}");
        }
    }
}

// ============================================================
// Normalization details
// ============================================================

#[test]
fn short_text_has_no_ngrams() {
    assert!(char_ngrams("ab", 3).is_empty());
    assert_eq!(ngram_overlap("ab", "abc", 3), 0.0);
}

#[test]
fn paraphrase_scores_low_on_lexical_axes() {
    let original = "Working late every night leaves little energy for writing.";
    let rewritten = "By evening I'm drained; crafting articles becomes a struggle.";
    assert!(ngram_overlap(original, rewritten, 3) < 0.5);
    assert!(jaccard_similarity(original, rewritten) < 0.25);
}

#[test]
fn chinese_verbatim_copy_is_identical() {
    let text = "深圳打工人下班写作不易";
    assert!((ngram_overlap(text, text, 3) - 1.0).abs() < f64::EPSILON);
    assert!((jaccard_similarity(text, text) - 1.0).abs() < f64::EPSILON);
}
