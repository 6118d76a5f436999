// Similarity scoring: the originality gate and its three signals.
//
//   tokenize  -> shared normalization (word tokens, character n-grams)
//   overlap   -> directional character n-gram overlap
//   jaccard   -> token-set Jaccard index
//   semantic  -> embedding cosine similarity (fail-soft)
//   gate      -> thresholds and the pass/fail report

pub mod gate;
pub mod jaccard;
pub mod overlap;
pub mod semantic;
pub mod tokenize;
