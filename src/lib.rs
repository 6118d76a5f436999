// copymind: originality gate for rewritten articles
//
// This is the library root. `similarity` holds the gate itself; the other
// modules are the embedding provider it depends on and the surfaces that
// expose it (HTTP, batch, terminal).

pub mod config;
pub mod embedding;
pub mod output;
pub mod pipeline;
pub mod similarity;

#[cfg(feature = "web")]
pub mod web;
