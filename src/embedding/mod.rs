// Embedding providers: trait-based abstraction for swappable backends.
//
// The EmbeddingProvider trait defines the interface. OpenAiEmbeddings talks to
// any OpenAI-compatible endpoint; DisabledProvider stands in when no
// credential is configured.

pub mod openai;
pub mod traits;
