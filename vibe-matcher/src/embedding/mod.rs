//! Embedding module for semantic matching
//!
//! Talks to an external embedding service (Ollama by default) and caches
//! the vectors it returns.

mod discovery;
mod engine;
mod ollama;

#[cfg(test)]
pub(crate) mod testing;

use crate::error::Result;

pub use discovery::{
    find_embed_model, find_ollama_endpoint, normalize_base_url, DEFAULT_EMBED_MODEL,
    DEFAULT_OLLAMA_URL,
};
pub use engine::{cosine_similarity, VectorEngine};
pub use ollama::{OllamaConfig, OllamaEmbedding};

/// Source of text embeddings
///
/// Implementations return one fixed-length vector per call; the
/// [`VectorEngine`] checks the shape.
pub trait Embedder: Send + Sync {
    /// Embed a single text
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Model name, for logs and errors
    fn name(&self) -> &str;
}
