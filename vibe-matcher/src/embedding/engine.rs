//! Vector embedding engine
//!
//! High-level API for generating, validating and caching embeddings.

use lru::LruCache;
use parking_lot::{Mutex, RwLock};
use std::num::NonZeroUsize;
use std::sync::Arc;

use super::ollama::{OllamaConfig, OllamaEmbedding};
use super::Embedder;
use crate::error::{Result, VibeError};

/// Default number of texts kept in the embedding cache
const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Vector embedding engine with caching
///
/// Wraps an [`Embedder`] with a bounded LRU cache and pins the vector
/// dimension so every vector it hands out has the same length.
pub struct VectorEngine {
    model: Arc<dyn Embedder>,
    cache: Mutex<LruCache<String, Vec<f32>>>,
    dimension: RwLock<Option<usize>>,
}

impl VectorEngine {
    /// Create VectorEngine backed by an Ollama server
    pub fn new(config: OllamaConfig) -> Self {
        let expected = config.expected_dimension;
        let engine = Self::with_embedder(Arc::new(OllamaEmbedding::new(config)));
        *engine.dimension.write() = expected;
        engine
    }

    /// Create VectorEngine from any embedder
    pub fn with_embedder(model: Arc<dyn Embedder>) -> Self {
        log::info!("VectorEngine ready (model: {})", model.name());

        Self {
            model,
            cache: Mutex::new(LruCache::new(cache_capacity(DEFAULT_CACHE_CAPACITY))),
            dimension: RwLock::new(None),
        }
    }

    /// Keep at most `capacity` texts cached (minimum 1)
    pub fn with_cache_capacity(self, capacity: usize) -> Self {
        self.cache.lock().resize(cache_capacity(capacity));
        self
    }

    /// Require a specific dimension instead of learning it from the first vector
    pub fn with_dimension(self, dimension: usize) -> Self {
        *self.dimension.write() = Some(dimension);
        self
    }

    /// Generate embedding with caching
    pub fn embed(&self, text: &str) -> Result<Vec<f32>> {
        // Check cache first
        if let Some(cached) = self.cache.lock().get(text) {
            return Ok(cached.clone());
        }

        // Generate, validate and cache; the lock is not held across the call
        let embedding = self.model.embed(text)?;
        self.check_vector(&embedding)?;
        self.cache.lock().put(text.to_string(), embedding.clone());
        Ok(embedding)
    }

    /// Reject empty, non-finite or wrong-length vectors
    fn check_vector(&self, vector: &[f32]) -> Result<()> {
        if vector.is_empty() {
            return Err(VibeError::external_service(format!(
                "{} returned an empty embedding",
                self.model.name()
            )));
        }

        if let Some(pos) = vector.iter().position(|x| !x.is_finite()) {
            return Err(VibeError::external_service(format!(
                "{} returned a non-finite value at index {}",
                self.model.name(),
                pos
            )));
        }

        let pinned = *self.dimension.read();
        if let Some(expected) = pinned {
            if vector.len() != expected {
                return Err(VibeError::external_service(format!(
                    "{} returned {} dimensions, expected {}",
                    self.model.name(),
                    vector.len(),
                    expected
                )));
            }
            return Ok(());
        }

        // First vector pins the dimension; re-check under the write lock
        let mut dimension = self.dimension.write();
        match *dimension {
            Some(expected) if expected != vector.len() => {
                Err(VibeError::external_service(format!(
                    "{} returned {} dimensions, expected {}",
                    self.model.name(),
                    vector.len(),
                    expected
                )))
            }
            Some(_) => Ok(()),
            None => {
                log::info!("Embedding dimension pinned at {}d", vector.len());
                *dimension = Some(vector.len());
                Ok(())
            }
        }
    }

    /// Get embedding dimension, once known
    pub fn dimension(&self) -> Option<usize> {
        *self.dimension.read()
    }

    /// Name of the underlying model
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Get cache size
    pub fn cache_size(&self) -> usize {
        self.cache.lock().len()
    }

    /// Clear the cache
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }
}

fn cache_capacity(capacity: usize) -> NonZeroUsize {
    NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)
}

/// Cosine similarity, clamped to [-1, 1]
///
/// Returns 0.0 for mismatched lengths or a zero-norm vector.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }
}
