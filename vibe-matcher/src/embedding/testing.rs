//! Deterministic embedders for tests and benchmarks

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::Embedder;
use crate::error::{Result, VibeError};

/// Returns pre-registered vectors; unknown texts fail like a service error
#[derive(Default)]
pub struct FixedEmbedder {
    vectors: HashMap<String, Vec<f32>>,
}

impl FixedEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.into(), vector);
        self
    }
}

impl Embedder for FixedEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| VibeError::external_service(format!("no vector for '{}'", text)))
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Counts calls to the wrapped embedder
pub struct CountingEmbedder {
    inner: Box<dyn Embedder>,
    calls: AtomicUsize,
}

impl CountingEmbedder {
    pub fn new(inner: impl Embedder + 'static) -> Self {
        Self {
            inner: Box::new(inner),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Embedder for CountingEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.embed(text)
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// Concept axes: urban, energetic, stylish, cozy, professional, boho, vintage
const AXES: &[&[&str]] = &[
    &["urban", "city", "streets", "street", "streetwear"],
    &["energetic", "vibrant", "bold", "energy"],
    &["chic", "graphic", "oversized", "color", "accents", "stylish"],
    &["cozy", "soft", "warm", "knit", "relaxing", "evenings", "fire"],
    &["clean", "tailored", "neutral", "sharp", "professional", "office"],
    &["boho", "flowy", "earthy", "floral", "free", "spirited"],
    &["vintage", "distressed", "authentic", "leather", "timeless", "iconic", "biker"],
];

/// Bag-of-concepts embedder with a constant bias dimension
///
/// Stands in for a real model: texts sharing concept words land close together.
pub struct KeywordEmbedder;

impl Embedder for KeywordEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0_f32; AXES.len() + 1];
        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            for (axis, words) in AXES.iter().enumerate() {
                if words.contains(&token) {
                    vector[axis] += 1.0;
                }
            }
        }
        vector[AXES.len()] = 0.5;
        Ok(vector)
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
