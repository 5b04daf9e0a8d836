//! Vibe matcher
//!
//! Scores a query against every catalog product by cosine similarity,
//! keeps the ones at or above the threshold and returns the best few.

use serde::Serialize;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::embedding::{cosine_similarity, VectorEngine};
use crate::error::{Result, VibeError};

/// Match configuration
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Maximum results to return (default: 3)
    pub top_n: usize,
    /// Minimum cosine similarity to keep a product (default: 0.6)
    pub threshold: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            top_n: 3,
            threshold: 0.6,
        }
    }
}

impl MatchConfig {
    pub fn new(top_n: usize, threshold: f32) -> Self {
        Self { top_n, threshold }
    }

    fn validate(&self) -> Result<()> {
        if self.threshold.is_nan() {
            return Err(VibeError::invalid_config("threshold must be a number"));
        }
        Ok(())
    }
}

/// A product that passed the threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// 1-based position in the result list
    pub rank: usize,
    /// Position of the product in the catalog
    pub catalog_index: usize,
    pub name: String,
    pub description: String,
    /// Cosine similarity in [-1, 1]
    pub score: f32,
}

/// Rank catalog products against a query
///
/// A blank query, an empty catalog or `top_n == 0` returns no matches
/// without calling the embedding service. Ties keep catalog order.
pub fn find_matches(
    engine: &VectorEngine,
    catalog: &Catalog,
    query: &str,
    config: &MatchConfig,
) -> Result<Vec<MatchResult>> {
    config.validate()?;

    if query.trim().is_empty() || catalog.is_empty() || config.top_n == 0 {
        log::debug!("Nothing to match (blank query, empty catalog or top_n = 0)");
        return Ok(Vec::new());
    }

    // Embed the text as given; surrounding whitespace can move the vector
    let query_embedding = engine.embed(query)?;
    if let Some(dimension) = catalog.dimension() {
        if query_embedding.len() != dimension {
            return Err(VibeError::external_service(format!(
                "query embedded to {} dimensions, catalog uses {}",
                query_embedding.len(),
                dimension
            )));
        }
    }

    let mut scored: Vec<(usize, f32)> = catalog
        .products()
        .iter()
        .enumerate()
        .map(|(idx, product)| (idx, cosine_similarity(&query_embedding, product.embedding())))
        .filter(|(_, score)| *score >= config.threshold)
        .collect();

    // Stable: equal scores stay in catalog order
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(config.top_n);

    log::debug!(
        "Query '{}': {} of {} products at or above {:.2}",
        query,
        scored.len(),
        catalog.len(),
        config.threshold
    );

    Ok(scored
        .into_iter()
        .enumerate()
        .filter_map(|(pos, (idx, score))| {
            catalog.get(idx).map(|product| MatchResult {
                rank: pos + 1,
                catalog_index: idx,
                name: product.name().to_string(),
                description: product.description().to_string(),
                score,
            })
        })
        .collect())
}

/// Matcher over a shared engine and catalog
pub struct Matcher {
    engine: Arc<VectorEngine>,
    catalog: Arc<Catalog>,
}

impl Matcher {
    pub fn new(engine: Arc<VectorEngine>, catalog: Arc<Catalog>) -> Self {
        Self { engine, catalog }
    }

    /// Find the best matches for `query`
    pub fn find_matches(&self, query: &str, config: &MatchConfig) -> Result<Vec<MatchResult>> {
        find_matches(&self.engine, &self.catalog, query, config)
    }
}
