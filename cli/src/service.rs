//! Catalog service for the CLI
//!
//! Owns the embedding engine and the build-once catalog, and moves the
//! blocking embedding calls off the async runtime.

use std::path::PathBuf;
use std::sync::Arc;

use vibe_matcher::{
    load_products, sample_products, CatalogCache, MatchConfig, MatchResult, Matcher, RawProduct,
    VectorEngine, VibeError,
};

use crate::error::{CliError, CliResult};

/// Where catalog records come from
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// The built-in six products
    Sample,
    /// A JSON array of `{name, description}` records
    File(PathBuf),
}

impl CatalogSource {
    fn load(&self) -> Result<Vec<RawProduct>, VibeError> {
        match self {
            CatalogSource::Sample => Ok(sample_products()),
            CatalogSource::File(path) => load_products(path),
        }
    }
}

/// Catalog service
///
/// Builds the embedded catalog once and answers queries against it.
pub struct VibeService {
    engine: Arc<VectorEngine>,
    cache: Arc<CatalogCache>,
    source: CatalogSource,
}

impl VibeService {
    pub fn new(engine: Arc<VectorEngine>, source: CatalogSource) -> Self {
        Self {
            engine,
            cache: Arc::new(CatalogCache::new()),
            source,
        }
    }

    /// Embed the catalog if it has not been embedded yet
    ///
    /// Returns the number of products.
    pub async fn initialize(&self) -> CliResult<usize> {
        tracing::info!(
            "Embedding catalog ({:?}) with {}",
            self.source,
            self.engine.model_name()
        );

        let engine = self.engine.clone();
        let cache = self.cache.clone();
        let source = self.source.clone();

        let catalog = tokio::task::spawn_blocking(move || {
            cache.get_or_build(&engine, || source.load())
        })
        .await??;

        tracing::info!("Catalog ready: {} products", catalog.len());
        Ok(catalog.len())
    }

    /// Check if the catalog has been built
    pub fn is_initialized(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Embed the catalog again
    ///
    /// On failure the previous catalog keeps answering queries.
    pub async fn reload(&self) -> CliResult<usize> {
        tracing::info!("Reloading catalog ({:?})", self.source);

        let engine = self.engine.clone();
        let cache = self.cache.clone();
        let source = self.source.clone();

        let catalog = tokio::task::spawn_blocking(move || {
            engine.clear_cache();
            cache.rebuild(&engine, || source.load())
        })
        .await??;

        Ok(catalog.len())
    }

    /// Rank catalog products against `query`
    pub async fn find_matches(
        &self,
        query: &str,
        config: &MatchConfig,
    ) -> CliResult<Vec<MatchResult>> {
        let catalog = self.cache.get().ok_or(CliError::NotInitialized)?;
        let matcher = Matcher::new(self.engine.clone(), catalog);
        let query = query.to_string();
        let config = config.clone();

        let results =
            tokio::task::spawn_blocking(move || matcher.find_matches(&query, &config)).await??;
        Ok(results)
    }
}
