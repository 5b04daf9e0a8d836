//! Embedded product catalog
//!
//! Embeds every product description once and keeps the result for the
//! rest of the process, or until the cache is invalidated.

use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;

use crate::embedding::VectorEngine;
use crate::error::{Result, VibeError};
use crate::product::{Product, RawProduct};

/// Ordered, read-only list of embedded products
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    dimension: Option<usize>,
}

impl Catalog {
    /// Products in input order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by its position in the catalog
    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Shared vector length; `None` for an empty catalog
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }
}

/// Embed each description, in order
///
/// Fails as a whole if any record is unusable or any embedding call fails.
pub fn build_catalog(engine: &VectorEngine, raw: Vec<RawProduct>) -> Result<Catalog> {
    let mut products = Vec::with_capacity(raw.len());
    let mut dimension = None;

    for (index, record) in raw.into_iter().enumerate() {
        if record.name.trim().is_empty() {
            return Err(VibeError::invalid_catalog(format!(
                "product #{} has an empty name",
                index
            )));
        }

        let embedding = engine.embed(&record.description).map_err(|e| match e {
            VibeError::ExternalService(msg) => VibeError::external_service(format!(
                "embedding '{}' failed: {}",
                record.name, msg
            )),
            other => other,
        })?;

        match dimension {
            None => dimension = Some(embedding.len()),
            Some(d) if d != embedding.len() => {
                return Err(VibeError::external_service(format!(
                    "'{}' embedded to {} dimensions, catalog uses {}",
                    record.name,
                    embedding.len(),
                    d
                )))
            }
            Some(_) => {}
        }

        products.push(Product::new(record, embedding));
    }

    log::info!(
        "Catalog embedded: {} products ({})",
        products.len(),
        dimension.map_or_else(|| "no vectors".to_string(), |d| format!("{}d", d))
    );

    Ok(Catalog {
        products,
        dimension,
    })
}

/// Read a JSON array of `{name, description}` records
pub fn load_products(path: impl AsRef<Path>) -> Result<Vec<RawProduct>> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path)?;
    let products: Vec<RawProduct> = serde_json::from_str(&data)?;
    log::debug!("Loaded {} products from {}", products.len(), path.display());
    Ok(products)
}

/// The built-in six-product catalog
pub fn sample_products() -> Vec<RawProduct> {
    vec![
        RawProduct::new(
            "Boho Maxi Dress",
            "Flowy, with earthy tones and floral patterns for a free-spirited look.",
        ),
        RawProduct::new(
            "Streetwear Hoodie",
            "Oversized fit, bold graphic print, and heavyweight cotton for city streets.",
        ),
        RawProduct::new(
            "Minimalist Blazer",
            "A clean, tailored cut in a neutral tone for a sharp, professional look.",
        ),
        RawProduct::new(
            "Vintage Leather Jacket",
            "Distressed authentic leather with a timeless, iconic biker silhouette.",
        ),
        RawProduct::new(
            "Cozy Knit Sweater",
            "A soft, warm cable-knit pullover for relaxing evenings by the fire.",
        ),
        RawProduct::new(
            "High-Top Sneakers",
            "Classic design with vibrant color accents. The perfect urban footwear.",
        ),
    ]
}

/// Build-once holder for the embedded catalog
///
/// Readers share one `Arc<Catalog>`; `invalidate` forces the next
/// `get_or_build` to embed again.
#[derive(Default)]
pub struct CatalogCache {
    catalog: RwLock<Option<Arc<Catalog>>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached catalog, building it on first use
    pub fn get_or_build<F>(&self, engine: &VectorEngine, source: F) -> Result<Arc<Catalog>>
    where
        F: FnOnce() -> Result<Vec<RawProduct>>,
    {
        if let Some(catalog) = self.catalog.read().as_ref() {
            return Ok(catalog.clone());
        }

        let mut slot = self.catalog.write();
        // Another caller may have built it while we waited
        if let Some(catalog) = slot.as_ref() {
            return Ok(catalog.clone());
        }

        let catalog = Arc::new(build_catalog(engine, source()?)?);
        *slot = Some(catalog.clone());
        Ok(catalog)
    }

    /// Embed the catalog again and swap it in
    ///
    /// The current catalog keeps serving readers during the build and stays
    /// in place if the build fails.
    pub fn rebuild<F>(&self, engine: &VectorEngine, source: F) -> Result<Arc<Catalog>>
    where
        F: FnOnce() -> Result<Vec<RawProduct>>,
    {
        let catalog = Arc::new(build_catalog(engine, source()?)?);
        *self.catalog.write() = Some(catalog.clone());
        log::info!("Catalog rebuilt: {} products", catalog.len());
        Ok(catalog)
    }

    /// Cached catalog, if built
    pub fn get(&self) -> Option<Arc<Catalog>> {
        self.catalog.read().clone()
    }

    /// Drop the cached catalog
    pub fn invalidate(&self) {
        if self.catalog.write().take().is_some() {
            log::info!("Catalog cache invalidated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::testing::{CountingEmbedder, FixedEmbedder, KeywordEmbedder};
    use std::io::Write;

    fn keyword_engine() -> VectorEngine {
        VectorEngine::with_embedder(Arc::new(KeywordEmbedder))
    }

    #[test]
    fn test_build_sample_catalog() {
        let engine = keyword_engine();
        let catalog = build_catalog(&engine, sample_products()).unwrap();

        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.dimension(), Some(8));
        assert_eq!(catalog.get(0).unwrap().name(), "Boho Maxi Dress");
        assert_eq!(catalog.get(5).unwrap().name(), "High-Top Sneakers");
        assert!(catalog
            .products()
            .iter()
            .all(|p| p.embedding().len() == 8));
    }

    #[test]
    fn test_build_empty_catalog() {
        let catalog = build_catalog(&keyword_engine(), vec![]).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.dimension(), None);
    }

    #[test]
    fn test_build_fails_on_service_error() {
        let model = FixedEmbedder::new().with("first", vec![1.0, 0.0]);
        let engine = VectorEngine::with_embedder(Arc::new(model));
        let raw = vec![
            RawProduct::new("One", "first"),
            RawProduct::new("Two", "second"),
        ];

        let err = build_catalog(&engine, raw).unwrap_err();
        assert!(err.is_external_service());
        assert!(err.to_string().contains("embedding 'Two' failed"));
    }

    #[test]
    fn test_build_fails_on_wrong_length_vector() {
        let model = FixedEmbedder::new()
            .with("first", vec![1.0, 0.0, 0.0])
            .with("second", vec![1.0, 0.0]);
        let engine = VectorEngine::with_embedder(Arc::new(model));
        let raw = vec![
            RawProduct::new("One", "first"),
            RawProduct::new("Two", "second"),
        ];

        assert!(build_catalog(&engine, raw).unwrap_err().is_external_service());
    }

    #[test]
    fn test_build_rejects_blank_name() {
        let raw = vec![RawProduct::new("  ", "bold graphic print")];
        let err = build_catalog(&keyword_engine(), raw).unwrap_err();
        assert!(matches!(err, VibeError::InvalidCatalog(_)));
    }

    #[test]
    fn test_build_is_idempotent() {
        let engine = keyword_engine();
        let a = build_catalog(&engine, sample_products()).unwrap();
        let b = build_catalog(&engine, sample_products()).unwrap();
        for (x, y) in a.products().iter().zip(b.products()) {
            assert_eq!(x.embedding(), y.embedding());
        }
    }

    #[test]
    fn test_load_products_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Rain Shell", "description": "Light waterproof layer"}}]"#
        )
        .unwrap();

        let products = load_products(file.path()).unwrap();
        assert_eq!(products, vec![RawProduct::new("Rain Shell", "Light waterproof layer")]);
    }

    #[test]
    fn test_load_products_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "not a list"}}"#).unwrap();
        assert!(matches!(
            load_products(file.path()).unwrap_err(),
            VibeError::Json(_)
        ));
    }

    #[test]
    fn test_load_products_missing_file() {
        let err = load_products("/nonexistent/catalog.json").unwrap_err();
        assert!(matches!(err, VibeError::Io(_)));
    }

    #[test]
    fn test_cache_builds_once_until_invalidated() {
        let counter = Arc::new(CountingEmbedder::new(KeywordEmbedder));
        let engine = VectorEngine::with_embedder(counter.clone());
        let cache = CatalogCache::new();

        assert!(cache.get().is_none());
        let first = cache
            .get_or_build(&engine, || Ok(sample_products()))
            .unwrap();
        let second = cache
            .get_or_build(&engine, || panic!("catalog rebuilt"))
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(counter.calls(), 6);

        cache.invalidate();
        assert!(cache.get().is_none());
        engine.clear_cache();
        cache
            .get_or_build(&engine, || Ok(sample_products()))
            .unwrap();
        assert_eq!(counter.calls(), 12);
    }

    #[test]
    fn test_failed_rebuild_keeps_current_catalog() {
        let engine = keyword_engine();
        let cache = CatalogCache::new();
        let first = cache
            .get_or_build(&engine, || Ok(sample_products()))
            .unwrap();

        let err = cache
            .rebuild(&engine, || Ok(vec![RawProduct::new("", "no name")]))
            .unwrap_err();
        assert!(matches!(err, VibeError::InvalidCatalog(_)));
        assert!(Arc::ptr_eq(&first, &cache.get().unwrap()));

        let rebuilt = cache
            .rebuild(&engine, || Ok(sample_products()[..2].to_vec()))
            .unwrap();
        assert_eq!(rebuilt.len(), 2);
        assert!(Arc::ptr_eq(&rebuilt, &cache.get().unwrap()));
    }

    #[test]
    fn test_cache_does_not_keep_failed_build() {
        let engine = VectorEngine::with_embedder(Arc::new(FixedEmbedder::new()));
        let cache = CatalogCache::new();

        assert!(cache
            .get_or_build(&engine, || Ok(sample_products()))
            .is_err());
        assert!(cache.get().is_none());
    }
}
