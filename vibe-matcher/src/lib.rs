//! Vibe Matcher
//!
//! Matches a free-text "vibe" against a small product catalog by cosine
//! similarity between text embeddings served by Ollama.
//!
//! ## Features
//!
//! - **Build-once catalog** - Each product description is embedded once and cached
//! - **Brute-force ranking** - Score, threshold, stable sort, top-N
//! - **Shape checks** - Empty, non-finite or wrong-length vectors are rejected
//! - **Pluggable embedder** - Anything implementing [`Embedder`]
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use vibe_matcher::{
//!     build_catalog, sample_products, MatchConfig, Matcher, OllamaConfig, VectorEngine,
//! };
//!
//! # fn main() -> vibe_matcher::Result<()> {
//! let engine = Arc::new(VectorEngine::new(OllamaConfig::discover(None, None)?));
//! let catalog = Arc::new(build_catalog(&engine, sample_products())?);
//! let matcher = Matcher::new(engine, catalog);
//!
//! for m in matcher.find_matches("energetic urban chic", &MatchConfig::default())? {
//!     println!("{} ({:.2})", m.name, m.score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod embedding;
pub mod error;
pub mod matcher;
pub mod product;

// Re-exports for convenience
pub use catalog::{build_catalog, load_products, sample_products, Catalog, CatalogCache};
pub use embedding::{cosine_similarity, Embedder, OllamaConfig, OllamaEmbedding, VectorEngine};
pub use error::{Result, VibeError};
pub use matcher::{find_matches, MatchConfig, MatchResult, Matcher};
pub use product::{Product, RawProduct};
