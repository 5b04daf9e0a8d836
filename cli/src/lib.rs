//! Vibe Matcher CLI Library
//!
//! Terminal front end for the vibe matcher: catalog lifecycle, query
//! execution and result rendering.

pub mod error;
pub mod render;
pub mod service;

pub use error::{CliError, CliResult};
pub use service::{CatalogSource, VibeService};
