//! Embedding service discovery utilities
//!
//! Resolves the Ollama endpoint and model name across CLI flags,
//! environment variables, and defaults.

use crate::error::{Result, VibeError};

/// Default Ollama endpoint
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default embedding model
pub const DEFAULT_EMBED_MODEL: &str = "nomic-embed-text";

/// Port Ollama listens on unless told otherwise
const DEFAULT_OLLAMA_PORT: u16 = 11434;

/// Find the Ollama base URL with priority:
/// 1. Explicit value (CLI flag)
/// 2. Environment variable VIBE_OLLAMA_URL
/// 3. Environment variable OLLAMA_HOST (the variable Ollama itself reads)
/// 4. http://localhost:11434
pub fn find_ollama_endpoint(explicit: Option<&str>) -> Result<String> {
    // Priority 1: explicit
    if let Some(url) = explicit {
        return normalize_base_url(url);
    }

    // Priority 2: VIBE_OLLAMA_URL
    if let Ok(url) = std::env::var("VIBE_OLLAMA_URL") {
        match normalize_base_url(&url) {
            Ok(url) => {
                log::info!("Using VIBE_OLLAMA_URL: {}", url);
                return Ok(url);
            }
            Err(e) => log::warn!("VIBE_OLLAMA_URL ignored: {}", e),
        }
    }

    // Priority 3: OLLAMA_HOST
    if let Ok(host) = std::env::var("OLLAMA_HOST") {
        match normalize_base_url(&host) {
            Ok(url) => {
                log::info!("Using OLLAMA_HOST: {}", url);
                return Ok(url);
            }
            Err(e) => log::warn!("OLLAMA_HOST ignored: {}", e),
        }
    }

    // Priority 4: default
    Ok(DEFAULT_OLLAMA_URL.to_string())
}

/// Find the embedding model name: explicit, then VIBE_EMBED_MODEL, then the default
pub fn find_embed_model(explicit: Option<&str>) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| std::env::var("VIBE_EMBED_MODEL").ok())
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_EMBED_MODEL.to_string())
}

/// Normalize a base URL: trim, drop trailing slashes
///
/// A value without a scheme is read the way Ollama reads `OLLAMA_HOST`:
/// `http://` is added, and so is port 11434 if none is given.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(VibeError::invalid_config("empty Ollama URL"));
    }

    let url = match trimmed.split_once("://") {
        Some((scheme, rest)) => {
            if scheme != "http" && scheme != "https" {
                return Err(VibeError::invalid_config(format!(
                    "unsupported URL scheme '{}' in {}",
                    scheme, raw
                )));
            }
            if rest.is_empty() {
                return Err(VibeError::invalid_config(format!("missing host in {}", raw)));
            }
            trimmed.to_string()
        }
        None => {
            let host = trimmed.split('/').next().unwrap_or(trimmed);
            if has_port(host) {
                format!("http://{}", trimmed)
            } else {
                let path = &trimmed[host.len()..];
                format!("http://{}:{}{}", host, DEFAULT_OLLAMA_PORT, path)
            }
        }
    };

    Ok(url)
}

/// `host:port` or `[v6]:port`
fn has_port(host: &str) -> bool {
    match host.rfind(']') {
        Some(end) => host[end..].contains(':'),
        None => host.contains(':'),
    }
}
