//! Render cache for incremental builds.
//!
//! Lets the generate stage skip pages whose inputs have not changed since the
//! last build. Every page is keyed by a SHA-256 over everything that can affect
//! its HTML:
//!
//! - the article's raw markdown
//! - the site context: config and navigation, serialized as JSON
//! - the crate version, so upgrading the generator re-renders everything
//!
//! The hash is content-based rather than mtime-based so it survives
//! `git checkout`.
//!
//! A page is skipped when its stored hash matches **and** the output file is
//! still on disk.
//!
//! ## Storage
//!
//! The manifest is a JSON file at `<output_dir>/.render-cache.json`, so it
//! travels with the output directory when cached in CI.
//!
//! ## Bypassing the cache
//!
//! `build --no-cache` starts from an empty manifest; every page is rendered
//! and the old files are overwritten.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the cache manifest file within the output directory.
const MANIFEST_FILENAME: &str = ".render-cache.json";

/// Version of the cache manifest format. Bump this to invalidate all
/// existing caches when the format or key computation changes.
const MANIFEST_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk cache manifest mapping output paths to the hash they were
/// rendered from.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CacheManifest {
    pub version: u32,
    pub entries: HashMap<String, String>,
}

impl CacheManifest {
    /// Create an empty manifest (used for `--no-cache` or first build).
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION,
            entries: HashMap::new(),
        }
    }

    /// Load from the output directory. Returns an empty manifest if the
    /// file doesn't exist or can't be parsed (version mismatch, corruption).
    pub fn load(output_dir: &Path) -> Self {
        let path = manifest_path(output_dir);
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Self::empty();
        };
        match serde_json::from_str::<Self>(&content) {
            Ok(m) if m.version == MANIFEST_VERSION => m,
            Ok(m) => {
                tracing::debug!(found = m.version, "render cache version mismatch, starting fresh");
                Self::empty()
            }
            Err(err) => {
                tracing::warn!(%err, path = %path.display(), "unreadable render cache, starting fresh");
                Self::empty()
            }
        }
    }

    /// Save to the output directory.
    pub fn save(&self, output_dir: &Path) -> Result<(), CacheError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(manifest_path(output_dir), json)?;
        Ok(())
    }

    /// Whether `output_path` was rendered from `input_hash` and still exists.
    pub fn is_fresh(&self, output_path: &str, input_hash: &str, output_dir: &Path) -> bool {
        self.entries.get(output_path).is_some_and(|h| h == input_hash)
            && output_dir.join(output_path).exists()
    }

    /// Record the hash a page was rendered from.
    pub fn insert(&mut self, output_path: String, input_hash: String) {
        self.entries.insert(output_path, input_hash);
    }

    /// Drop entries for pages that no longer exist in the site.
    pub fn retain_outputs(&mut self, live: &[String]) {
        self.entries.retain(|path, _| live.contains(path));
    }
}

/// SHA-256 of one page's render inputs, as a hex string.
pub fn hash_render_input(body: &str, context_json: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"page\0");
    hasher.update(env!("CARGO_PKG_VERSION").as_bytes());
    hasher.update(b"\0");
    hasher.update((context_json.len() as u64).to_le_bytes());
    hasher.update(context_json.as_bytes());
    hasher.update(body.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Summary of cache performance for a build run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u32,
    pub misses: u32,
}

impl CacheStats {
    pub fn hit(&mut self) {
        self.hits += 1;
    }

    pub fn miss(&mut self) {
        self.misses += 1;
    }

    pub fn total(&self) -> u32 {
        self.hits + self.misses
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 {
            write!(
                f,
                "{} cached, {} rendered ({} total)",
                self.hits,
                self.misses,
                self.total()
            )
        } else {
            write!(f, "{} rendered", self.misses)
        }
    }
}

/// Resolve the cache manifest path for an output directory.
pub fn manifest_path(output_dir: &Path) -> PathBuf {
    output_dir.join(MANIFEST_FILENAME)
}
