// ============================================================
// Layer 6 — Summary Cache
// ============================================================
// Tokenizing every summary sentence is the slow step of a run, so
// its result is kept on disk:
//
//   {
//     "key": "<sha256>",
//     "documents": { "<uid>": { "document": ..., "summary": [...] } }
//   }
//
// The key hashes the cache format version, the tokenizer name and
// the raw corpus bytes. A cache whose key differs from the one
// computed for the current run is stale and gets rebuilt; a missing
// file is simply a miss.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::{collections::BTreeMap, fs, path::PathBuf};

use crate::data::loader::{read_json, write_json};
use crate::domain::document::{SummaryDocument, SummaryStore};

/// Bump when the cached representation changes
pub const CACHE_VERSION: &str = "summary-cache/1";

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    key:       String,
    documents: BTreeMap<String, SummaryDocument>,
}

pub struct SummaryCache {
    path: PathBuf,
}

impl SummaryCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Cache key for a corpus tokenized with `tokenizer_name`.
    pub fn key(corpus_bytes: &[u8], tokenizer_name: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(CACHE_VERSION.as_bytes());
        hasher.update([0u8]);
        hasher.update(tokenizer_name.as_bytes());
        hasher.update([0u8]);
        hasher.update(corpus_bytes);
        format!("{:x}", hasher.finalize())
    }

    /// Load the cached store if it exists and was built under `key`.
    pub fn load(&self, key: &str) -> Result<Option<SummaryStore>> {
        if !self.path.exists() {
            tracing::info!("No summary cache at '{}'", self.path.display());
            return Ok(None);
        }

        let cache: CacheFile = read_json(&self.path)?;
        if cache.key != key {
            tracing::warn!(
                "Summary cache '{}' is stale (corpus or tokenizer changed)",
                self.path.display()
            );
            return Ok(None);
        }

        tracing::info!(
            "Loaded {} tokenized summaries from '{}'",
            cache.documents.len(),
            self.path.display()
        );
        Ok(Some(cache.documents.into_iter().collect()))
    }

    /// Persist `store` under `key`, replacing any previous cache.
    pub fn save(&self, key: &str, store: &SummaryStore) -> Result<()> {
        let cache = CacheFile {
            key:       key.to_string(),
            documents: store.iter().map(|(uid, doc)| (uid.clone(), doc.clone())).collect(),
        };
        write_json(&self.path, &cache)?;
        tracing::info!("Saved summary cache to '{}'", self.path.display());
        Ok(())
    }

    /// Drop the cache file, if any.
    pub fn invalidate(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Cannot remove '{}'", self.path.display()))?;
            tracing::info!("Removed summary cache '{}'", self.path.display());
        }
        Ok(())
    }

    /// Cached store for `key`, or build it with `build` and cache the result.
    pub fn load_or_build<F>(&self, key: &str, refresh: bool, build: F) -> Result<SummaryStore>
    where
        F: FnOnce() -> Result<SummaryStore>,
    {
        if refresh {
            self.invalidate()?;
        } else if let Some(store) = self.load(key)? {
            return Ok(store);
        }

        let store = build()?;
        self.save(key, &store)?;
        Ok(store)
    }
}
