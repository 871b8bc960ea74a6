// ============================================================
// Layer 2 — TokenizeUseCase
// ============================================================
// Produces the tokenized summary store, from the cache when it is
// still valid for this corpus and tokenizer, otherwise by tokenizing
// the corpus and writing a fresh cache.

use anyhow::Result;

use crate::application::build_use_case::BuildConfig;
use crate::data::{loader::JsonCorpusLoader, summaries::SummaryTokenizer};
use crate::domain::document::SummaryStore;
use crate::infra::summary_cache::SummaryCache;

pub struct TokenizeUseCase {
    config: BuildConfig,
}

impl TokenizeUseCase {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<SummaryStore> {
        let cfg       = &self.config;
        let loader    = JsonCorpusLoader::new(cfg.corpus_path());
        let tokenizer = cfg.tokenizer.build();

        // Hashed, and parsed on a cache miss
        let corpus_bytes = loader.read_bytes()?;
        let key   = SummaryCache::key(&corpus_bytes, tokenizer.name());
        let cache = SummaryCache::new(cfg.cache_path());

        cache.load_or_build(&key, cfg.refresh_cache, || {
            let records = loader.parse(&corpus_bytes)?;
            SummaryTokenizer::new(tokenizer.as_ref(), cfg.threads, cfg.progress)
                .tokenize_corpus(&records)
        })
    }
}
