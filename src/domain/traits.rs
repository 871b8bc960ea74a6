// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The summary tokenizer and the corpus reader are external
// collaborators. The pipeline programs against these traits and the
// data/infra layers decide which implementation to build.

use anyhow::Result;

use crate::domain::document::CorpusRecord;

// ─── SentenceTokenizer ────────────────────────────────────────────────────────
/// Splits one summary sentence into tokens.
///
/// Implementations must be deterministic: the summary cache is keyed on
/// `name()`, so two tokenizers with the same name must produce the same
/// tokens. `Sync` because documents are tokenized in parallel.
pub trait SentenceTokenizer: Sync {
    /// Stable identifier, part of the summary cache key
    fn name(&self) -> &str;

    /// Tokenize a single sentence
    fn tokenize(&self, sentence: &str) -> Result<Vec<String>>;
}

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can produce the document/summary corpus.
///
/// Implementations:
///   - JsonCorpusLoader → reads `[{uid, document, summary}, ...]`
pub trait CorpusSource {
    fn load_records(&self) -> Result<Vec<CorpusRecord>>;
}
