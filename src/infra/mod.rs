// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that sit around the pipeline:
//
//   tokenizer_store.rs — Builds the summary sentence tokenizer
//                        from the `tokenizers` pre-tokenizers.
//
//   summary_cache.rs   — Tokenized summaries on disk, keyed by a
//                        hash of corpus + tokenizer so a changed
//                        input invalidates them.
//
//   report.rs          — Span-type histogram as CSV and log lines.

/// Sentence tokenizer construction
pub mod tokenizer_store;

/// Keyed on-disk cache of tokenized summaries
pub mod summary_cache;

/// Span-type report writer
pub mod report;
