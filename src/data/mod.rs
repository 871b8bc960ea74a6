// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// From per-span-type QA files and a document/summary corpus to one
// merged cloze corpus:
//
//   corpus JSON ──► SummaryTokenizer ──► SummaryStore
//                                            │
//   layer JSONs ──► SummaryAligner ◄─────────┘
//                        │
//                        ▼
//                    SpanIndex (per span type)
//                        │
//                        ▼
//                    SpanExtender (default layer only)
//                        │
//                        ▼
//                    SpanHistogram + merged JSON
//
// Each stage takes its input by reference and returns a new value.

/// Reads corpus/layer JSON, writes the merged dataset
pub mod loader;

/// Parallel summary tokenization
pub mod summaries;

/// Configured entity-type markers
pub mod markers;

/// Question → summary sentence alignment
pub mod aligner;

/// (uid, sentence) → answer ranges, per span type
pub mod span_index;

/// Widening named-entity answers from other layers
pub mod extender;

/// Span-type histogram
pub mod statistics;

/// Runs the in-memory pipeline end to end
pub mod assembler;
