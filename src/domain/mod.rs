// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain structs, enums and traits describing the corpus:
// documents with summaries, SQuAD-shaped QA layers, answer spans,
// normalized text, and the errors that make a corpus invalid.
//
// No file I/O here.

// Bracket normalization and the NormalizedText wrapper
pub mod brackets;

// Documents and their tokenized summaries
pub mod document;

// Data-integrity errors
pub mod error;

// Nested QA dataset shape
pub mod qa_pair;

// Character spans and answer ranges
pub mod span;

// Core abstractions (traits) that other layers implement
pub mod traits;
