// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only: each use case wires the data and
// infra layers together for one CLI command and owns the file I/O
// around the pure pipeline stages.

// Full pipeline: align, index, extend, write, report
pub mod build_use_case;

// Summary tokenization with the on-disk cache
pub mod tokenize_use_case;

// Histogram of an existing output dataset
pub mod stats_use_case;
