// ============================================================
// Layer 4 — Span Index
// ============================================================
// Per span type: (document uid, summary sentence) → answer ranges,
// in the order the qas appear in the layer. Each qa contributes its
// first answer, together with its own question so the extender can
// reuse that wording later.
//
// One index per span type; cross-type lookups happen in the extender.

use std::collections::HashMap;

use crate::data::aligner::AlignedLayer;
use crate::domain::span::{AnswerRange, SummaryIdx};

#[derive(Debug, Clone, Default)]
pub struct SpanIndex {
    span_type: String,
    ranges:    HashMap<(String, SummaryIdx), Vec<AnswerRange>>,
}

impl SpanIndex {
    /// Index every qa of `layer` exactly once.
    pub fn build(layer: &AlignedLayer) -> Self {
        let mut ranges: HashMap<(String, SummaryIdx), Vec<AnswerRange>> = HashMap::new();
        for (_, qa) in layer.qas() {
            ranges
                .entry((qa.uid.clone(), qa.summary_idx))
                .or_default()
                .push(qa.answer.clone());
        }

        let index = Self { span_type: layer.span_type.clone(), ranges };
        tracing::debug!(
            "Indexed {} ranges of span type '{}' under {} keys",
            index.len(),
            index.span_type,
            index.ranges.len()
        );
        index
    }

    pub fn span_type(&self) -> &str {
        &self.span_type
    }

    /// Ranges recorded for one summary sentence, first-seen order.
    pub fn candidates(&self, uid: &str, summary_idx: SummaryIdx) -> &[AnswerRange] {
        self.ranges
            .get(&(uid.to_string(), summary_idx))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of indexed ranges
    pub fn len(&self) -> usize {
        self.ranges.values().map(Vec::len).sum()
    }
}
