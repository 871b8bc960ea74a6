// ============================================================
// Layer 4 — Span-Type Statistics
// ============================================================
// How many final answers ended up with each span type. Computed over
// the first answer of every qa, so the histogram total always equals
// the number of qas in the dataset.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::qa_pair::SquadDataset;

/// Bucket for answers that carry no `span_type` tag
pub const UNTAGGED: &str = "untagged";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanHistogram {
    counts: BTreeMap<String, usize>,
}

impl SpanHistogram {
    pub fn from_dataset(dataset: &SquadDataset) -> Self {
        let mut counts = BTreeMap::new();
        for qa in dataset.qas() {
            let span_type = qa
                .answers
                .first()
                .and_then(|a| a.span_type.as_deref())
                .unwrap_or(UNTAGGED);
            *counts.entry(span_type.to_string()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn get(&self, span_type: &str) -> usize {
        self.counts.get(span_type).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
