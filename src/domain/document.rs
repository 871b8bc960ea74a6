// ============================================================
// Layer 3 — Document Domain Types
// ============================================================
// A document of the parallel corpus: the full passage plus an
// ordered list of summary sentences. Questions were generated from
// those sentences, which is what alignment recovers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::brackets::NormalizedText;

/// One record of the raw document/summary corpus, as read from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusRecord {
    pub uid: String,

    /// The full passage text
    pub document: String,

    /// Summary sentences, untokenized
    pub summary: Vec<String>,
}

impl CorpusRecord {
    pub fn new(
        uid:      impl Into<String>,
        document: impl Into<String>,
        summary:  Vec<String>,
    ) -> Self {
        Self {
            uid:      uid.into(),
            document: document.into(),
            summary,
        }
    }
}

/// A document whose summary sentences have been tokenized and
/// bracket-normalized. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryDocument {
    pub document: String,
    pub summary:  Vec<NormalizedText>,
}

/// Lookup from document uid to its tokenized summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryStore {
    docs: HashMap<String, SummaryDocument>,
}

impl SummaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document; a later record with the same uid replaces the
    /// earlier one.
    pub fn insert(&mut self, uid: impl Into<String>, doc: SummaryDocument) {
        self.docs.insert(uid.into(), doc);
    }

    pub fn get(&self, uid: &str) -> Option<&SummaryDocument> {
        self.docs.get(uid)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SummaryDocument)> {
        self.docs.iter()
    }
}

impl FromIterator<(String, SummaryDocument)> for SummaryStore {
    fn from_iter<I: IntoIterator<Item = (String, SummaryDocument)>>(iter: I) -> Self {
        Self { docs: iter.into_iter().collect() }
    }
}
