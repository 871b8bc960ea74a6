// ============================================================
// Layer 3 — QA Dataset Types
// ============================================================
// The SQuAD-style nested shape every span-type layer is stored in:
//
//   { data: [ { paragraphs: [ { context, qas: [ { id, question,
//                                                 answers: [...] } ] } ] } ] }
//
// The first answer of each qa is authoritative; any others are
// carried through untouched. Fields this engine does not know about
// (titles, versions, is_impossible, ...) are kept in `extra` so the
// output has the same shape as the input.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::span::SummaryIdx;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SquadDataset {
    pub data: Vec<Passage>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SquadDataset {
    /// Iterate every qa in dataset order.
    pub fn qas(&self) -> impl Iterator<Item = &QaItem> {
        self.data
            .iter()
            .flat_map(|p| p.paragraphs.iter())
            .flat_map(|p| p.qas.iter())
    }

    pub fn qa_count(&self) -> usize {
        self.qas().count()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Passage {
    pub paragraphs: Vec<Paragraph>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paragraph {
    pub context: String,
    pub qas:     Vec<QaItem>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Paragraph {
    pub fn new(context: impl Into<String>, qas: Vec<QaItem>) -> Self {
        Self { context: context.into(), qas, extra: Map::new() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaItem {
    /// `{uid}_{suffix}`
    pub id:       String,
    pub question: String,
    pub answers:  Vec<Answer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_idx: Option<SummaryIdx>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QaItem {
    pub fn new(id: impl Into<String>, question: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            id:          id.into(),
            question:    question.into(),
            answers,
            summary_idx: None,
            extra:       Map::new(),
        }
    }

    /// The owning document's uid: the id prefix before the first `_`.
    pub fn uid(&self) -> &str {
        self.id.split_once('_').map_or(self.id.as_str(), |(uid, _)| uid)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub text:         String,
    pub answer_start: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Answer {
    pub fn new(text: impl Into<String>, answer_start: usize) -> Self {
        Self {
            text: text.into(),
            answer_start,
            span_type: None,
            entity_type: None,
            extra: Map::new(),
        }
    }
}
