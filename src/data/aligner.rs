// ============================================================
// Layer 4 — Summary Aligner
// ============================================================
// Finds, for each cloze question, the summary sentence it was cut
// from. The question is split around its entity marker and the text
// on either side ("anchors") is searched for in the document's
// tokenized summary:
//
//   question: "Ông PERSON sinh năm 1990"
//   left:     "Ông "            right: " sinh năm 1990"
//
// Sentences are scanned in order; each one is tested against the
// left anchor, then the right anchor. First hit wins. Two empty
// anchors resolve to `SummaryIdx::Unresolved` without error.
//
// Aligning a layer is a pure transformation: the raw dataset goes in,
// an `AlignedLayer` with normalized questions, resolved sentence
// indices and verified answer ranges comes out. The raw question is
// kept alongside and is what gets written back.

use serde_json::{Map, Value};

use crate::data::markers::EntityMarkers;
use crate::domain::brackets::{normalize, NormalizedText};
use crate::domain::document::SummaryStore;
use crate::domain::error::{CorpusError, CorpusResult};
use crate::domain::qa_pair::{Answer, Paragraph, Passage, QaItem, SquadDataset};
use crate::domain::span::{AnswerRange, SummaryIdx};

// ─── Aligned layer ────────────────────────────────────────────────────────────

/// A span-type layer after alignment. Keeps the nesting of the source
/// dataset so it can be written back out in the same shape.
#[derive(Debug, Clone)]
pub struct AlignedLayer {
    pub span_type: String,
    pub passages:  Vec<AlignedPassage>,
    pub extra:     Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct AlignedPassage {
    pub paragraphs: Vec<AlignedParagraph>,
    pub extra:      Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct AlignedParagraph {
    pub context: String,
    pub qas:     Vec<AlignedQa>,
    pub extra:   Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct AlignedQa {
    pub id:          String,
    pub uid:         String,

    /// Question as read, or as rewritten by the extender
    pub source_question: String,

    /// `source_question` normalized, for matching only
    pub question:    NormalizedText,
    pub summary_idx: SummaryIdx,

    /// The authoritative (first) answer
    pub answer: AnswerRange,

    /// Entity type recorded for the answer, set by the extender
    pub entity_type: Option<String>,

    /// Unknown keys of the first answer
    pub answer_extra: Map<String, Value>,

    /// Answers after the first, passed through untouched
    pub other_answers: Vec<Answer>,
    pub extra:         Map<String, Value>,
}

impl AlignedLayer {
    pub fn qas(&self) -> impl Iterator<Item = (&str, &AlignedQa)> {
        self.passages
            .iter()
            .flat_map(|p| p.paragraphs.iter())
            .flat_map(|p| p.qas.iter().map(move |qa| (p.context.as_str(), qa)))
    }

    pub fn qa_count(&self) -> usize {
        self.qas().count()
    }

    /// Back to the on-disk shape: `summary_idx` on every qa, the first
    /// answer tagged with span and entity type.
    pub fn to_dataset(&self) -> SquadDataset {
        SquadDataset {
            data: self
                .passages
                .iter()
                .map(|p| Passage {
                    paragraphs: p
                        .paragraphs
                        .iter()
                        .map(|para| Paragraph {
                            context: para.context.clone(),
                            qas:     para.qas.iter().map(AlignedQa::to_item).collect(),
                            extra:   para.extra.clone(),
                        })
                        .collect(),
                    extra: p.extra.clone(),
                })
                .collect(),
            extra: self.extra.clone(),
        }
    }
}

impl AlignedQa {
    fn to_item(&self) -> QaItem {
        let mut answers = Vec::with_capacity(1 + self.other_answers.len());
        answers.push(Answer {
            text:         self.answer.text.clone(),
            answer_start: self.answer.span.start,
            span_type:    Some(self.answer.span_type.clone()),
            entity_type:  self.entity_type.clone(),
            extra:        self.answer_extra.clone(),
        });
        answers.extend(self.other_answers.iter().cloned());

        QaItem {
            id:          self.id.clone(),
            question:    self.source_question.clone(),
            answers,
            summary_idx: Some(self.summary_idx),
            extra:       self.extra.clone(),
        }
    }
}

// ─── SummaryAligner ───────────────────────────────────────────────────────────

pub struct SummaryAligner {
    markers: EntityMarkers,
}

impl SummaryAligner {
    pub fn new(markers: EntityMarkers) -> Self {
        Self { markers }
    }

    /// Resolve the summary sentence `question` was generated from.
    pub fn align(
        &self,
        qid:      &str,
        question: &NormalizedText,
        summary:  &[NormalizedText],
    ) -> CorpusResult<SummaryIdx> {
        let (_, left, right) =
            self.markers
                .split(question)
                .ok_or_else(|| CorpusError::MissingEntityMarker {
                    qid:      qid.to_string(),
                    question: question.to_string(),
                })?;

        if left.is_empty() && right.is_empty() {
            return Ok(SummaryIdx::Unresolved);
        }

        let hit = summary.iter().position(|sentence| {
            (!left.is_empty() && sentence.contains(left))
                || (!right.is_empty() && sentence.contains(right))
        });

        hit.map(SummaryIdx::Sentence)
            .ok_or_else(|| CorpusError::AlignmentFailure {
                qid:      qid.to_string(),
                question: question.to_string(),
                left:     left.to_string(),
                right:    right.to_string(),
                summary:  summary.iter().map(NormalizedText::to_string).collect(),
            })
    }

    /// Align every qa of one span-type layer against `store`.
    pub fn align_layer(
        &self,
        span_type: &str,
        dataset:   &SquadDataset,
        store:     &SummaryStore,
    ) -> CorpusResult<AlignedLayer> {
        let mut passages = Vec::with_capacity(dataset.data.len());

        for passage in &dataset.data {
            let mut paragraphs = Vec::with_capacity(passage.paragraphs.len());
            for para in &passage.paragraphs {
                let qas = para
                    .qas
                    .iter()
                    .map(|qa| self.align_qa(span_type, &para.context, qa, store))
                    .collect::<CorpusResult<Vec<_>>>()?;
                paragraphs.push(AlignedParagraph {
                    context: para.context.clone(),
                    qas,
                    extra: para.extra.clone(),
                });
            }
            passages.push(AlignedPassage { paragraphs, extra: passage.extra.clone() });
        }

        let layer = AlignedLayer {
            span_type: span_type.to_string(),
            passages,
            extra: dataset.extra.clone(),
        };
        let unresolved = layer
            .qas()
            .filter(|(_, qa)| qa.summary_idx == SummaryIdx::Unresolved)
            .count();
        tracing::info!(
            "Aligned {} questions of span type '{}' ({} unresolved)",
            layer.qa_count(),
            span_type,
            unresolved
        );
        Ok(layer)
    }

    fn align_qa(
        &self,
        span_type: &str,
        context:   &str,
        qa:        &QaItem,
        store:     &SummaryStore,
    ) -> CorpusResult<AlignedQa> {
        let uid = qa.uid();
        let doc = store.get(uid).ok_or_else(|| CorpusError::UnknownDocument {
            qid: qa.id.clone(),
            uid: uid.to_string(),
        })?;

        let question    = normalize(&qa.question);
        let summary_idx = self.align(&qa.id, &question, &doc.summary)?;

        let (first, rest) = qa
            .answers
            .split_first()
            .ok_or_else(|| CorpusError::MissingAnswer { qid: qa.id.clone() })?;
        let answer = AnswerRange::new(
            &qa.id,
            context,
            first.answer_start,
            first.text.clone(),
            span_type,
            qa.question.clone(),
        )?;

        Ok(AlignedQa {
            id: qa.id.clone(),
            uid: uid.to_string(),
            source_question: qa.question.clone(),
            question,
            summary_idx,
            answer,
            entity_type: first.entity_type.clone(),
            answer_extra: first.extra.clone(),
            other_answers: rest.to_vec(),
            extra: qa.extra.clone(),
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::SummaryDocument;
    use crate::domain::qa_pair::Answer;

    fn aligner() -> SummaryAligner {
        SummaryAligner::new(EntityMarkers::new(&["ANIMAL", "PLACEHOLDER"], "PLACEHOLDER"))
    }

    fn summary(sentences: &[&str]) -> Vec<NormalizedText> {
        sentences.iter().map(|s| normalize(s)).collect()
    }

    #[test]
    fn test_left_anchor_picks_sentence() {
        let s = summary(&["A cat sat.", "A dog ran."]);
        let q = normalize("A dog ANIMAL");
        for _ in 0..3 {
            assert_eq!(aligner().align("u_1", &q, &s).unwrap(), SummaryIdx::Sentence(1));
        }
    }

    #[test]
    fn test_right_anchor_when_left_is_empty() {
        let s = summary(&["A cat sat.", "A dog ran."]);
        let q = normalize("ANIMAL ran.");
        assert_eq!(aligner().align("u_1", &q, &s).unwrap(), SummaryIdx::Sentence(1));
    }

    #[test]
    fn test_sentence_order_beats_anchor_order() {
        // Sentence 0 matches only the right anchor, sentence 1 only the left
        let s = summary(&["the dog ran.", "A big cat"]);
        let q = normalize("A big ANIMAL ran.");
        assert_eq!(aligner().align("u_1", &q, &s).unwrap(), SummaryIdx::Sentence(0));
    }

    #[test]
    fn test_empty_anchors_are_unresolved() {
        let s = summary(&["anything"]);
        let q = normalize("ANIMAL");
        assert_eq!(aligner().align("u_1", &q, &s).unwrap(), SummaryIdx::Unresolved);
    }

    #[test]
    fn test_missing_marker_is_fatal() {
        let err = aligner().align("u_1", &normalize("no marker"), &summary(&["x"]));
        assert!(matches!(err, Err(CorpusError::MissingEntityMarker { .. })));
    }

    #[test]
    fn test_no_match_is_fatal() {
        let err = aligner().align("u_1", &normalize("a ANIMAL b"), &summary(&["xyz"]));
        match err {
            Err(CorpusError::AlignmentFailure { left, right, summary, .. }) => {
                assert_eq!(left, "a ");
                assert_eq!(right, " b");
                assert_eq!(summary, vec!["xyz".to_string()]);
            }
            other => panic!("expected alignment failure, got {other:?}"),
        }
    }

    #[test]
    fn test_unmatched_right_anchor_is_fatal() {
        // Left anchor empty, right anchor present but nowhere in the summary
        let err = aligner().align("u_1", &normalize("ANIMAL zzz"), &summary(&["A cat sat."]));
        match err {
            Err(CorpusError::AlignmentFailure { left, right, .. }) => {
                assert_eq!(left, "");
                assert_eq!(right, " zzz");
            }
            other => panic!("expected alignment failure, got {other:?}"),
        }
    }

    #[test]
    fn test_brackets_in_question_match_tokenized_summary() {
        let s = summary(&["theo khoản -LRB- a -RRB- , ANIMAL"]);
        let q = normalize("theo khoản ( a ) , ANIMAL");
        assert_eq!(aligner().align("u_1", &q, &s).unwrap(), SummaryIdx::Sentence(0));
    }

    fn store() -> SummaryStore {
        let mut store = SummaryStore::new();
        store.insert(
            "d1",
            SummaryDocument {
                document: "and a cat sat down".to_string(),
                summary:  summary(&["and a cat sat down"]),
            },
        );
        store
    }

    fn dataset(id: &str, answers: Vec<Answer>) -> SquadDataset {
        SquadDataset {
            data: vec![Passage {
                paragraphs: vec![Paragraph::new(
                    "and a cat sat down",
                    vec![QaItem::new(id, "and a ANIMAL sat down", answers)],
                )],
                extra: Map::new(),
            }],
            extra: Map::new(),
        }
    }

    #[test]
    fn test_align_layer_builds_ranges() {
        let ds    = dataset("d1_0", vec![Answer::new("cat", 6), Answer::new("a cat", 4)]);
        let layer = aligner().align_layer("NE", &ds, &store()).unwrap();
        let (_, qa) = layer.qas().next().unwrap();

        assert_eq!(qa.uid, "d1");
        assert_eq!(qa.summary_idx, SummaryIdx::Sentence(0));
        assert_eq!(qa.answer.span.end, 9);
        assert_eq!(qa.answer.span_type, "NE");
        assert_eq!(qa.other_answers.len(), 1);
    }

    #[test]
    fn test_align_layer_rejects_unknown_document() {
        let ds  = dataset("d9_0", vec![Answer::new("cat", 6)]);
        let err = aligner().align_layer("NE", &ds, &store());
        assert!(matches!(err, Err(CorpusError::UnknownDocument { .. })));
    }

    #[test]
    fn test_align_layer_rejects_bad_offsets() {
        let ds  = dataset("d1_0", vec![Answer::new("cat", 7)]);
        let err = aligner().align_layer("NE", &ds, &store());
        assert!(matches!(err, Err(CorpusError::TextIntegrity { .. })));
    }

    #[test]
    fn test_align_layer_rejects_missing_answer() {
        let ds  = dataset("d1_0", vec![]);
        let err = aligner().align_layer("NE", &ds, &store());
        assert!(matches!(err, Err(CorpusError::MissingAnswer { .. })));
    }

    #[test]
    fn test_to_dataset_tags_answers() {
        let ds    = dataset("d1_0", vec![Answer::new("cat", 6)]);
        let layer = aligner().align_layer("NE", &ds, &store()).unwrap();
        let out   = layer.to_dataset();
        let qa    = out.qas().next().unwrap();

        assert_eq!(qa.summary_idx, Some(SummaryIdx::Sentence(0)));
        assert_eq!(qa.answers[0].span_type.as_deref(), Some("NE"));
        assert_eq!(qa.question, "and a ANIMAL sat down");
    }

    #[test]
    fn test_parser_tokens_in_question_written_back_verbatim() {
        let mut ds = dataset("d1_0", vec![Answer::new("cat", 6)]);
        ds.data[0].paragraphs[0].qas[0].question = "and a ANIMAL sat -LRB- x -RRB-".to_string();

        let layer = aligner().align_layer("NE", &ds, &store()).unwrap();
        let out   = layer.to_dataset();
        assert_eq!(out.qas().next().unwrap().question, "and a ANIMAL sat -LRB- x -RRB-");
    }
}
