// ============================================================
// Layer 4 — Span Extender
// ============================================================
// Widens named-entity answers. For each qa of the default layer, the
// other layers' indices are consulted at the same (uid, sentence);
// a candidate is taken when it strictly contains the current answer
// and passes the length guard:
//
//   clause_len    = words(question + " " + answer) - 1   (minus the marker)
//   candidate_len = words(candidate)
//   accept when clause_len * ratio < candidate_len
//
// On acceptance the answer becomes the candidate and the question is
// rebuilt from the candidate's own question as read, with the
// placeholder replaced by the recorded entity type. Questions that are
// not extended are written back as read.
//
// Span types are tried in configured order, candidates in dataset
// order, and the first accepted candidate ends the search. The output
// depends on that order.

use std::collections::BTreeMap;

use crate::data::aligner::{AlignedLayer, AlignedParagraph, AlignedPassage, AlignedQa};
use crate::data::markers::EntityMarkers;
use crate::data::span_index::SpanIndex;
use crate::domain::brackets::{denormalize, normalize, NormalizedText};
use crate::domain::error::CorpusResult;
use crate::domain::span::{AnswerRange, SummaryIdx};

/// Default length-ratio threshold
pub const DEFAULT_LENGTH_RATIO: f64 = 0.8;

pub struct SpanExtender {
    markers:           EntityMarkers,
    default_span_type: String,
    length_ratio:      f64,
}

impl SpanExtender {
    pub fn new(markers: EntityMarkers, default_span_type: impl Into<String>, length_ratio: f64) -> Self {
        Self {
            markers,
            default_span_type: default_span_type.into(),
            length_ratio,
        }
    }

    /// Extend every answer of `layer` using the other layers in `indices`.
    ///
    /// `indices` must be in configured span-type order. The index of the
    /// default layer itself, if present, is skipped.
    pub fn extend(&self, layer: &AlignedLayer, indices: &[SpanIndex]) -> CorpusResult<AlignedLayer> {
        let others: Vec<&SpanIndex> = indices
            .iter()
            .filter(|idx| idx.span_type() != self.default_span_type)
            .collect();

        let mut extended: BTreeMap<String, usize> = BTreeMap::new();
        let mut passages = Vec::with_capacity(layer.passages.len());

        for passage in &layer.passages {
            let mut paragraphs = Vec::with_capacity(passage.paragraphs.len());
            for para in &passage.paragraphs {
                let mut qas = Vec::with_capacity(para.qas.len());
                for qa in &para.qas {
                    let out = self.extend_qa(&para.context, qa, &others)?;
                    if out.answer.span_type != self.default_span_type {
                        *extended.entry(out.answer.span_type.clone()).or_insert(0) += 1;
                    }
                    qas.push(out);
                }
                paragraphs.push(AlignedParagraph {
                    context: para.context.clone(),
                    qas,
                    extra: para.extra.clone(),
                });
            }
            passages.push(AlignedPassage { paragraphs, extra: passage.extra.clone() });
        }

        tracing::info!(
            "Extended {} of {} '{}' answers: {:?}",
            extended.values().sum::<usize>(),
            layer.qa_count(),
            self.default_span_type,
            extended
        );

        Ok(AlignedLayer {
            span_type: self.default_span_type.clone(),
            passages,
            extra: layer.extra.clone(),
        })
    }

    fn extend_qa(&self, context: &str, qa: &AlignedQa, others: &[&SpanIndex]) -> CorpusResult<AlignedQa> {
        let entity = self.markers.entity_type(&qa.question).cloned();

        let mut out = qa.clone();
        out.answer.span_type = self.default_span_type.clone();
        if let Some(e) = &entity {
            out.entity_type = Some(e.to_string());
        }

        if qa.summary_idx == SummaryIdx::Unresolved {
            return Ok(out);
        }

        let clause_len = clause_len(&qa.question, &qa.answer.text);

        for index in others {
            for candidate in index.candidates(&qa.uid, qa.summary_idx) {
                if !candidate.span.strictly_contains(&qa.answer.span) {
                    continue;
                }
                if !passes_length_guard(clause_len, candidate.word_count(), self.length_ratio) {
                    continue;
                }

                let answer = AnswerRange {
                    span:      candidate.span,
                    text:      candidate.text.clone(),
                    span_type: index.span_type().to_string(),
                    question:  candidate.question.clone(),
                };
                answer.verify(&qa.id, context)?;

                out.source_question = self.rewrite_question(&candidate.question, entity.as_ref());
                out.question        = normalize(&out.source_question);
                out.answer          = answer;
                tracing::debug!(
                    "{}: '{}' → '{}' ({})",
                    qa.id,
                    qa.answer.text,
                    out.answer.text,
                    out.answer.span_type
                );
                return Ok(out);
            }
        }

        Ok(out)
    }

    /// The candidate's question with the placeholder replaced by the
    /// entity type. Without a recognised entity type the template is
    /// used as is.
    fn rewrite_question(&self, template: &str, entity: Option<&NormalizedText>) -> String {
        match entity {
            Some(e) => template.replace(&denormalize(self.markers.placeholder()), &denormalize(e)),
            None    => template.to_string(),
        }
    }
}

/// Words in `question + " " + answer`, minus one for the marker.
pub fn clause_len(question: &NormalizedText, answer_text: &str) -> usize {
    (question.word_count() + answer_text.split_whitespace().count()).saturating_sub(1)
}

/// Accept only candidates longer than `ratio` of the clause.
pub fn passes_length_guard(clause_len: usize, candidate_len: usize, ratio: f64) -> bool {
    (clause_len as f64) * ratio < candidate_len as f64
}
