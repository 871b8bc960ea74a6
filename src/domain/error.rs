// ============================================================
// Layer 3 — Data-Integrity Errors
// ============================================================
// Every variant is fatal: each one means the input datasets are
// malformed or an offset got corrupted. There is no retry path.

use thiserror::Error;

pub type CorpusResult<T> = std::result::Result<T, CorpusError>;

#[derive(Error, Debug)]
pub enum CorpusError {
    /// The question contains none of the configured entity-type markers
    #[error("question {qid:?} contains no configured entity marker: {question:?}")]
    MissingEntityMarker { qid: String, question: String },

    /// At least one anchor is non-empty and no summary sentence contains
    /// a non-empty anchor
    #[error(
        "question {qid:?} matches no summary sentence \
         (left anchor {left:?}, right anchor {right:?}); question: {question:?}; summary: {summary:?}"
    )]
    AlignmentFailure {
        qid:      String,
        question: String,
        left:     String,
        right:    String,
        summary:  Vec<String>,
    },

    /// `text` differs from `context[start..end]` (character offsets)
    #[error("answer of {qid:?} is {text:?} but context[{start}..{end}] is {found:?}")]
    TextIntegrity {
        qid:   String,
        text:  String,
        start: usize,
        end:   usize,
        found: Option<String>,
    },

    #[error("question {qid:?} has no answers")]
    MissingAnswer { qid: String },

    #[error("answer of {qid:?} at offset {start} is empty")]
    EmptyAnswer { qid: String, start: usize },

    #[error("question {qid:?} refers to document {uid:?}, which is not in the summary corpus")]
    UnknownDocument { qid: String, uid: String },
}
