// ============================================================
// Layer 3 — Answer Spans
// ============================================================
// An answer is a half-open character range [start, end) into the
// paragraph context. Offsets count Unicode scalar values, the same
// unit the QA files were produced with, so they cannot be used to
// slice a Rust `&str` directly; use `char_slice`.

use serde::{Deserialize, Serialize};

use crate::domain::error::{CorpusError, CorpusResult};

/// Which summary sentence a question was generated from.
///
/// Serialised as the sentence index, or -1 when unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum SummaryIdx {
    Sentence(usize),
    Unresolved,
}

impl From<i64> for SummaryIdx {
    fn from(v: i64) -> Self {
        usize::try_from(v).map_or(SummaryIdx::Unresolved, SummaryIdx::Sentence)
    }
}

impl From<SummaryIdx> for i64 {
    fn from(idx: SummaryIdx) -> Self {
        match idx {
            SummaryIdx::Sentence(i) => i as i64,
            SummaryIdx::Unresolved  => -1,
        }
    }
}

/// Half-open character range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end:   usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Containment with at least one strict boundary. Equal ranges never
    /// qualify.
    pub fn strictly_contains(&self, other: &Span) -> bool {
        (self.start < other.start && self.end >= other.end)
            || (self.start <= other.start && self.end > other.end)
    }
}

/// Slice `text` by character offsets. `None` when out of range.
pub fn char_slice(text: &str, start: usize, end: usize) -> Option<&str> {
    if start > end {
        return None;
    }
    let mut indices = text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len()));
    let from = indices.nth(start)?;
    let to   = if end == start { from } else { indices.nth(end - start - 1)? };
    Some(&text[from..to])
}

/// One answer of one span-type layer, with the question it came from
/// (as read, not normalized).
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRange {
    pub span:      Span,
    pub text:      String,
    pub span_type: String,
    pub question:  String,
}

impl AnswerRange {
    /// Build a range from an `answer_start` and its text, checking that
    /// the text really sits at that offset in `context`.
    pub fn new(
        qid:       &str,
        context:   &str,
        start:     usize,
        text:      impl Into<String>,
        span_type: impl Into<String>,
        question:  impl Into<String>,
    ) -> CorpusResult<Self> {
        let text = text.into();
        let len  = text.chars().count();
        if len == 0 {
            return Err(CorpusError::EmptyAnswer { qid: qid.to_string(), start });
        }
        let range = Self {
            span: Span::new(start, start + len),
            text,
            span_type: span_type.into(),
            question: question.into(),
        };
        range.verify(qid, context)?;
        Ok(range)
    }

    /// Check `text == context[start..end]`.
    pub fn verify(&self, qid: &str, context: &str) -> CorpusResult<()> {
        let found = char_slice(context, self.span.start, self.span.end);
        if found == Some(self.text.as_str()) {
            return Ok(());
        }
        Err(CorpusError::TextIntegrity {
            qid:   qid.to_string(),
            text:  self.text.clone(),
            start: self.span.start,
            end:   self.span.end,
            found: found.map(str::to_string),
        })
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_ranges_do_not_contain() {
        assert!(!Span::new(1, 5).strictly_contains(&Span::new(1, 5)));
    }

    #[test]
    fn test_wider_range_contains() {
        assert!(Span::new(0, 5).strictly_contains(&Span::new(1, 4)));
        assert!(!Span::new(1, 4).strictly_contains(&Span::new(0, 5)));
    }

    #[test]
    fn test_shared_boundary_contains() {
        assert!(Span::new(0, 4).strictly_contains(&Span::new(1, 4)));
        assert!(Span::new(1, 5).strictly_contains(&Span::new(1, 4)));
    }

    #[test]
    fn test_overlap_is_not_containment() {
        assert!(!Span::new(0, 3).strictly_contains(&Span::new(2, 5)));
    }

    #[test]
    fn test_char_slice_counts_characters() {
        let s = "Hà Nội là thủ đô";
        assert_eq!(char_slice(s, 3, 6), Some("Nội"));
        assert_eq!(char_slice(s, 0, 0), Some(""));
        assert_eq!(char_slice(s, 10, 16), Some("thủ đô"));
        assert_eq!(char_slice(s, 10, 17), None);
    }

    #[test]
    fn test_summary_idx_serde() {
        assert_eq!(serde_json::to_string(&SummaryIdx::Sentence(2)).unwrap(), "2");
        assert_eq!(serde_json::to_string(&SummaryIdx::Unresolved).unwrap(), "-1");
        let idx: SummaryIdx = serde_json::from_str("-1").unwrap();
        assert_eq!(idx, SummaryIdx::Unresolved);
    }

    #[test]
    fn test_answer_range_checks_context() {
        let ctx = "and a cat sat down";
        let ok  = AnswerRange::new("d1_0", ctx, 6, "cat", "NE", "q");
        assert_eq!(ok.unwrap().span, Span::new(6, 9));

        let bad = AnswerRange::new("d1_0", ctx, 5, "cat", "NE", "q");
        assert!(matches!(bad, Err(CorpusError::TextIntegrity { .. })));
    }

    #[test]
    fn test_empty_answer_rejected() {
        let r = AnswerRange::new("d1_0", "abc", 1, "", "NE", "q");
        assert!(matches!(r, Err(CorpusError::EmptyAnswer { .. })));
    }
}
