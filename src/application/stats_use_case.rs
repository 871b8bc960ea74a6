// ============================================================
// Layer 2 — StatsUseCase
// ============================================================
// Recomputes the span-type histogram of an already written dataset.

use anyhow::Result;
use std::path::PathBuf;

use crate::data::{loader::load_layer, statistics::SpanHistogram};
use crate::infra::report::{log_histogram, SpanReport};

pub struct StatsUseCase {
    dataset: PathBuf,
    report:  Option<PathBuf>,
}

impl StatsUseCase {
    pub fn new(dataset: impl Into<PathBuf>, report: Option<PathBuf>) -> Self {
        Self { dataset: dataset.into(), report }
    }

    pub fn execute(&self) -> Result<SpanHistogram> {
        let dataset   = load_layer(&self.dataset)?;
        let histogram = SpanHistogram::from_dataset(&dataset);

        log_histogram(&histogram);
        if let Some(report) = &self.report {
            SpanReport::new(report).write(&histogram)?;
        }
        Ok(histogram)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_counts_written_dataset() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(
            &path,
            r#"{"data": [{"paragraphs": [{"context": "ab", "qas": [
                {"id": "d_0", "question": "q", "answers": [{"text": "a", "answer_start": 0, "span_type": "NE"}]},
                {"id": "d_1", "question": "q", "answers": [{"text": "ab", "answer_start": 0, "span_type": "clause"}]}
            ]}]}]}"#,
        )
        .unwrap();

        let report    = dir.path().join("spans.csv");
        let histogram = StatsUseCase::new(&path, Some(report.clone())).execute().unwrap();
        assert_eq!(histogram.total(), 2);
        assert_eq!(histogram.get("clause"), 1);
        assert!(report.exists());
    }
}
