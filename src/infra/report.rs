// ============================================================
// Layer 6 — Span-Type Report
// ============================================================
// Writes the final span-type histogram as CSV next to the output:
//
//   span_type,count,share
//   NE,8123,0.742100
//   clause,2816,0.257900
//
// Rows come in span-type name order.

use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::data::statistics::SpanHistogram;

pub struct SpanReport {
    csv_path: PathBuf,
}

impl SpanReport {
    pub fn new(csv_path: impl Into<PathBuf>) -> Self {
        Self { csv_path: csv_path.into() }
    }

    /// Overwrite the CSV with one row per span type.
    pub fn write(&self, histogram: &SpanHistogram) -> Result<()> {
        if let Some(parent) = self.csv_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.csv_path)
            .with_context(|| format!("Cannot create report '{}'", self.csv_path.display()))?;
        let mut f = BufWriter::new(file);

        writeln!(f, "span_type,count,share")?;
        let total = histogram.total().max(1) as f64;
        for (span_type, count) in histogram.iter() {
            writeln!(f, "{},{},{:.6}", span_type, count, count as f64 / total)?;
        }
        f.flush()?;

        tracing::debug!("Wrote span report '{}'", self.csv_path.display());
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

/// Log the histogram, one line per span type.
pub fn log_histogram(histogram: &SpanHistogram) {
    for (span_type, count) in histogram.iter() {
        tracing::info!("  {:<12} {}", span_type, count);
    }
    tracing::info!("  {:<12} {}", "total", histogram.total());
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::qa_pair::{Answer, Paragraph, Passage, QaItem, SquadDataset};

    #[test]
    fn test_csv_rows() {
        let answer = |t: &str| Answer { span_type: Some(t.to_string()), ..Answer::new("x", 0) };
        let qas = vec![
            QaItem::new("d_0", "q", vec![answer("NE")]),
            QaItem::new("d_1", "q", vec![answer("NE")]),
            QaItem::new("d_2", "q", vec![answer("NE")]),
            QaItem::new("d_3", "q", vec![answer("clause")]),
        ];
        let ds = SquadDataset {
            data: vec![Passage {
                paragraphs: vec![Paragraph::new("x".to_string(), qas)],
                ..Default::default()
            }],
            ..Default::default()
        };

        let dir    = tempfile::tempdir().unwrap();
        let report = SpanReport::new(dir.path().join("spans.csv"));
        report.write(&SpanHistogram::from_dataset(&ds)).unwrap();

        let csv = fs::read_to_string(report.csv_path()).unwrap();
        assert_eq!(csv, "span_type,count,share\nNE,3,0.750000\nclause,1,0.250000\n");
    }
}
