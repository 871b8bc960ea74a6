// ============================================================
// Layer 4 — Summary Tokenization
// ============================================================
// Runs every summary sentence of the corpus through the sentence
// tokenizer, joins the tokens with single spaces and normalizes the
// result. Documents are independent, so they are processed on a
// rayon pool; results come back in corpus order and are keyed by uid
// before anything downstream sees them.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::domain::brackets::normalize;
use crate::domain::document::{CorpusRecord, SummaryDocument, SummaryStore};
use crate::domain::traits::SentenceTokenizer;

pub struct SummaryTokenizer<'t> {
    tokenizer: &'t dyn SentenceTokenizer,
    /// 0 = rayon default
    threads:   usize,
    progress:  bool,
}

impl<'t> SummaryTokenizer<'t> {
    pub fn new(tokenizer: &'t dyn SentenceTokenizer, threads: usize, progress: bool) -> Self {
        Self { tokenizer, threads, progress }
    }

    /// Tokenize a single sentence into its cached form.
    pub fn sentence(&self, sentence: &str) -> Result<String> {
        Ok(self.tokenizer.tokenize(sentence)?.join(" "))
    }

    /// Tokenize the summaries of every record.
    pub fn tokenize_corpus(&self, records: &[CorpusRecord]) -> Result<SummaryStore> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
            .context("Cannot build tokenization thread pool")?;

        let bar = if self.progress {
            let bar = ProgressBar::new(records.len() as u64);
            if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len} ({eta})") {
                bar.set_style(style);
            }
            bar.set_message("tokenizing summaries");
            bar
        } else {
            ProgressBar::hidden()
        };

        tracing::info!(
            "Tokenizing summaries of {} documents with '{}'",
            records.len(),
            self.tokenizer.name()
        );

        let docs: Vec<(String, SummaryDocument)> = pool.install(|| {
            records
                .par_iter()
                .map(|record| {
                    let doc = self.document(record);
                    bar.inc(1);
                    doc.map(|d| (record.uid.clone(), d))
                })
                .collect::<Result<Vec<_>>>()
        })?;
        bar.finish_and_clear();

        // Reassembled in corpus order, so a duplicated uid keeps its last record
        Ok(docs.into_iter().collect())
    }

    fn document(&self, record: &CorpusRecord) -> Result<SummaryDocument> {
        let summary = record
            .summary
            .iter()
            .map(|s| {
                self.sentence(s)
                    .map(|joined| normalize(&joined))
                    .with_context(|| format!("Cannot tokenize summary of '{}'", record.uid))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SummaryDocument { document: record.document.clone(), summary })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    struct SpaceTokenizer;

    impl SentenceTokenizer for SpaceTokenizer {
        fn name(&self) -> &str {
            "space"
        }

        fn tokenize(&self, sentence: &str) -> Result<Vec<String>> {
            Ok(sentence
                .replace('(', " ( ")
                .replace(')', " ) ")
                .split_whitespace()
                .map(str::to_string)
                .collect())
        }
    }

    #[test]
    fn test_summaries_are_tokenized_and_normalized() {
        let records = vec![
            CorpusRecord::new("d1", "doc one", vec!["Luật (sửa đổi) năm  2020".to_string()]),
            CorpusRecord::new("d2", "doc two", vec!["a".to_string(), "b  c".to_string()]),
        ];
        let store = SummaryTokenizer::new(&SpaceTokenizer, 2, false)
            .tokenize_corpus(&records)
            .unwrap();

        assert_eq!(store.len(), 2);
        let d1 = store.get("d1").unwrap();
        assert_eq!(d1.document, "doc one");
        assert_eq!(d1.summary[0].as_str(), "Luật -LRB- sửa đổi -RRB- năm 2020");
        assert_eq!(store.get("d2").unwrap().summary[1].as_str(), "b c");
    }

    #[test]
    fn test_duplicate_uid_keeps_last_record() {
        let records = vec![
            CorpusRecord::new("d1", "first", vec![]),
            CorpusRecord::new("d1", "second", vec![]),
        ];
        let store = SummaryTokenizer::new(&SpaceTokenizer, 1, false)
            .tokenize_corpus(&records)
            .unwrap();
        assert_eq!(store.get("d1").unwrap().document, "second");
    }
}
