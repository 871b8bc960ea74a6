// ============================================================
// Layer 6 — Sentence Tokenizers
// ============================================================
// Builds the SentenceTokenizer used for summary sentences.
//
// Two kinds wrap a HuggingFace `tokenizers` pre-tokenizer:
//   whitespace → `Whitespace`        (\w+|[^\w\s]+)
//   bert       → `BertPreTokenizer`  (whitespace + every punctuation char)
// and one assumes the corpus was tokenized upstream:
//   pretokenized → split on whitespace only
//
// The kind name goes into the summary cache key, so switching kinds
// invalidates cached summaries.

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tokenizers::pre_tokenizers::{bert::BertPreTokenizer, whitespace::Whitespace};
use tokenizers::{OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer};

use crate::domain::traits::SentenceTokenizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    #[default]
    Whitespace,
    Bert,
    Pretokenized,
}

impl TokenizerKind {
    pub fn build(self) -> Box<dyn SentenceTokenizer> {
        match self {
            TokenizerKind::Whitespace   => Box::new(PreTokenizerAdapter::new("whitespace", Whitespace::default())),
            TokenizerKind::Bert         => Box::new(PreTokenizerAdapter::new("bert", BertPreTokenizer)),
            TokenizerKind::Pretokenized => Box::new(SplitTokenizer),
        }
    }
}

/// Any `tokenizers` pre-tokenizer used as a sentence tokenizer.
pub struct PreTokenizerAdapter<P> {
    name: &'static str,
    pre:  P,
}

impl<P: PreTokenizer> PreTokenizerAdapter<P> {
    pub fn new(name: &'static str, pre: P) -> Self {
        Self { name, pre }
    }
}

impl<P: PreTokenizer + Sync> SentenceTokenizer for PreTokenizerAdapter<P> {
    fn name(&self) -> &str {
        self.name
    }

    fn tokenize(&self, sentence: &str) -> Result<Vec<String>> {
        let mut pretokenized = PreTokenizedString::from(sentence);
        self.pre
            .pre_tokenize(&mut pretokenized)
            .map_err(|e| anyhow!("Pre-tokenization error: {e}"))?;

        Ok(pretokenized
            .get_splits(OffsetReferential::Original, OffsetType::Char)
            .into_iter()
            .map(|(token, _, _)| token.to_string())
            .collect())
    }
}

/// Whitespace split for corpora that are already tokenized.
pub struct SplitTokenizer;

impl SentenceTokenizer for SplitTokenizer {
    fn name(&self) -> &str {
        "pretokenized"
    }

    fn tokenize(&self, sentence: &str) -> Result<Vec<String>> {
        Ok(sentence.split_whitespace().map(str::to_string).collect())
    }
}
