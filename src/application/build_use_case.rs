// ============================================================
// Layer 2 — BuildUseCase
// ============================================================
// Builds the merged cloze corpus:
//
//   Step 1: Validate the configuration
//   Step 2: Load every span-type layer   (Layer 4 - data)
//   Step 3: Load/tokenize summaries      (Layer 2 - TokenizeUseCase)
//   Step 4: Align, index, extend         (Layer 4 - data)
//   Step 5: Write the merged dataset     (Layer 4 - data)
//   Step 6: Report span-type counts      (Layer 6 - infra)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::application::tokenize_use_case::TokenizeUseCase;
use crate::data::{
    assembler::{AssembledCorpus, CorpusAssembler},
    extender::DEFAULT_LENGTH_RATIO,
    loader::{load_layer, write_json},
    markers::EntityMarkers,
};
use crate::infra::{
    report::{log_histogram, SpanReport},
    tokenizer_store::TokenizerKind,
};

// ─── Build Configuration ─────────────────────────────────────────────────────
// Everything a run depends on. Serialisable so a run can be described
// by a JSON file (`build --config run.json`); missing keys take the
// defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub data_dir:          String,
    pub input_name:        String,
    pub output_name:       String,
    pub cache_name:        String,
    pub report_name:       String,
    /// Ordered; must include the placeholder
    pub entity_types:      Vec<String>,
    pub placeholder:       String,
    /// Ordered; extension tries span types in this order
    pub span_types:        Vec<String>,
    pub default_span_type: String,
    pub length_ratio:      f64,
    pub tokenizer:         TokenizerKind,
    /// 0 = one thread per core
    pub threads:           usize,
    pub refresh_cache:     bool,
    pub progress:          bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            data_dir:          "data".to_string(),
            input_name:        "corpus".to_string(),
            output_name:       "cloze_diverse_answer_span.json".to_string(),
            cache_name:        "summary_cache.json".to_string(),
            report_name:       "span_types.csv".to_string(),
            entity_types:      default_entity_types(),
            placeholder:       "PLACEHOLDER".to_string(),
            span_types:        vec!["NE".to_string(), "clause".to_string()],
            default_span_type: "NE".to_string(),
            length_ratio:      DEFAULT_LENGTH_RATIO,
            tokenizer:         TokenizerKind::default(),
            threads:           0,
            refresh_cache:     false,
            progress:          true,
        }
    }
}

pub fn default_entity_types() -> Vec<String> {
    [
        "PERSON",
        "ORGANIZATION",
        "LOCATION",
        "DATETIME",
        "QUANTITY",
        "MISCELLANEOUS",
        "PLACEHOLDER",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl BuildConfig {
    pub fn corpus_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(format!("{}.json", self.input_name))
    }

    pub fn layer_path(&self, span_type: &str) -> PathBuf {
        PathBuf::from(&self.data_dir)
            .join(format!("{}_answer_extract_{}.json", self.input_name, span_type))
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.output_name)
    }

    pub fn cache_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.cache_name)
    }

    pub fn report_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.report_name)
    }

    pub fn markers(&self) -> EntityMarkers {
        EntityMarkers::new(&self.entity_types, &self.placeholder)
    }

    pub fn validate(&self) -> Result<()> {
        if self.span_types.is_empty() {
            bail!("no span types configured");
        }
        let mut seen = HashSet::new();
        for span_type in &self.span_types {
            if !seen.insert(span_type) {
                bail!("span type '{span_type}' is configured twice");
            }
        }
        if !self.span_types.contains(&self.default_span_type) {
            bail!(
                "default span type '{}' is not in {:?}",
                self.default_span_type,
                self.span_types
            );
        }
        if self.entity_types.iter().any(|e| e.is_empty()) {
            bail!("entity types must not be empty strings");
        }
        if !self.entity_types.contains(&self.placeholder) {
            bail!(
                "placeholder '{}' must be one of the entity types {:?}",
                self.placeholder,
                self.entity_types
            );
        }
        if !self.length_ratio.is_finite() || self.length_ratio < 0.0 {
            bail!("length ratio must be a non-negative number, got {}", self.length_ratio);
        }
        Ok(())
    }
}

// ─── BuildUseCase ─────────────────────────────────────────────────────────────
pub struct BuildUseCase {
    config: BuildConfig,
}

impl BuildUseCase {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Run the whole pipeline and write its outputs.
    pub fn execute(&self) -> Result<AssembledCorpus> {
        let cfg = &self.config;

        // ── Step 1: Validate ──────────────────────────────────────────────────
        cfg.validate()?;

        // ── Step 2: Load span-type layers in configured order ─────────────────
        let layers = cfg
            .span_types
            .iter()
            .map(|span_type| {
                tracing::info!("Loading span type '{}'", span_type);
                load_layer(&cfg.layer_path(span_type)).map(|ds| (span_type.clone(), ds))
            })
            .collect::<Result<Vec<_>>>()?;

        // ── Step 3: Tokenized summaries (cached) ──────────────────────────────
        let store = TokenizeUseCase::new(cfg.clone()).execute()?;

        // ── Step 4: Align, index and extend ───────────────────────────────────
        let assembler = CorpusAssembler::new(cfg.markers(), &cfg.default_span_type, cfg.length_ratio);
        let corpus    = assembler.assemble(&layers, &store)?;

        // ── Step 5: Write the merged dataset ──────────────────────────────────
        let output = cfg.output_path();
        write_json(&output, &corpus.dataset)?;
        tracing::info!(
            "Wrote {} questions to '{}'",
            corpus.dataset.qa_count(),
            output.display()
        );

        // ── Step 6: Span-type statistics ──────────────────────────────────────
        log_histogram(&corpus.histogram);
        SpanReport::new(cfg.report_path()).write(&corpus.histogram)?;

        Ok(corpus)
    }
}
