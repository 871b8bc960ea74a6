// ============================================================
// Layer 4 — Corpus Assembler
// ============================================================
// The in-memory pipeline, without any file I/O:
//
//   layers (configured span-type order)
//       │
//       ▼
//   SummaryAligner   → one AlignedLayer per span type
//       │
//       ▼
//   SpanIndex        → one index per span type, all built up front
//       │
//       ▼
//   SpanExtender     → the default layer, widened
//       │
//       ▼
//   SquadDataset + SpanHistogram

use anyhow::{bail, Result};

use crate::data::aligner::SummaryAligner;
use crate::data::extender::SpanExtender;
use crate::data::markers::EntityMarkers;
use crate::data::span_index::SpanIndex;
use crate::data::statistics::SpanHistogram;
use crate::domain::document::SummaryStore;
use crate::domain::qa_pair::SquadDataset;

/// The merged corpus and its span-type histogram.
#[derive(Debug, Clone)]
pub struct AssembledCorpus {
    pub dataset:   SquadDataset,
    pub histogram: SpanHistogram,
}

pub struct CorpusAssembler {
    aligner:           SummaryAligner,
    extender:          SpanExtender,
    default_span_type: String,
}

impl CorpusAssembler {
    pub fn new(markers: EntityMarkers, default_span_type: impl Into<String>, length_ratio: f64) -> Self {
        let default_span_type = default_span_type.into();
        Self {
            aligner:  SummaryAligner::new(markers.clone()),
            extender: SpanExtender::new(markers, default_span_type.clone(), length_ratio),
            default_span_type,
        }
    }

    /// Run alignment, indexing and extension over `layers`, given as
    /// (span type, dataset) pairs in configured order.
    pub fn assemble(&self, layers: &[(String, SquadDataset)], store: &SummaryStore) -> Result<AssembledCorpus> {
        let aligned = layers
            .iter()
            .map(|(span_type, ds)| self.aligner.align_layer(span_type, ds, store))
            .collect::<Result<Vec<_>, _>>()?;

        let indices: Vec<SpanIndex> = aligned.iter().map(SpanIndex::build).collect();

        let Some(default_layer) = aligned.iter().find(|l| l.span_type == self.default_span_type) else {
            bail!("span type '{}' is not among the loaded layers", self.default_span_type);
        };

        let extended  = self.extender.extend(default_layer, &indices)?;
        let dataset   = extended.to_dataset();
        let histogram = SpanHistogram::from_dataset(&dataset);

        if histogram.total() != dataset.qa_count() {
            bail!(
                "span histogram covers {} answers but the dataset has {} questions",
                histogram.total(),
                dataset.qa_count()
            );
        }

        Ok(AssembledCorpus { dataset, histogram })
    }
}
