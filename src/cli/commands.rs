// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands: `build`, `tokenize` and `stats`.
// `build` and `tokenize` share the pipeline flags below.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::build_use_case::{default_entity_types, BuildConfig};
use crate::data::extender::DEFAULT_LENGTH_RATIO;
use crate::infra::tokenizer_store::TokenizerKind;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Align, extend and merge the span-type layers into one corpus
    Build(BuildArgs),

    /// Only build (or refresh) the tokenized summary cache
    Tokenize(PipelineArgs),

    /// Print the span-type histogram of an existing dataset
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// JSON file with a full build configuration; other flags are ignored
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

#[derive(Args, Debug)]
pub struct PipelineArgs {
    /// Directory holding the corpus, the layer files and all outputs
    #[arg(long, default_value = "data")]
    pub data_dir: String,

    /// Corpus stem: reads {input}.json and {input}_answer_extract_{span}.json
    #[arg(long, default_value = "corpus")]
    pub input: String,

    /// File name of the merged dataset
    #[arg(long, default_value = "cloze_diverse_answer_span.json")]
    pub output: String,

    /// File name of the tokenized summary cache
    #[arg(long, default_value = "summary_cache.json")]
    pub cache: String,

    /// File name of the span-type CSV report
    #[arg(long, default_value = "span_types.csv")]
    pub report: String,

    /// Entity-type markers in priority order (must include the placeholder)
    #[arg(long, value_delimiter = ',', default_values_t = default_entity_types())]
    pub entity_types: Vec<String>,

    /// Generic marker used by the non-entity layers
    #[arg(long, default_value = "PLACEHOLDER")]
    pub placeholder: String,

    /// Span types in extension order
    #[arg(long, value_delimiter = ',', default_values_t = vec!["NE".to_string(), "clause".to_string()])]
    pub span_types: Vec<String>,

    /// Span type whose answers are extended and written out
    #[arg(long, default_value = "NE")]
    pub default_span_type: String,

    /// Accept a candidate only when clause_len * ratio < candidate_len
    #[arg(long, default_value_t = DEFAULT_LENGTH_RATIO)]
    pub length_ratio: f64,

    /// How summary sentences are split into tokens
    #[arg(long, value_enum, default_value_t = TokenizerKind::Whitespace)]
    pub tokenizer: TokenizerKind,

    /// Tokenization threads (0 = one per core)
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    /// Ignore and rebuild the summary cache
    #[arg(long)]
    pub refresh_cache: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl From<PipelineArgs> for BuildConfig {
    fn from(a: PipelineArgs) -> Self {
        BuildConfig {
            data_dir:          a.data_dir,
            input_name:        a.input,
            output_name:       a.output,
            cache_name:        a.cache,
            report_name:       a.report,
            entity_types:      a.entity_types,
            placeholder:       a.placeholder,
            span_types:        a.span_types,
            default_span_type: a.default_span_type,
            length_ratio:      a.length_ratio,
            tokenizer:         a.tokenizer,
            threads:           a.threads,
            refresh_cache:     a.refresh_cache,
            progress:          !a.no_progress,
        }
    }
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Dataset to count
    #[arg(long)]
    pub dataset: PathBuf,

    /// Also write the histogram as CSV here
    #[arg(long)]
    pub report: Option<PathBuf>,
}
