// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes to the use cases.
// All work happens in Layer 2 (application).

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{BuildArgs, Commands, PipelineArgs, StatsArgs};

use crate::application::build_use_case::BuildConfig;
use crate::data::loader::read_json;

#[derive(Parser, Debug)]
#[command(
    name = "cloze-span-align",
    version,
    about = "Merge span-type QA layers into one cloze corpus aligned to summary sentences."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Build(args)    => run_build(args),
            Commands::Tokenize(args) => run_tokenize(args),
            Commands::Stats(args)    => run_stats(args),
        }
    }
}

fn run_build(args: BuildArgs) -> Result<()> {
    use crate::application::build_use_case::BuildUseCase;

    let config: BuildConfig = match &args.config {
        Some(path) => {
            tracing::info!("Reading build configuration from '{}'", path.display());
            read_json(path)?
        }
        None => args.pipeline.into(),
    };

    let output = config.output_path();
    let corpus = BuildUseCase::new(config).execute()?;

    println!(
        "Wrote {} questions to {}",
        corpus.dataset.qa_count(),
        output.display()
    );
    for (span_type, count) in corpus.histogram.iter() {
        println!("  {span_type}: {count}");
    }
    Ok(())
}

fn run_tokenize(args: PipelineArgs) -> Result<()> {
    use crate::application::tokenize_use_case::TokenizeUseCase;

    let config: BuildConfig = args.into();
    let cache = config.cache_path();
    let store = TokenizeUseCase::new(config).execute()?;

    println!("{} documents tokenized, cache at {}", store.len(), cache.display());
    Ok(())
}

fn run_stats(args: StatsArgs) -> Result<()> {
    use crate::application::stats_use_case::StatsUseCase;

    let histogram = StatsUseCase::new(args.dataset, args.report).execute()?;
    for (span_type, count) in histogram.iter() {
        println!("{span_type}\t{count}");
    }
    println!("total\t{}", histogram.total());
    Ok(())
}
