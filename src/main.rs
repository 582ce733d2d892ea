// src/main.rs
mod extractors;
mod models;
mod persona;
mod pipeline;
mod reader;
mod scoring;
mod storage;
mod utils;
mod validation;

use std::path::PathBuf;

use clap::Parser;
use models::DocumentOutcome;
use persona::Persona;
use pipeline::{ProcessingConfig, DEFAULT_TOP_N};
use storage::StorageManager;
use utils::AppError;

/// Command Line Interface for the persona-driven section prioritizer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Target persona for prioritization
    #[arg(short, long, value_enum, default_value_t = Persona::Executive)]
    persona: Persona,

    /// Input directory containing documents (.pdf, .txt, .md, .html)
    #[arg(short, long, default_value = "input")]
    input_dir: PathBuf,

    /// Output directory for JSON results
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Number of top-ranked sections kept per document
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,

    /// Override the job-to-be-done description written to each record
    #[arg(long)]
    job: Option<String>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Result<(ProcessingConfig, PathBuf, PathBuf), AppError> {
        if self.top_n == 0 {
            return Err(AppError::Config("--top-n must be at least 1".to_string()));
        }
        let config = ProcessingConfig::new(self.persona)
            .with_job(self.job)
            .with_top_n(self.top_n);
        Ok((config, self.input_dir, self.output_dir))
    }
}

fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.verbose);
    tracing::info!("Starting processing for args: {:?}", args);
    let (config, input_dir, output_dir) = args.into_config()?;

    // 3. Initialize storage
    let storage = StorageManager::new(&output_dir)?;

    // 4. Process every document, writing each result as it completes
    let processed = pipeline::process_all(&input_dir, &config)?;
    let sources: Vec<PathBuf> = processed.iter().map(|(path, _)| path.clone()).collect();
    let names = storage::output_names(&sources);
    let mut outcomes: Vec<DocumentOutcome> = Vec::with_capacity(processed.len());
    for ((path, outcome), name) in processed.into_iter().zip(names) {
        if let Err(e) = storage.save_result(&name, config.persona, &outcome) {
            tracing::error!("Failed to save result for {}: {}", path.display(), e);
        }
        outcomes.push(outcome);
    }

    if outcomes.is_empty() {
        return Ok(());
    }

    // 5. Save the combined batch
    storage.save_combined(config.persona, &outcomes)?;

    let failure_count = outcomes.iter().filter(|o| o.is_failed()).count();
    tracing::info!(
        "Processing complete for {} persona. Success: {}, Failures: {}. Results saved to {}",
        config.persona,
        outcomes.len() - failure_count,
        failure_count,
        output_dir.display()
    );

    Ok(())
}
