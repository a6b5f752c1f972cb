//! numclass - Main Entry Point
//!
//! Usage: `numclass <input-file>`
//!
//! Classifies every integer in the input file into per-category output files
//! using a producer thread and a consumer thread joined by a bounded queue.

use anyhow::Context;
use numclass_rs::{
    config::PipelineConfig,
    error::NumClassError,
    pipeline::{nodes::IntegerFileSource, Pipeline, Router},
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Exit status for command-line usage errors
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    let input = match parse_args(std::env::args_os().skip(1)) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            eprintln!("Usage: numclass <input-file>");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let config = match PipelineConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let _log_guard = numclass_rs::logging::init(&config.logging);

    match run(&input, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Exactly one positional argument: the input path.
fn parse_args(mut args: impl Iterator<Item = std::ffi::OsString>) -> Result<PathBuf, NumClassError> {
    match (args.next(), args.next()) {
        (Some(path), None) => Ok(PathBuf::from(path)),
        (None, _) => Err(NumClassError::Usage("missing input file".to_string())),
        (Some(_), Some(_)) => Err(NumClassError::Usage(
            "expected exactly one input file".to_string(),
        )),
    }
}

fn run(input: &Path, config: &PipelineConfig) -> anyhow::Result<()> {
    tracing::info!("Starting numclass on {:?}", input);

    // Nothing is spawned until the source and every sink are open.
    let source = IntegerFileSource::open(input)?;
    let router = Router::standard_files(&config.output_dir)
        .with_context(|| format!("Failed to create outputs in {:?}", config.output_dir))?;
    let pipeline = Pipeline::new(config)?;

    let report = pipeline.run(source, router)?;
    report.log();

    if config.write_summary {
        let path = config.summary_path();
        report.write_json(&path)?;
        tracing::info!("Summary written to {:?}", path);
    }

    Ok(())
}
