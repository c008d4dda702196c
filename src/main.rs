// ==============================================================================
// main.rs - Specimen ETL Entry Point
// ==============================================================================
// Description: Command line entry for the biorepository specimen batch transform
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use specimen_etl::models::{Selection, Stage};
use specimen_etl::pipeline::{self, PipelineConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// "debug", or a cohort to include (lung, gyn, sarcoma, neuro, headneck)
    selection: Option<Selection>,

    /// Directory holding the cohort files; outputs are written here
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Passes to run
    #[arg(long, value_enum, default_value_t = Stage::All)]
    stage: Stage,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "specimen_etl=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = PipelineConfig::new(args.data_dir, args.selection.unwrap_or_default())
        .with_stage(args.stage);

    let report = pipeline::run(&config)?;

    if let Some(transform) = &report.transform {
        info!(
            "Wrote {} rows ({} person ids synthesized, {} tissue specimens logged)",
            transform.rows_written, transform.synthesized_person_ids, transform.tissue_specimens
        );
    }

    Ok(())
}
