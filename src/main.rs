//! tabload - Batch ETL pipeline for tabular data

use std::process::ExitCode;

use tabload::pipeline::PipelineOutcome;
use tabload::{logging, Config, Pipeline};

fn main() -> ExitCode {
    let config = Config::default();

    let _guard = match logging::init(&config.log_dir) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match Pipeline::new(config).run() {
        Ok(PipelineOutcome::Loaded(_)) => {
            println!("\n✓ ETL pipeline completed successfully!");
            ExitCode::SUCCESS
        }
        Ok(PipelineOutcome::NoData) => {
            println!("\n✓ ETL pipeline finished: no input files to process");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("ETL pipeline failed: {:#}", e);
            println!("\n✗ ETL pipeline failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
