//! tabload - Batch ETL pipeline for tabular data
//!
//! Reads a directory of CSV files, concatenates them into one table,
//! removes duplicate rows, fills missing values, stamps a load timestamp,
//! and writes the result to a timestamped output file.

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod util;
pub mod writer;

pub use config::Config;
pub use model::Table;
pub use pipeline::{Pipeline, PipelineOutcome};
