//! Configuration handling for tabload

use std::path::PathBuf;

use crate::model::CellValue;

/// Configuration for a pipeline run
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory scanned for input files
    pub input_dir: PathBuf,
    /// Directory the output file is written to (created if absent)
    pub output_dir: PathBuf,
    /// Directory holding the run log
    pub log_dir: PathBuf,
    /// Prefix of the timestamped output file name
    pub output_prefix: String,
    /// Value substituted for missing cells during transform
    pub fill_value: CellValue,
    /// Name of the column stamped with the run's load time
    pub timestamp_column: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("output"),
            log_dir: PathBuf::from("logs"),
            output_prefix: "output".to_string(),
            fill_value: CellValue::Int(0),
            timestamp_column: "load_timestamp".to_string(),
        }
    }
}

impl Config {
    /// Create a new Config with input and output directories
    pub fn new(input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            ..Default::default()
        }
    }

    /// Set the log directory
    pub fn with_log_dir(mut self, dir: PathBuf) -> Self {
        self.log_dir = dir;
        self
    }

    /// Set the output file name prefix
    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    /// Set the value used to fill missing cells
    pub fn with_fill_value(mut self, value: CellValue) -> Self {
        self.fill_value = value;
        self
    }

    /// Set the name of the load-timestamp column
    pub fn with_timestamp_column(mut self, name: impl Into<String>) -> Self {
        self.timestamp_column = name.into();
        self
    }
}
