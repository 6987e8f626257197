//! Pipeline stages and the orchestrator that runs them in order

mod extract;
mod load;
mod transform;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;

pub use extract::Extractor;
pub use load::Loader;
pub use transform::Transformer;

/// How a pipeline run ended, short of failure
#[derive(Debug, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// All three stages ran; the output file is at this path
    Loaded(PathBuf),
    /// No input files were found; the run stopped before transform
    NoData,
}

/// Sequential extract-transform-load driver
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        info!("ETL pipeline initialized");
        Self { config }
    }

    /// Run extract, transform, and load in order.
    ///
    /// An empty input directory ends the run early with `NoData`; any
    /// stage error halts the run immediately and propagates.
    pub fn run(&self) -> Result<PipelineOutcome> {
        info!("{}", "=".repeat(50));
        info!("ETL pipeline started");
        info!("{}", "=".repeat(50));

        let extractor = Extractor::new(&self.config.input_dir);
        let table = match extractor.extract().context("Extraction failed")? {
            Some(table) => table,
            None => {
                info!("No data to process");
                return Ok(PipelineOutcome::NoData);
            }
        };

        let transformer = Transformer::new(
            self.config.fill_value.clone(),
            self.config.timestamp_column.clone(),
        );
        let table = transformer.transform(table);

        let loader = Loader::new(&self.config.output_dir, self.config.output_prefix.as_str());
        let output_file = loader.load(&table).context("Load failed")?;

        info!("{}", "=".repeat(50));
        info!("ETL pipeline completed successfully");
        info!("{}", "=".repeat(50));
        Ok(PipelineOutcome::Loaded(output_file))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Write;

    use super::*;

    fn config_in(dir: &std::path::Path) -> Config {
        Config::new(dir.join("data"), dir.join("output")).with_log_dir(dir.join("logs"))
    }

    #[test]
    fn full_run_produces_cleaned_output() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        fs::create_dir(&data).unwrap();
        let mut f = fs::File::create(data.join("one.csv")).unwrap();
        write!(f, "a,b\n1,2\n1,2\n3,\n").unwrap();
        drop(f);

        let outcome = Pipeline::new(config_in(dir.path())).run().unwrap();
        let path = match outcome {
            PipelineOutcome::Loaded(path) => path,
            other => panic!("expected Loaded, got {:?}", other),
        };

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "a,b,load_timestamp");
        // Duplicate dropped, null filled with the default
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("3,0,"));
    }

    #[test]
    fn empty_input_halts_without_output() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("data")).unwrap();

        let outcome = Pipeline::new(config_in(dir.path())).run().unwrap();
        assert_eq!(outcome, PipelineOutcome::NoData);
        assert!(!dir.path().join("output").exists());
    }

    #[test]
    fn missing_input_directory_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();
        // No data/ directory at all
        assert!(Pipeline::new(config_in(dir.path())).run().is_err());
    }

    #[test]
    fn rows_from_disjoint_files_are_all_kept() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        fs::create_dir(&data).unwrap();
        fs::write(data.join("a.csv"), "a,b\n1,2\n3,4\n").unwrap();
        fs::write(data.join("b.csv"), "a,b\n5,6\n").unwrap();

        let outcome = Pipeline::new(config_in(dir.path())).run().unwrap();
        let path = match outcome {
            PipelineOutcome::Loaded(path) => path,
            other => panic!("expected Loaded, got {:?}", other),
        };
        let contents = fs::read_to_string(path).unwrap();
        // Header plus the three distinct rows
        assert_eq!(contents.lines().count(), 4);
    }
}
