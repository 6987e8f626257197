//! Load stage: write the table to a timestamped output file

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

use crate::model::Table;
use crate::writer::{CsvWriter, Writer};

/// Writes a table to a fresh file in the output directory
pub struct Loader {
    output_dir: PathBuf,
    prefix: String,
}

impl Loader {
    pub fn new(output_dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Serialize the table to `<prefix>_<timestamp>.csv`, creating the
    /// output directory if needed. Returns the path written.
    pub fn load(&self, table: &Table) -> Result<PathBuf> {
        info!("Starting data load...");

        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                self.output_dir.display()
            )
        })?;

        let output_file = self.next_output_path();
        CsvWriter
            .write(table, &output_file)
            .with_context(|| format!("Failed to write output file: {}", output_file.display()))?;

        info!("Data loaded to {}", output_file.display());
        println!("✓ Data successfully loaded to {}", output_file.display());
        Ok(output_file)
    }

    /// Timestamped file name at second granularity. Two runs within the
    /// same second get a numeric suffix instead of clobbering each other.
    fn next_output_path(&self) -> PathBuf {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let base = format!("{}_{}", self.prefix, timestamp);

        let candidate = self.output_dir.join(format!("{base}.csv"));
        if !candidate.exists() {
            return candidate;
        }

        let mut n = 1;
        loop {
            let candidate = self.output_dir.join(format!("{base}_{n}.csv"));
            if !candidate.exists() {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use crate::model::{CellValue, Column};

    use super::*;

    fn sample_table() -> Table {
        let mut t = Table::new(vec![Column::new("a", 0)]);
        t.add_row(vec![CellValue::Int(1)]);
        t
    }

    #[test]
    fn creates_output_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("nested").join("output");
        let loader = Loader::new(&out_dir, "output");

        let path = loader.load(&sample_table()).unwrap();
        assert!(path.exists());
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("output_"));

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("a\n"));
    }

    #[test]
    fn same_second_runs_get_distinct_names() {
        let dir = tempfile::tempdir().unwrap();
        let loader = Loader::new(dir.path(), "output");

        let first = loader.next_output_path();
        File::create(&first).unwrap();
        let second = loader.next_output_path();

        assert_ne!(first, second);
        assert!(!second.exists());
    }
}
