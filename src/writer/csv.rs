//! CSV file writer

use std::path::Path;

use anyhow::{Context, Result};

use crate::model::Table;

use super::Writer;

/// Writer producing comma-separated files with a header row
pub struct CsvWriter;

impl Writer for CsvWriter {
    fn write(&self, table: &Table, path: &Path) -> Result<()> {
        let mut csv_writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create file: {}", path.display()))?;

        csv_writer
            .write_record(table.column_names())
            .context("Failed to write CSV header")?;

        for (row_num, row) in table.rows.iter().enumerate() {
            csv_writer
                .write_record(row.cells.iter().map(|c| c.display().into_owned()))
                .with_context(|| format!("Failed to write CSV row {}", row_num + 2))?;
        }

        csv_writer
            .flush()
            .with_context(|| format!("Failed to flush file: {}", path.display()))?;
        Ok(())
    }
}
