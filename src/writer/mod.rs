//! Writer layer for serializing tables to disk

mod csv;

use std::path::Path;

use anyhow::Result;

use crate::model::Table;

pub use self::csv::CsvWriter;

/// Trait for serializing a table to a file
pub trait Writer: Send + Sync {
    /// Write the table to the given path, header row first
    fn write(&self, table: &Table, path: &Path) -> Result<()>;
}

/// Write a table with the default CSV writer
pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    CsvWriter.write(table, path)
}
