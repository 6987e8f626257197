//! Transform stage: dedup, fill missing values, stamp the load time

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::model::{CellValue, Table};

/// Applies the fixed per-run cleanup rules to a table
pub struct Transformer {
    fill_value: CellValue,
    timestamp_column: String,
    load_timestamp: NaiveDateTime,
}

impl Transformer {
    /// Capture the wall-clock load time once; every row in this run gets it
    pub fn new(fill_value: CellValue, timestamp_column: impl Into<String>) -> Self {
        Self {
            fill_value,
            timestamp_column: timestamp_column.into(),
            load_timestamp: Local::now().naive_local(),
        }
    }

    #[cfg(test)]
    fn with_load_timestamp(mut self, ts: NaiveDateTime) -> Self {
        self.load_timestamp = ts;
        self
    }

    /// Deduplicate, fill nulls, and append the load-timestamp column
    pub fn transform(&self, mut table: Table) -> Table {
        info!("Starting data transformation...");

        let removed = table.dedup_rows();
        info!(
            "Rows after removing duplicates: {} ({} removed)",
            table.row_count(),
            removed
        );

        let filled = table.fill_nulls(&self.fill_value);
        info!("Missing values handled: {} cells filled", filled);

        table.add_constant_column(
            self.timestamp_column.clone(),
            CellValue::DateTime(self.load_timestamp),
        );
        info!("Metadata column added");

        table
    }
}
