//! Shared helpers for one-off table reads, writes, and validation

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::model::Table;
use crate::parser::ParserFactory;
use crate::writer;

/// Read a single tabular file into a table, logging the row count
pub fn read_table(path: &Path) -> Result<Table> {
    let table = ParserFactory::new()
        .parse(path)
        .with_context(|| format!("Failed to read table: {}", path.display()))?;
    info!("Read {}: {} rows", path.display(), table.row_count());
    Ok(table)
}

/// Serialize a table to a file, propagating write errors
pub fn save_table(table: &Table, path: &Path) -> Result<()> {
    writer::write_table(table, path)
        .with_context(|| format!("Failed to save table: {}", path.display()))?;
    info!("Saved {}", path.display());
    Ok(())
}

/// Check a table for basic quality issues.
///
/// Never fails; returns human-readable descriptions. An empty table is one
/// issue, missing required columns are another.
pub fn validate_data(table: &Table, required_columns: Option<&[String]>) -> Vec<String> {
    let mut issues = Vec::new();

    if table.is_empty() {
        issues.push("Table is empty".to_string());
    }

    if let Some(required) = required_columns {
        let missing: Vec<&str> = required
            .iter()
            .filter(|name| table.column_index(name).is_none())
            .map(|name| name.as_str())
            .collect();
        if !missing.is_empty() {
            issues.push(format!("Missing columns: {}", missing.join(", ")));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use crate::model::{CellValue, Column};

    use super::*;

    fn table_with_columns(names: &[&str]) -> Table {
        let columns = names
            .iter()
            .enumerate()
            .map(|(i, n)| Column::new(n.to_string(), i))
            .collect();
        Table::new(columns)
    }

    #[test]
    fn empty_table_is_reported() {
        let table = table_with_columns(&["a"]);
        let issues = validate_data(&table, None);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("empty"));
    }

    #[test]
    fn missing_required_columns_are_named() {
        let mut table = table_with_columns(&["a", "b"]);
        table.add_row(vec![CellValue::Int(1), CellValue::Int(2)]);

        let required = vec!["a".to_string(), "c".to_string()];
        let issues = validate_data(&table, Some(&required));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("c"));
        assert!(!issues[0].contains('a'));
    }

    #[test]
    fn clean_table_has_no_issues() {
        let mut table = table_with_columns(&["a"]);
        table.add_row(vec![CellValue::Int(1)]);
        assert!(validate_data(&table, Some(&["a".to_string()])).is_empty());
    }

    #[test]
    fn read_and_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("in.csv");
        let dst = dir.path().join("out.csv");
        std::fs::write(&src, "a,b\n1,hello\n").unwrap();

        let table = read_table(&src).unwrap();
        save_table(&table, &dst).unwrap();

        assert_eq!(std::fs::read_to_string(&dst).unwrap(), "a,b\n1,hello\n");
    }
}
