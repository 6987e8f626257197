//! Extract stage: gather input files into one table

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::model::Table;
use crate::parser::ParserFactory;

/// Scans a directory for tabular files and concatenates them
pub struct Extractor {
    input_dir: PathBuf,
    factory: ParserFactory,
}

impl Extractor {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            factory: ParserFactory::new(),
        }
    }

    /// Parse every recognized file in the input directory into one table.
    ///
    /// Returns `Ok(None)` when the directory holds no recognized files;
    /// the caller treats that as a normal early stop. The first file that
    /// fails to parse aborts the whole extract.
    pub fn extract(&self) -> Result<Option<Table>> {
        info!("Starting data extraction...");

        let files = self.discover_files()?;
        if files.is_empty() {
            warn!("No input files found in {}", self.input_dir.display());
            return Ok(None);
        }

        let mut tables = Vec::with_capacity(files.len());
        for path in &files {
            let table = self
                .factory
                .parse(path)
                .with_context(|| format!("Failed to parse input file: {}", path.display()))?;
            info!("Extracted {}: {} rows", path.display(), table.row_count());
            tables.push(table);
        }

        let combined = Table::concat(tables);
        info!("Total rows extracted: {}", combined.row_count());
        Ok(Some(combined))
    }

    /// List recognized files, sorted by name so discovery order is stable
    fn discover_files(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.input_dir).with_context(|| {
            format!("Failed to read input directory: {}", self.input_dir.display())
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| {
                    format!("Failed to read input directory: {}", self.input_dir.display())
                })?
                .path();
            if path.is_file() && self.factory.supports(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

/// Convenience wrapper for one-off extraction
pub fn extract_dir(input_dir: &Path) -> Result<Option<Table>> {
    Extractor::new(input_dir).extract()
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;

    use crate::model::CellValue;

    use super::*;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let mut f = File::create(dir.join(name)).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn combines_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "b.csv", "a,b\n3,4\n");
        write_file(dir.path(), "a.csv", "a,b\n1,2\n");
        write_file(dir.path(), "notes.md", "not tabular");

        let table = extract_dir(dir.path()).unwrap().unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0].cells[0], CellValue::Int(1));
        assert_eq!(table.rows[1].cells[0], CellValue::Int(3));
    }

    #[test]
    fn empty_directory_yields_no_data() {
        let dir = tempfile::tempdir().unwrap();
        assert!(extract_dir(dir.path()).unwrap().is_none());
    }

    #[test]
    fn bad_file_aborts_the_extract() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "good.csv", "a\n1\n");
        // Invalid UTF-8 in a record makes the parse fail
        let mut f = File::create(dir.path().join("bad.csv")).unwrap();
        f.write_all(b"a,b\n\xff\xfe,2\n").unwrap();
        drop(f);

        assert!(extract_dir(dir.path()).is_err());
    }

    #[test]
    fn missing_directory_is_an_error() {
        assert!(extract_dir(Path::new("no-such-input-dir")).is_err());
    }
}
