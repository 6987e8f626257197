//! Table, Row, and Cell data structures

use std::borrow::Cow;
use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use rustc_hash::{FxHashSet, FxHasher};
use serde::{Deserialize, Serialize};

use super::schema::Column;

/// A cell value with type information
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(Cow<'static, str>),
    DateTime(NaiveDateTime),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => {
                // NaN compares equal to itself so duplicate rows collapse
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::String(a), CellValue::String(b)) => a == b,
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Null => {}
            CellValue::Bool(b) => b.hash(state),
            CellValue::Int(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::String(s) => s.hash(state),
            CellValue::DateTime(dt) => dt.hash(state),
        }
    }
}

impl CellValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Convert to a display string; null renders as an empty field
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed(""),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
            CellValue::Int(i) => Cow::Owned(i.to_string()),
            CellValue::Float(f) => Cow::Owned(f.to_string()),
            CellValue::String(s) => Cow::Borrowed(s.as_ref()),
            CellValue::DateTime(dt) => Cow::Owned(dt.to_string()),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(Cow::Owned(s.to_string()))
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(Cow::Owned(s))
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

/// A row in the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Cell values in column order
    pub cells: Vec<CellValue>,
}

impl Row {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }

    /// Hash of all cells, used for exact-duplicate detection
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        for cell in &self.cells {
            cell.hash(&mut hasher);
        }
        hasher.finish()
    }
}

/// A table containing columns and rows
#[derive(Debug)]
pub struct Table {
    /// Column definitions
    pub columns: Vec<Column>,
    /// All rows in the table
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table with column definitions
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Add a row to the table
    pub fn add_row(&mut self, cells: Vec<CellValue>) {
        self.rows.push(Row::new(cells));
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Iterate over column names
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Concatenate tables in order, preserving within-table row order.
    ///
    /// The column set is the union of all source columns, ordered by first
    /// appearance. Rows from tables lacking a column get `Null` in that
    /// position.
    pub fn concat(tables: Vec<Table>) -> Table {
        // Union of columns in first-seen order
        let mut union: IndexMap<String, usize> = IndexMap::new();
        for table in &tables {
            for col in &table.columns {
                let next = union.len();
                union.entry(col.name.clone()).or_insert(next);
            }
        }

        let columns: Vec<Column> = union
            .keys()
            .enumerate()
            .map(|(i, name)| Column::new(name.clone(), i))
            .collect();

        let mut result = Table::new(columns);
        for table in tables {
            // Map each source column position to its position in the union
            let mapping: Vec<usize> = table
                .columns
                .iter()
                .map(|c| union[&c.name])
                .collect();

            for row in table.rows {
                let mut cells = vec![CellValue::Null; union.len()];
                for (src_idx, cell) in row.cells.into_iter().enumerate() {
                    if let Some(&dst_idx) = mapping.get(src_idx) {
                        cells[dst_idx] = cell;
                    }
                }
                result.add_row(cells);
            }
        }
        result
    }

    /// Drop rows that are exact duplicates of an earlier row.
    ///
    /// The first occurrence wins. Returns the number of rows removed.
    pub fn dedup_rows(&mut self) -> usize {
        let before = self.rows.len();
        let mut seen: FxHashSet<u64> = FxHashSet::default();
        self.rows.retain(|row| seen.insert(row.fingerprint()));
        before - self.rows.len()
    }

    /// Replace every null cell with the given value. Returns the fill count.
    pub fn fill_nulls(&mut self, value: &CellValue) -> usize {
        let mut filled = 0;
        for row in &mut self.rows {
            for cell in &mut row.cells {
                if cell.is_null() {
                    *cell = value.clone();
                    filled += 1;
                }
            }
        }
        filled
    }

    /// Append a column holding the same value in every row
    pub fn add_constant_column(&mut self, name: impl Into<String>, value: CellValue) {
        let index = self.columns.len();
        self.columns.push(Column::new(name.into(), index));
        for row in &mut self.rows {
            row.cells.push(value.clone());
        }
    }
}
