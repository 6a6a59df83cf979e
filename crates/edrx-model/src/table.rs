use std::collections::BTreeMap;

use crate::FeedKind;

/// A single normalized output row: canonical column name to scalar text.
///
/// Empty string is the canonical "absent / not applicable" marker. A key
/// that is missing entirely means the extractor never produced the column,
/// which the schema projector treats the same as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Row {
    cells: BTreeMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Cell value with the empty string standing in for a missing column.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(String, String)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// An ordered collection of rows with a declared column order.
///
/// The column list is authoritative for export; rows may carry extra cells
/// (they are dropped at projection time and reported as unused).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Table {
    pub feed: FeedKind,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(feed: FeedKind, columns: Vec<String>) -> Self {
        Self {
            feed,
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a column with the same value in every row.
    ///
    /// Used to stamp the snapshot date after deduplication. Appending an
    /// already-declared column only overwrites the cells.
    pub fn add_constant_column(&mut self, column: &str, value: &str) {
        if !self.columns.iter().any(|c| c == column) {
            self.columns.push(column.to_string());
        }
        for row in &mut self.rows {
            row.set(column, value);
        }
    }
}
