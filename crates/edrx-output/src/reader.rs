//! Reader for the tab-delimited export format.

use std::path::Path;

use edrx_model::Row;

use crate::error::{OutputError, Result};

/// Read a tab-delimited export back into `(columns, rows)`.
///
/// Inverse of the writer modulo the canonical empty-string placeholder:
/// a value written as `""` reads back as `""`, indistinguishable from a
/// column that was absent before export. That is the contract downstream
/// consumers already live with.
pub fn read_tsv(path: &Path) -> Result<(Vec<String>, Vec<Row>)> {
    let csv_err = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .map_err(csv_err)?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(ToString::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        rows.push(
            columns
                .iter()
                .zip(record.iter())
                .map(|(column, value)| (column.clone(), value.to_string()))
                .collect(),
        );
    }

    Ok((columns, rows))
}
