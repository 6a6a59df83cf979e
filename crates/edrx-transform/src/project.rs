//! Projection of a normalized table onto a target schema.

use std::collections::{BTreeMap, BTreeSet};

use edrx_model::{ProjectionReport, Row, Table, TargetSchema};
use tracing::warn;

/// Project a table onto a target schema.
///
/// Order-sensitive steps: rename input columns, then for each target
/// column take the renamed value or `""`, in exactly the target's column
/// order. Input columns with no home in the target are dropped from the
/// output but surfaced in the report; target columns with no source are
/// filled with `""` and likewise reported. Neither discrepancy is an
/// error.
pub fn project(table: &Table, target: &TargetSchema) -> (Table, ProjectionReport) {
    // Renamed input column -> original column. First mapping wins when a
    // rename collides with an existing column name.
    let mut sources: BTreeMap<&str, &str> = BTreeMap::new();
    for column in input_columns(table) {
        let renamed = target.renamed(column);
        if let Some(existing) = sources.get(renamed) {
            warn!(
                column,
                existing, renamed, "rename collision; keeping first source column"
            );
            continue;
        }
        sources.insert(renamed, column);
    }

    let report = ProjectionReport {
        missing: target
            .columns
            .iter()
            .filter(|c| !sources.contains_key(c.as_str()))
            .cloned()
            .collect(),
        extra: sources
            .keys()
            .filter(|renamed| !target.columns.iter().any(|c| c == *renamed))
            .map(|renamed| (*renamed).to_string())
            .collect(),
    };

    if !report.is_clean() {
        warn!(
            feed = %table.feed,
            missing = ?report.missing,
            extra = ?report.extra,
            "projection does not line up with target schema"
        );
    }

    let rows = table
        .rows
        .iter()
        .map(|row| {
            target
                .columns
                .iter()
                .map(|column| {
                    let value = sources
                        .get(column.as_str())
                        .map(|source| row.value(source))
                        .unwrap_or("");
                    (column.clone(), value.to_string())
                })
                .collect::<Row>()
        })
        .collect();

    let projected = Table {
        feed: table.feed,
        columns: target.columns.clone(),
        rows,
    };
    (projected, report)
}

/// Declared columns plus any stray cells rows happen to carry.
fn input_columns(table: &Table) -> impl Iterator<Item = &str> {
    let mut seen: BTreeSet<&str> = table.columns.iter().map(String::as_str).collect();
    let mut ordered: Vec<&str> = table.columns.iter().map(String::as_str).collect();
    for row in &table.rows {
        for column in row.columns() {
            if seen.insert(column) {
                ordered.push(column);
            }
        }
    }
    ordered.into_iter()
}
