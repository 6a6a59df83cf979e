//! Entity-key deduplication with a recency tie-break.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use edrx_model::{DedupeStats, Row, Table};
use tracing::{debug, warn};

use crate::recency::parse_recency;

/// The composite entity key for a row: key cell values joined with `|`.
///
/// Rows missing a key column contribute an empty segment; absent-key rows
/// therefore collide with each other, which is accepted behavior — callers
/// that require key integrity filter before deduplicating.
pub fn composite_key(row: &Row, key_columns: &[String]) -> String {
    let mut key = String::new();
    for (pos, column) in key_columns.iter().enumerate() {
        if pos > 0 {
            key.push('|');
        }
        key.push_str(row.value(column).trim());
    }
    key
}

/// Keep exactly one row per composite key: the row with the latest parsed
/// recency; on equal recency, the row that appeared first in input order.
///
/// Unparseable or missing recency sorts as the minimum possible value.
/// Survivors emit in first-appearance order of their key, so rerunning
/// over identical input regenerates identical output.
pub fn dedupe_table(table: &mut Table, key_columns: &[String], recency_column: &str) -> DedupeStats {
    let rows_in = table.len();
    let mut unparseable = 0usize;

    // key -> (surviving row index, parsed recency)
    let mut best: HashMap<String, (usize, Option<DateTime<Utc>>)> = HashMap::new();
    let mut key_order: Vec<String> = Vec::new();

    for (idx, row) in table.rows.iter().enumerate() {
        let key = composite_key(row, key_columns);
        let raw = row.value(recency_column);
        let recency = parse_recency(raw);
        if recency.is_none() && !raw.trim().is_empty() {
            unparseable += 1;
            warn!(
                key = %key,
                value = raw,
                column = recency_column,
                "unparseable recency; row sorts last in its group"
            );
        }

        match best.get_mut(&key) {
            None => {
                best.insert(key.clone(), (idx, recency));
                key_order.push(key);
            }
            // Strictly-greater keeps the earlier row on ties; `None` is the
            // minimum, so any parsed instant beats a malformed one.
            Some(entry) if recency > entry.1 => *entry = (idx, recency),
            Some(_) => {}
        }
    }

    let rows = std::mem::take(&mut table.rows);
    table.rows = key_order
        .iter()
        .map(|key| rows[best[key].0].clone())
        .collect();

    let stats = DedupeStats {
        rows_in,
        rows_out: table.len(),
        unparseable_recency: unparseable,
    };
    debug!(
        rows_in = stats.rows_in,
        rows_out = stats.rows_out,
        dropped = stats.dropped(),
        "deduplicated table"
    );
    stats
}
