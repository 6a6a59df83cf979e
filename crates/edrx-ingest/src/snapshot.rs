//! Loading a snapshot file into raw records.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{IngestError, Result};

/// One raw record as exported: field name to scalar, array, or sub-object.
/// Never mutated after load.
pub type RawRecord = Map<String, Value>;

/// Load a snapshot file: a JSON array of record objects.
///
/// A file that fails to read or parse is fatal for its feed. Array entries
/// that are not objects are skipped with a diagnostic rather than aborting
/// the feed.
pub fn load_snapshot(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&text).map_err(|source| IngestError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Array(entries) = value else {
        return Err(IngestError::NotAnArray {
            path: path.to_path_buf(),
        });
    };

    let total = entries.len();
    let mut records = Vec::with_capacity(total);
    for entry in entries {
        match entry {
            Value::Object(record) => records.push(record),
            other => {
                warn!(
                    path = %path.display(),
                    kind = json_kind(&other),
                    "skipping non-object snapshot entry"
                );
            }
        }
    }

    if records.len() < total {
        warn!(
            path = %path.display(),
            skipped = total - records.len(),
            "snapshot contained non-object entries"
        );
    }

    Ok(records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
