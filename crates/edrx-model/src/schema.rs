use std::collections::BTreeMap;

/// An ordered output column list with an optional rename map.
///
/// Target schemas are configuration, not behavior: downstream consumers
/// evolve their column lists independently of the extraction code, so a
/// schema can be loaded from JSON and handed to the projector as-is.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct TargetSchema {
    /// Output columns, in output order.
    pub columns: Vec<String>,
    /// Normalized-row column name to target column name.
    #[serde(default)]
    pub renames: BTreeMap<String, String>,
}

impl TargetSchema {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            renames: BTreeMap::new(),
        }
    }

    pub fn with_renames<I, K, V>(mut self, renames: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.renames = renames
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// The target-side name for a normalized-row column.
    pub fn renamed<'a>(&'a self, column: &'a str) -> &'a str {
        self.renames.get(column).map(String::as_str).unwrap_or(column)
    }
}
