use std::collections::BTreeMap;

/// Tenant identifier to human-readable customer name.
///
/// Fixed for the lifetime of a run; no file or network access at resolve
/// time. Unknown identifiers resolve to the empty string rather than
/// failing, so a new tenant appearing in a feed never blocks an export.
///
/// The table is injected at pipeline construction, so a larger or
/// externally-sourced table swaps in without touching any call site.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CustomerLookup {
    entries: BTreeMap<String, String>,
}

impl CustomerLookup {
    /// The default table shipped with the pipeline.
    ///
    /// Update procedure: add the tenant id and display name here (or supply
    /// a JSON object of id-to-name pairs via `--customer-map`).
    pub fn builtin() -> Self {
        Self::from_pairs([
            ("850b517a9a8e448689dc6ff8aabc7932", "Russel Metals Inc."),
            ("554dcfe9bf3045618c7c0bf7f6261e4e", "Sanborn"),
        ])
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Resolve a tenant id to its display name; `""` when unknown.
    pub fn resolve(&self, tenant_id: &str) -> &str {
        self.entries
            .get(tenant_id)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
