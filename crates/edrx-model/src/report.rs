use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::FeedKind;

/// Column-level discrepancies between a projected table and its target
/// schema. Informational; the projection is still produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProjectionReport {
    /// Target columns never present in the (renamed) input; filled with `""`.
    pub missing: BTreeSet<String>,
    /// (Renamed) input columns absent from the target; dropped from output.
    pub extra: BTreeSet<String>,
}

impl ProjectionReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Counts from one deduplication pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DedupeStats {
    pub rows_in: usize,
    pub rows_out: usize,
    /// Rows whose recency field failed to parse and sorted as minimum.
    pub unparseable_recency: usize,
}

impl DedupeStats {
    pub fn dropped(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_out)
    }
}

/// Everything the pipeline reports about one feed, success or failure.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FeedSummary {
    pub feed: FeedKind,
    /// Raw records read from the snapshot file.
    pub records_in: usize,
    /// Normalized rows after extraction (row expansion may exceed records_in).
    pub rows_extracted: usize,
    pub dedupe: Option<DedupeStats>,
    /// Wide projection: rows written and where.
    pub wide_rows: usize,
    pub wide_path: Option<PathBuf>,
    pub wide_report: ProjectionReport,
    /// Narrow (database-loader) projection, host feed only.
    pub narrow_rows: Option<usize>,
    pub narrow_path: Option<PathBuf>,
    pub narrow_report: Option<ProjectionReport>,
    /// Feed-level failure, if the feed produced no output.
    pub error: Option<String>,
}

impl FeedSummary {
    pub fn failed(feed: FeedKind, error: String) -> Self {
        Self {
            feed,
            records_in: 0,
            rows_extracted: 0,
            dedupe: None,
            wide_rows: 0,
            wide_path: None,
            wide_report: ProjectionReport::default(),
            narrow_rows: None,
            narrow_path: None,
            narrow_report: None,
            error: Some(error),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// One pipeline run across all requested feeds.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RunSummary {
    pub date: String,
    pub feeds: Vec<FeedSummary>,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.feeds.iter().any(FeedSummary::is_failure)
    }
}
