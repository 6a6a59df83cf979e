//! Field-map configuration types.

use edrx_model::{FeedKind, PlaceholderKind, TargetSchema};

/// How one output column is derived from a raw record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum FieldRule {
    /// Top-level field, coerced to text. A list value is joined with `"; "`.
    Direct { source: String },
    /// List of scalars joined with `"; "`; `null` entries are dropped.
    /// A non-list value passes through as text.
    JoinList { source: String },
    /// Named attribute extracted from each sub-object in a list, joined.
    JoinObjectAttr { source: String, attr: String },
    /// Named attribute from a single nested object.
    ObjectAttr { source: String, attr: String },
    /// Named attribute from the current row-expansion sub-object.
    ExpandedAttr { attr: String },
    /// Tenant identifier resolved through the customer lookup table.
    Customer { source: String },
    /// No source mapping; the column's placeholder is emitted as-is.
    Constant,
}

/// One output column of a field map.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldSpec {
    pub column: String,
    #[serde(flatten)]
    pub rule: FieldRule,
    /// Emitted when the source field is absent or `null`.
    #[serde(default)]
    pub placeholder: PlaceholderKind,
    /// Route the extracted text through the sanitizer before emitting.
    #[serde(default)]
    pub sanitize: bool,
}

impl FieldSpec {
    pub fn direct(column: &str, source: &str) -> Self {
        Self::with_rule(column, FieldRule::Direct {
            source: source.to_string(),
        })
    }

    pub fn join_list(column: &str, source: &str) -> Self {
        Self::with_rule(column, FieldRule::JoinList {
            source: source.to_string(),
        })
    }

    pub fn join_attr(column: &str, source: &str, attr: &str) -> Self {
        Self::with_rule(column, FieldRule::JoinObjectAttr {
            source: source.to_string(),
            attr: attr.to_string(),
        })
    }

    pub fn object_attr(column: &str, source: &str, attr: &str) -> Self {
        Self::with_rule(column, FieldRule::ObjectAttr {
            source: source.to_string(),
            attr: attr.to_string(),
        })
    }

    pub fn expanded(column: &str, attr: &str) -> Self {
        Self::with_rule(column, FieldRule::ExpandedAttr {
            attr: attr.to_string(),
        })
    }

    pub fn customer(column: &str, source: &str) -> Self {
        Self::with_rule(column, FieldRule::Customer {
            source: source.to_string(),
        })
    }

    /// Source correlation still under investigation.
    pub fn pending(column: &str) -> Self {
        Self::with_rule(column, FieldRule::Constant).placeholder(PlaceholderKind::Pending)
    }

    /// Source system does not populate this field yet.
    pub fn unpopulated(column: &str) -> Self {
        Self::with_rule(column, FieldRule::Constant).placeholder(PlaceholderKind::Unpopulated)
    }

    /// Deliberately blank column.
    pub fn blank(column: &str) -> Self {
        Self::with_rule(column, FieldRule::Constant)
    }

    pub fn placeholder(mut self, kind: PlaceholderKind) -> Self {
        self.placeholder = kind;
        self
    }

    pub fn sanitized(mut self) -> Self {
        self.sanitize = true;
        self
    }

    fn with_rule(column: &str, rule: FieldRule) -> Self {
        Self {
            column: column.to_string(),
            rule,
            placeholder: PlaceholderKind::Empty,
            sanitize: false,
        }
    }
}

/// An ordered field map for one feed.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct FieldMap {
    pub fields: Vec<FieldSpec>,
    /// When set, a record whose named field holds a list of sub-objects
    /// produces one row per sub-object; `ExpandedAttr` rules read from the
    /// current sub-object. A list of scalars does not expand.
    #[serde(default)]
    pub expand: Option<String>,
}

impl FieldMap {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self {
            fields,
            expand: None,
        }
    }

    pub fn with_expand(mut self, source: &str) -> Self {
        self.expand = Some(source.to_string());
        self
    }

    /// Output columns in map order.
    pub fn columns(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.column.clone()).collect()
    }
}

/// Deduplication configuration for a feed.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DedupeSpec {
    /// Columns forming the composite entity key, in order.
    pub key_columns: Vec<String>,
    /// Timestamp column used for the recency tie-break.
    pub recency_column: String,
}

/// Everything the pipeline needs to process one feed.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FeedSpec {
    pub kind: FeedKind,
    pub field_map: FieldMap,
    #[serde(default)]
    pub dedupe: Option<DedupeSpec>,
    /// Narrow database-loader projection; only the host feed carries one.
    #[serde(default)]
    pub narrow: Option<TargetSchema>,
    /// Stamp a `SnapshotDate` column after deduplication.
    #[serde(default)]
    pub stamp_snapshot_date: bool,
}

impl FeedSpec {
    /// Wide (BI) export filename for a date token.
    pub fn wide_filename(&self, date: &str) -> String {
        match self.kind {
            FeedKind::Host => format!("Daily Host Export - All - {date} - prepped.csv"),
            FeedKind::Vulnerability => format!("Daily Vulnerability Export - ALL - {date}.csv"),
            FeedKind::Remediation => format!("Daily Remediation Export - ALL - {date}.csv"),
        }
    }

    /// Narrow (database-loader) export filename, when the feed has one.
    pub fn narrow_filename(&self, date: &str) -> Option<String> {
        self.narrow.as_ref()?;
        match self.kind {
            FeedKind::Host => Some(format!("Daily_Host_Export_ALL_SQL_{date}.csv")),
            _ => None,
        }
    }
}
