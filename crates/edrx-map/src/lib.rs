//! Record flattening: declarative field maps interpreted by one generic
//! extractor engine.
//!
//! Each feed (host, vulnerability, remediation) is a [`FeedSpec`]: an
//! ordered field map plus optional deduplication keys and an optional
//! narrow projection schema. The engine is the only code that touches raw
//! JSON shapes; feed differences live entirely in configuration, and a
//! feed's map can be overridden from a JSON file without recompiling.

pub mod engine;
pub mod feeds;
pub mod sanitize;
pub mod types;

pub use engine::{extract_rows, extract_table, scalar_text};
pub use feeds::{feed_spec, host_feed, remediation_feed, vulnerability_feed};
pub use sanitize::sanitize_text;
pub use types::{DedupeSpec, FeedSpec, FieldMap, FieldRule, FieldSpec};
