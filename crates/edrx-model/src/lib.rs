//! Shared data model for the endpoint export prep pipeline.
//!
//! Everything downstream of raw JSON is expressed in these types: normalized
//! rows and tables, target schemas with rename maps, the placeholder policy,
//! feed identities, the tenant-to-customer lookup, and the diagnostic
//! structures surfaced to the caller.

pub mod feed;
pub mod lookup;
pub mod placeholder;
pub mod report;
pub mod schema;
pub mod table;

pub use feed::FeedKind;
pub use lookup::CustomerLookup;
pub use placeholder::PlaceholderKind;
pub use report::{DedupeStats, FeedSummary, ProjectionReport, RunSummary};
pub use schema::TargetSchema;
pub use table::{Row, Table};
