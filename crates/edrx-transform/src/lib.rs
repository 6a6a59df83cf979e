//! Table-level transforms: recency-aware deduplication and projection onto
//! target schemas.

pub mod dedupe;
pub mod project;
pub mod recency;

pub use dedupe::{composite_key, dedupe_table};
pub use project::project;
pub use recency::parse_recency;
