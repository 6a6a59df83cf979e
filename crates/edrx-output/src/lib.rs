//! Tab-delimited export files.
//!
//! Both downstream consumers read tab-separated UTF-8 with a header row.
//! The writer never leaves a partially-written file under the final name:
//! output lands in a `.partial` sibling and is renamed into place once
//! fully flushed. The reader exists for round-trip tests and diagnostics.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{OutputError, Result};
pub use reader::read_tsv;
pub use writer::write_tsv;
