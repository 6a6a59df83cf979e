//! Snapshot discovery and loading.
//!
//! Each feed produces one JSON document per day, named by a fixed
//! convention and a `YYYYmmDD` date token. This crate resolves those paths
//! and loads the record arrays; everything downstream works on
//! `serde_json::Map` records.

pub mod discovery;
pub mod error;
pub mod snapshot;

pub use discovery::{DateToken, find_snapshot, snapshot_path};
pub use error::{IngestError, Result};
pub use snapshot::{RawRecord, load_snapshot};
