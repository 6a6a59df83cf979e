//! Library surface of the export prep CLI: logging setup, the per-feed
//! pipeline, and the run summary printer. The binary in `main.rs` is a
//! thin argument-parsing shell over these.

pub mod logging;
pub mod pipeline;
pub mod summary;
