use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("invalid date token '{token}': expected YYYYmmDD")]
    InvalidDate { token: String },

    #[error("snapshot file not found: {path}")]
    SnapshotNotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("snapshot {path} is not a JSON array of records")]
    NotAnArray { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, IngestError>;
