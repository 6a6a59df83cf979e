//! Date-token validation and snapshot path resolution.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use edrx_model::FeedKind;

use crate::error::{IngestError, Result};

/// A validated `YYYYmmDD` date token.
///
/// The token names the daily data folder and appears verbatim in snapshot
/// and export filenames, so it is kept as the original string rather than
/// a parsed date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateToken(String);

impl DateToken {
    pub fn parse(token: &str) -> Result<Self> {
        let token = token.trim();
        NaiveDate::parse_from_str(token, "%Y%m%d").map_err(|_| IngestError::InvalidDate {
            token: token.to_string(),
        })?;
        Ok(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path where a feed's snapshot is expected for the given date.
pub fn snapshot_path(input_dir: &Path, feed: FeedKind, date: &DateToken) -> PathBuf {
    input_dir.join(feed.snapshot_filename(date.as_str()))
}

/// Resolve a feed's snapshot, failing if it is absent.
///
/// A missing snapshot is fatal for that feed only; the caller decides
/// whether to continue with sibling feeds.
pub fn find_snapshot(input_dir: &Path, feed: FeedKind, date: &DateToken) -> Result<PathBuf> {
    let path = snapshot_path(input_dir, feed, date);
    if !path.is_file() {
        return Err(IngestError::SnapshotNotFound { path });
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_token_accepts_valid_dates() {
        assert_eq!(DateToken::parse("20240103").unwrap().as_str(), "20240103");
        assert_eq!(DateToken::parse(" 20240103 ").unwrap().as_str(), "20240103");
    }

    #[test]
    fn date_token_rejects_garbage() {
        assert!(DateToken::parse("2024-01-03").is_err());
        assert!(DateToken::parse("20241503").is_err());
        assert!(DateToken::parse("today").is_err());
        assert!(DateToken::parse("").is_err());
    }

    #[test]
    fn snapshot_path_uses_feed_convention() {
        let date = DateToken::parse("20240103").unwrap();
        let path = snapshot_path(Path::new("/data"), FeedKind::Host, &date);
        assert_eq!(
            path,
            Path::new("/data/Daily Host Export - All - 20240103.json")
        );
    }

    #[test]
    fn find_snapshot_reports_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let date = DateToken::parse("20240103").unwrap();
        let err = find_snapshot(dir.path(), FeedKind::Remediation, &date).unwrap_err();
        assert!(matches!(err, IngestError::SnapshotNotFound { .. }));
    }
}
