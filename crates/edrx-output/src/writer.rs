//! Atomic tab-delimited writer.

use std::path::{Path, PathBuf};

use edrx_model::Table;
use tracing::info;

use crate::error::{OutputError, Result};

/// Write a table as tab-separated UTF-8 with a header row.
///
/// Values are written as stored; no locale-dependent formatting is
/// applied. The file is materialized as `<name>.partial` in the
/// destination directory and renamed over the final path only after a
/// successful flush, so downstream pollers never observe a torn file.
pub fn write_tsv(path: &Path, table: &Table) -> Result<()> {
    let partial = partial_path(path);

    write_partial(&partial, table).inspect_err(|_| {
        // Best effort; the partial name is never read by consumers anyway.
        let _ = std::fs::remove_file(&partial);
    })?;

    std::fs::rename(&partial, path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), rows = table.len(), "wrote export");
    Ok(())
}

fn write_partial(partial: &Path, table: &Table) -> Result<()> {
    let io_err = |source| OutputError::Io {
        path: partial.to_path_buf(),
        source,
    };
    let csv_err = |source| OutputError::Csv {
        path: partial.to_path_buf(),
        source,
    };

    let file = std::fs::File::create(partial).map_err(io_err)?;
    let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(file);

    writer.write_record(&table.columns).map_err(csv_err)?;
    for row in &table.rows {
        writer
            .write_record(table.columns.iter().map(|column| row.value(column)))
            .map_err(csv_err)?;
    }

    writer
        .into_inner()
        .map_err(|e| io_err(e.into_error()))?
        .sync_all()
        .map_err(io_err)
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use edrx_model::{FeedKind, Row};

    #[test]
    fn partial_path_appends_suffix() {
        assert_eq!(
            partial_path(Path::new("/out/export.csv")),
            Path::new("/out/export.csv.partial")
        );
    }

    #[test]
    fn no_partial_file_survives_a_successful_write() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("export.csv");

        let mut table = Table::new(FeedKind::Host, vec!["Hostname".to_string()]);
        let mut row = Row::new();
        row.set("Hostname", "WEB01");
        table.push_row(row);

        write_tsv(&path, &table).unwrap();

        assert!(path.is_file());
        assert!(!partial_path(&path).exists());
    }

    #[test]
    fn header_and_rows_are_tab_separated() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("export.csv");

        let mut table = Table::new(
            FeedKind::Host,
            vec!["Hostname".to_string(), "Site".to_string()],
        );
        let mut row = Row::new();
        row.set("Hostname", "WEB01");
        row.set("Site", "Toronto");
        table.push_row(row);

        write_tsv(&path, &table).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Hostname\tSite"));
        assert_eq!(lines.next(), Some("WEB01\tToronto"));
    }
}
