//! The per-feed pipeline: discover, load, extract, dedupe, project, export.
//!
//! Feed failures are isolated: a missing or malformed snapshot fails only
//! that feed's output, and the remaining feeds still run. Every feed ends
//! in a [`FeedSummary`], success or not, so the caller always gets a full
//! accounting.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info, info_span};

use edrx_ingest::{DateToken, find_snapshot, load_snapshot};
use edrx_map::{FeedSpec, extract_table, feed_spec};
use edrx_model::{CustomerLookup, FeedKind, FeedSummary, RunSummary, TargetSchema};
use edrx_output::write_tsv;
use edrx_transform::{dedupe_table, project};

/// One pipeline invocation.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub date: DateToken,
    /// Directory holding the daily snapshot files.
    pub input_dir: PathBuf,
    /// Destination for the wide (BI) exports.
    pub output_dir: PathBuf,
    /// Destination for the narrow (database-loader) exports.
    pub sql_output_dir: PathBuf,
    /// Feeds to process, in order.
    pub feeds: Vec<FeedKind>,
    pub lookup: CustomerLookup,
    /// Directory of per-feed spec overrides (`host.json`, ...).
    pub spec_dir: Option<PathBuf>,
    /// Process and report without writing any export file.
    pub dry_run: bool,
}

/// Run the requested feeds, isolating failures per feed.
pub fn run(options: &RunOptions) -> RunSummary {
    let mut summary = RunSummary {
        date: options.date.to_string(),
        feeds: Vec::new(),
    };

    for &feed in &options.feeds {
        let span = info_span!("feed", kind = %feed);
        let _guard = span.enter();
        match process_feed(feed, options) {
            Ok(feed_summary) => summary.feeds.push(feed_summary),
            Err(err) => {
                error!(feed = %feed, error = %format!("{err:#}"), "feed failed; continuing");
                summary.feeds.push(FeedSummary::failed(feed, format!("{err:#}")));
            }
        }
    }

    summary
}

fn process_feed(feed: FeedKind, options: &RunOptions) -> Result<FeedSummary> {
    let spec = load_spec(feed, options.spec_dir.as_deref())?;
    let date = options.date.as_str();

    let snapshot = find_snapshot(&options.input_dir, feed, &options.date)?;
    let records = load_snapshot(&snapshot)?;
    info!(snapshot = %snapshot.display(), records = records.len(), "loaded snapshot");

    let mut table = extract_table(&spec, &records, &options.lookup);
    let rows_extracted = table.len();

    let dedupe = spec
        .dedupe
        .as_ref()
        .map(|d| dedupe_table(&mut table, &d.key_columns, &d.recency_column));

    if spec.stamp_snapshot_date {
        table.add_constant_column("SnapshotDate", date);
    }

    // Wide projection: the table's own columns, no renames. Running it
    // through the projector keeps both outputs on the same code path.
    let wide_target = TargetSchema::new(table.columns.clone());
    let (wide, wide_report) = project(&table, &wide_target);
    let wide_path = options.output_dir.join(spec.wide_filename(date));
    if !options.dry_run {
        ensure_dir(&options.output_dir)?;
        write_tsv(&wide_path, &wide)?;
    }

    let mut narrow_rows = None;
    let mut narrow_path = None;
    let mut narrow_report = None;
    if let Some(schema) = &spec.narrow {
        let (narrow, report) = project(&table, schema);
        let filename = spec
            .narrow_filename(date)
            .context("narrow schema configured without a filename convention")?;
        let path = options.sql_output_dir.join(filename);
        if !options.dry_run {
            ensure_dir(&options.sql_output_dir)?;
            write_tsv(&path, &narrow)?;
        }
        narrow_rows = Some(narrow.len());
        narrow_path = Some(path);
        narrow_report = Some(report);
    }

    Ok(FeedSummary {
        feed,
        records_in: records.len(),
        rows_extracted,
        dedupe,
        wide_rows: wide.len(),
        wide_path: Some(wide_path),
        wide_report,
        narrow_rows,
        narrow_path,
        narrow_report,
        error: None,
    })
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))
}

/// The shipped feed spec, or a JSON override from the spec directory.
fn load_spec(feed: FeedKind, spec_dir: Option<&Path>) -> Result<FeedSpec> {
    let Some(dir) = spec_dir else {
        return Ok(feed_spec(feed));
    };
    let path = dir.join(format!("{}.json", feed.label().to_lowercase()));
    if !path.is_file() {
        return Ok(feed_spec(feed));
    }
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read feed spec {}", path.display()))?;
    let spec: FeedSpec = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse feed spec {}", path.display()))?;
    info!(path = %path.display(), "using feed spec override");
    Ok(spec)
}
