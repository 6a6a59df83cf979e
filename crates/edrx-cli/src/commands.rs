//! Subcommand implementations: argument resolution in front of the pipeline.

use anyhow::{Context, Result};
use tracing::info;

use edrx_cli::pipeline::{RunOptions, run};
use edrx_ingest::DateToken;
use edrx_model::{CustomerLookup, FeedKind, RunSummary};

use crate::cli::RunArgs;

pub fn run_export(args: &RunArgs) -> Result<RunSummary> {
    let date = DateToken::parse(&args.date)?;
    let lookup = match &args.customer_map {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read customer map {}", path.display()))?;
            let lookup: CustomerLookup = serde_json::from_str(&text)
                .with_context(|| format!("failed to parse customer map {}", path.display()))?;
            info!(path = %path.display(), entries = lookup.len(), "loaded customer map");
            lookup
        }
        None => CustomerLookup::builtin(),
    };

    let feeds = selected_feeds(args);
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.input_dir.clone());
    let sql_output_dir = args.sql_output_dir.clone().unwrap_or_else(|| output_dir.clone());

    let options = RunOptions {
        date,
        input_dir: args.input_dir.clone(),
        output_dir,
        sql_output_dir,
        feeds,
        lookup,
        spec_dir: args.spec_dir.clone(),
        dry_run: args.dry_run,
    };
    Ok(run(&options))
}

pub fn run_feeds() -> Result<()> {
    for feed in FeedKind::ALL {
        println!("{:<15} {}", feed.label(), feed.snapshot_filename("YYYYmmDD"));
    }
    Ok(())
}

/// Requested feeds in canonical order, defaulting to all three.
fn selected_feeds(args: &RunArgs) -> Vec<FeedKind> {
    if args.feeds.is_empty() {
        return FeedKind::ALL.to_vec();
    }
    FeedKind::ALL
        .into_iter()
        .filter(|kind| args.feeds.iter().any(|arg| FeedKind::from(*arg) == *kind))
        .collect()
}
