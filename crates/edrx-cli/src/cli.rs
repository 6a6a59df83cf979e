//! CLI argument definitions for the export prep pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use edrx_model::FeedKind;

#[derive(Parser)]
#[command(
    name = "edrx",
    version,
    about = "Prepare daily endpoint-security exports for BI and SQL loading",
    long_about = "Flatten the daily host, vulnerability, and remediation JSON exports\n\
                  into tab-delimited tables, deduplicate by entity key keeping the most\n\
                  recent sighting, and write the wide (BI) and narrow (database-loader)\n\
                  projections."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Process one day's snapshots and write the prepped exports.
    Run(RunArgs),

    /// List the supported feeds and their snapshot filename conventions.
    Feeds,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Snapshot date token, YYYYmmDD.
    #[arg(value_name = "DATE")]
    pub date: String,

    /// Directory holding the daily snapshot JSON files.
    #[arg(long = "input-dir", value_name = "DIR", default_value = ".")]
    pub input_dir: PathBuf,

    /// Output directory for the wide (BI) exports (default: <INPUT_DIR>).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output directory for the narrow (SQL) exports (default: <OUTPUT_DIR>).
    #[arg(long = "sql-output-dir", value_name = "DIR")]
    pub sql_output_dir: Option<PathBuf>,

    /// Feed to process; repeat for several (default: all three).
    #[arg(long = "feed", value_enum, value_name = "FEED")]
    pub feeds: Vec<FeedArg>,

    /// JSON object of tenant-id to customer-name pairs, replacing the
    /// built-in table.
    #[arg(long = "customer-map", value_name = "PATH")]
    pub customer_map: Option<PathBuf>,

    /// Directory of per-feed spec overrides (host.json, vulnerability.json,
    /// remediation.json); feeds without a file use the built-in spec.
    #[arg(long = "spec-dir", value_name = "DIR")]
    pub spec_dir: Option<PathBuf>,

    /// Process and report without writing export files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI feed choices.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FeedArg {
    Host,
    Vulnerability,
    Remediation,
}

impl From<FeedArg> for FeedKind {
    fn from(arg: FeedArg) -> Self {
        match arg {
            FeedArg::Host => FeedKind::Host,
            FeedArg::Vulnerability => FeedKind::Vulnerability,
            FeedArg::Remediation => FeedKind::Remediation,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
