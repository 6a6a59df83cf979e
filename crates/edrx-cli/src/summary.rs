//! Terminal summary of a pipeline run.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use edrx_model::{FeedSummary, ProjectionReport, RunSummary};

pub fn print_summary(summary: &RunSummary) {
    println!("Snapshot date: {}", summary.date);
    for feed in &summary.feeds {
        if let Some(path) = &feed.wide_path {
            println!("{}: {}", feed.feed.label(), path.display());
        }
        if let Some(path) = &feed.narrow_path {
            println!("{} (SQL): {}", feed.feed.label(), path.display());
        }
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Feed"),
        header_cell("Records"),
        header_cell("Rows"),
        header_cell("Dropped"),
        header_cell("Wide"),
        header_cell("SQL"),
        header_cell("Schema"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 7, CellAlignment::Center);

    for feed in &summary.feeds {
        table.add_row(feed_row(feed));
    }
    println!("{table}");

    let failures: Vec<&FeedSummary> = summary.feeds.iter().filter(|f| f.is_failure()).collect();
    if !failures.is_empty() {
        eprintln!("Failures:");
        for feed in failures {
            let error = feed.error.as_deref().unwrap_or("unknown failure");
            eprintln!("- {}: {error}", feed.feed.label());
        }
    }
}

fn feed_row(feed: &FeedSummary) -> Vec<Cell> {
    if feed.is_failure() {
        return vec![
            feed_cell(feed),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            Cell::new("FAILED")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        ];
    }
    let dropped = feed.dedupe.map(|d| d.dropped());
    vec![
        feed_cell(feed),
        Cell::new(feed.records_in),
        Cell::new(feed.rows_extracted),
        match dropped {
            Some(value) if value > 0 => Cell::new(value).fg(Color::Yellow),
            Some(value) => dim_cell(value),
            None => dim_cell("-"),
        },
        Cell::new(feed.wide_rows),
        match feed.narrow_rows {
            Some(rows) => Cell::new(rows),
            None => dim_cell("-"),
        },
        schema_cell(feed),
        Cell::new("OK").fg(Color::Green).add_attribute(Attribute::Bold),
    ]
}

/// Worst schema discrepancy across the feed's projections.
fn schema_cell(feed: &FeedSummary) -> Cell {
    let reports = [Some(&feed.wide_report), feed.narrow_report.as_ref()];
    let (missing, extra) = reports
        .into_iter()
        .flatten()
        .fold((0, 0), |(m, e), report: &ProjectionReport| {
            (m + report.missing.len(), e + report.extra.len())
        });
    if missing == 0 && extra == 0 {
        Cell::new("clean").fg(Color::Green)
    } else {
        Cell::new(format!("{missing} missing / {extra} extra")).fg(Color::Yellow)
    }
}

fn feed_cell(feed: &FeedSummary) -> Cell {
    Cell::new(feed.feed.label())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
