//! End-to-end pipeline tests against real snapshot files on disk.

use std::path::Path;

use serde_json::json;

use edrx_cli::pipeline::{RunOptions, run};
use edrx_ingest::DateToken;
use edrx_model::{CustomerLookup, FeedKind};
use edrx_output::read_tsv;

const DATE: &str = "20240103";

fn write_snapshot(dir: &Path, feed: FeedKind, records: serde_json::Value) {
    let path = dir.join(feed.snapshot_filename(DATE));
    std::fs::write(path, serde_json::to_string(&records).unwrap()).unwrap();
}

fn options(dir: &Path, feeds: Vec<FeedKind>) -> RunOptions {
    RunOptions {
        date: DateToken::parse(DATE).unwrap(),
        input_dir: dir.to_path_buf(),
        output_dir: dir.join("out"),
        sql_output_dir: dir.join("sql"),
        feeds,
        lookup: CustomerLookup::builtin(),
        spec_dir: None,
        dry_run: false,
    }
}

fn host_records() -> serde_json::Value {
    json!([
        {
            "hostname": "WEB01",
            "cid": "850b517a9a8e448689dc6ff8aabc7932",
            "device_id": "aaa111",
            "last_seen": "2024-01-02T08:00:00Z",
            "first_seen": "2023-06-01T00:00:00Z",
            "platform_name": "Windows",
            "os_version": "Windows Server 2019",
            "ou": ["Servers", "Web"],
            "status": "normal"
        },
        {
            "hostname": "WEB01",
            "cid": "850b517a9a8e448689dc6ff8aabc7932",
            "device_id": "aaa111",
            "last_seen": "2024-01-03T10:26:41Z",
            "first_seen": "2023-06-01T00:00:00Z",
            "platform_name": "Windows",
            "os_version": "Windows Server 2019",
            "ou": ["Servers", "Web"],
            "status": "contained"
        },
        {
            "hostname": "DB01",
            "cid": "554dcfe9bf3045618c7c0bf7f6261e4e",
            "device_id": "bbb222",
            "last_seen": "2024-01-03T09:00:00Z",
            "platform_name": "Linux",
            "status": "normal"
        }
    ])
}

#[test]
fn host_feed_dedupes_and_writes_both_projections() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("out")).unwrap();
    std::fs::create_dir_all(dir.path().join("sql")).unwrap();
    write_snapshot(dir.path(), FeedKind::Host, host_records());

    let summary = run(&options(dir.path(), vec![FeedKind::Host]));

    assert!(!summary.has_failures());
    let host = &summary.feeds[0];
    assert_eq!(host.records_in, 3);
    assert_eq!(host.rows_extracted, 3);
    assert_eq!(host.dedupe.unwrap().dropped(), 1);
    assert_eq!(host.wide_rows, 2);
    assert_eq!(host.narrow_rows, Some(2));

    let wide_path = dir
        .path()
        .join("out")
        .join(format!("Daily Host Export - All - {DATE} - prepped.csv"));
    let (columns, rows) = read_tsv(&wide_path).unwrap();
    assert_eq!(columns.first().map(String::as_str), Some("Hostname"));
    assert_eq!(columns.last().map(String::as_str), Some("SnapshotDate"));
    assert_eq!(rows.len(), 2);

    // First appearance order is preserved; the later sighting's cells win.
    assert_eq!(rows[0].value("Hostname"), "WEB01");
    assert_eq!(rows[0].value("Last Seen"), "2024-01-03T10:26:41Z");
    assert_eq!(rows[0].value("Status"), "contained");
    assert_eq!(rows[0].value("Customer Name"), "Russel Metals Inc.");
    assert_eq!(rows[0].value("OU"), "Servers; Web");
    assert_eq!(rows[0].value("SnapshotDate"), DATE);
    // Pending correlation renders as a single space, not empty.
    assert_eq!(rows[0].value("Prevention Policy"), " ");
    assert_eq!(rows[1].value("Hostname"), "DB01");

    let sql_path = dir
        .path()
        .join("sql")
        .join(format!("Daily_Host_Export_ALL_SQL_{DATE}.csv"));
    let (sql_columns, sql_rows) = read_tsv(&sql_path).unwrap();
    assert_eq!(sql_columns.first().map(String::as_str), Some("SnapshotDate"));
    assert!(sql_columns.iter().any(|c| c == "Customer_ID"));
    assert!(!sql_columns.iter().any(|c| c == "CID"));
    assert_eq!(sql_rows[0].value("Hostname"), "WEB01");
    assert_eq!(
        sql_rows[0].value("Customer_ID"),
        "850b517a9a8e448689dc6ff8aabc7932"
    );
    assert_eq!(sql_rows[1].value("Host_ID"), "bbb222");
}

#[test]
fn vulnerability_rows_expand_per_affected_product() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("out")).unwrap();
    std::fs::create_dir_all(dir.path().join("sql")).unwrap();
    write_snapshot(
        dir.path(),
        FeedKind::Vulnerability,
        json!([
            {
                "hostname": "WEB01",
                "cid": "850b517a9a8e448689dc6ff8aabc7932",
                "cve": {
                    "id": "CVE-2024-0001",
                    "severity": "HIGH",
                    "base_score": 8.1
                },
                "apps": [
                    {"product_name_version": "openssl 1.1.1", "remediation_ids": ["r1"]},
                    {"product_name_version": "nginx 1.18"}
                ],
                "updated_timestamp": "2024-01-03T01:00:00Z"
            }
        ]),
    );

    let summary = run(&options(dir.path(), vec![FeedKind::Vulnerability]));

    assert!(!summary.has_failures());
    let feed = &summary.feeds[0];
    assert_eq!(feed.records_in, 1);
    assert_eq!(feed.rows_extracted, 2);
    assert_eq!(feed.narrow_rows, None);

    let path = dir
        .path()
        .join("out")
        .join(format!("Daily Vulnerability Export - ALL - {DATE}.csv"));
    let (_, rows) = read_tsv(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].value("CVE ID"), "CVE-2024-0001");
    assert_eq!(rows[0].value("Product"), "openssl 1.1.1");
    assert_eq!(rows[1].value("Product"), "nginx 1.18");
    // No SnapshotDate column on this feed.
    assert_eq!(rows[0].get("SnapshotDate"), None);
}

#[test]
fn missing_snapshot_fails_one_feed_without_stopping_the_rest() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("out")).unwrap();
    std::fs::create_dir_all(dir.path().join("sql")).unwrap();
    write_snapshot(dir.path(), FeedKind::Host, host_records());
    // No vulnerability or remediation snapshots on disk.

    let summary = run(&options(dir.path(), FeedKind::ALL.to_vec()));

    assert!(summary.has_failures());
    assert_eq!(summary.feeds.len(), 3);
    assert!(!summary.feeds[0].is_failure());
    assert!(summary.feeds[1].is_failure());
    assert!(summary.feeds[2].is_failure());

    // The healthy feed's exports were still written.
    assert!(
        dir.path()
            .join("out")
            .join(format!("Daily Host Export - All - {DATE} - prepped.csv"))
            .is_file()
    );
    assert!(
        !dir.path()
            .join("out")
            .join(format!("Daily Remediation Export - ALL - {DATE}.csv"))
            .exists()
    );
}

#[test]
fn dry_run_reports_without_writing() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("out")).unwrap();
    std::fs::create_dir_all(dir.path().join("sql")).unwrap();
    write_snapshot(dir.path(), FeedKind::Host, host_records());

    let mut opts = options(dir.path(), vec![FeedKind::Host]);
    opts.dry_run = true;
    let summary = run(&opts);

    assert!(!summary.has_failures());
    assert_eq!(summary.feeds[0].wide_rows, 2);
    assert!(std::fs::read_dir(dir.path().join("out")).unwrap().next().is_none());
    assert!(std::fs::read_dir(dir.path().join("sql")).unwrap().next().is_none());
}

#[test]
fn spec_override_replaces_the_builtin_field_map() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("out")).unwrap();
    std::fs::create_dir_all(dir.path().join("sql")).unwrap();
    std::fs::create_dir_all(dir.path().join("specs")).unwrap();
    write_snapshot(dir.path(), FeedKind::Remediation, json!([
        {"hostname": "WEB01", "recommended_remediation": "Patch it"}
    ]));

    let override_spec = json!({
        "kind": "remediation",
        "field_map": {
            "fields": [
                {"column": "Hostname", "rule": "direct", "source": "hostname"}
            ]
        }
    });
    std::fs::write(
        dir.path().join("specs").join("remediation.json"),
        serde_json::to_string(&override_spec).unwrap(),
    )
    .unwrap();

    let mut opts = options(dir.path(), vec![FeedKind::Remediation]);
    opts.spec_dir = Some(dir.path().join("specs"));
    let summary = run(&opts);

    assert!(!summary.has_failures());
    let path = dir
        .path()
        .join("out")
        .join(format!("Daily Remediation Export - ALL - {DATE}.csv"));
    let (columns, rows) = read_tsv(&path).unwrap();
    assert_eq!(columns, vec!["Hostname"]);
    assert_eq!(rows[0].value("Hostname"), "WEB01");
}
