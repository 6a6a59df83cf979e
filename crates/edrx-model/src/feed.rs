use std::fmt;

/// The three daily feeds produced by the endpoint-security platform.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    Host,
    Vulnerability,
    Remediation,
}

impl FeedKind {
    pub const ALL: [FeedKind; 3] = [
        FeedKind::Host,
        FeedKind::Vulnerability,
        FeedKind::Remediation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FeedKind::Host => "Host",
            FeedKind::Vulnerability => "Vulnerability",
            FeedKind::Remediation => "Remediation",
        }
    }

    /// Snapshot filename for a given date token.
    ///
    /// The upstream export tool is inconsistent about the case of "All";
    /// these names match what it actually writes.
    pub fn snapshot_filename(self, date: &str) -> String {
        match self {
            FeedKind::Host => format!("Daily Host Export - All - {date}.json"),
            FeedKind::Vulnerability => format!("Daily Vulnerability Export - ALL - {date}.json"),
            FeedKind::Remediation => format!("Daily Remediation Export - ALL - {date}.json"),
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
